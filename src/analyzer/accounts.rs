//! Account role recovery from `vec![AccountMeta::new(..), ..]` token streams

use std::mem;

use log::debug;

use crate::ast::TokenTree;
use crate::constants::solana::{ACCOUNT_META_IDENT, READONLY_CONSTRUCTOR, WRITABLE_CONSTRUCTOR};
use crate::models::program::AccountRole;

/// Flattened macro token
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Punct(String),
    Literal(String),
}

impl Token {
    fn is_punct(&self, expected: &str) -> bool {
        matches!(self, Token::Punct(op) if op == expected)
    }

    fn is_true(&self) -> bool {
        matches!(self, Token::Ident(text) | Token::Literal(text) if text == "true")
    }
}

/// Parse every element of an account vector, one role per element.
///
/// Elements that cannot be read still produce a role (no name, no flags) so
/// the positions of the others are preserved.
pub fn parse_account_tokens(tokens: &[TokenTree]) -> Vec<AccountRole> {
    split_elements(tokens).iter().map(|element| parse_role(element)).collect()
}

/// Split on top-level commas, flattening groups inside each element
fn split_elements(tokens: &[TokenTree]) -> Vec<Vec<Token>> {
    let mut elements = Vec::new();
    let mut current = Vec::new();

    for tree in tokens {
        if tree.is_punct(",") {
            if !current.is_empty() {
                elements.push(mem::take(&mut current));
            }
            continue;
        }
        flatten(tree, &mut current);
    }
    if !current.is_empty() {
        elements.push(current);
    }

    elements
}

fn flatten(tree: &TokenTree, out: &mut Vec<Token>) {
    match tree {
        TokenTree::Ident { text } => out.push(Token::Ident(text.clone())),
        TokenTree::Literal { text } => out.push(Token::Literal(text.clone())),
        TokenTree::Punct { op } => {
            // `::` arrives as two joint `:` puncts
            if op == ":" && out.last().map_or(false, |last| last.is_punct(":")) {
                out.pop();
                out.push(Token::Punct("::".to_string()));
            } else {
                out.push(Token::Punct(op.clone()));
            }
        }
        TokenTree::Group { stream, .. } => {
            for inner in stream {
                flatten(inner, out);
            }
        }
        TokenTree::Other => {}
    }
}

/// Positional rule: `AccountMeta :: new|new_readonly [*|&] name , flag`
fn parse_role(tokens: &[Token]) -> AccountRole {
    match tokens {
        [Token::Ident(constructor), separator, Token::Ident(method), args @ ..]
            if constructor == ACCOUNT_META_IDENT
                && separator.is_punct("::")
                && (method == WRITABLE_CONSTRUCTOR || method == READONLY_CONSTRUCTOR) =>
        {
            let offset = match args.first() {
                Some(first) if first.is_punct("*") || first.is_punct("&") => 1,
                _ => 0,
            };
            let name = match (args.get(offset), args.get(offset + 1)) {
                (Some(Token::Ident(name)), None) => Some(name.clone()),
                (Some(Token::Ident(name)), Some(next)) if next.is_punct(",") || next.is_punct(".") => {
                    Some(name.clone())
                }
                _ => None,
            };
            let is_signer = args.last().map_or(false, Token::is_true);

            AccountRole::new(name, method == WRITABLE_CONSTRUCTOR, is_signer)
        }
        // reuse of a role built elsewhere, e.g. `*meta` or `meta`
        short if short.len() <= 2 => {
            let name = short.iter().rev().find_map(|token| match token {
                Token::Ident(name) => Some(name.clone()),
                _ => None,
            });
            AccountRole::new(name, false, false)
        }
        _ => {
            debug!("Unrecognised account element: {:?}", tokens);
            AccountRole::new(None, false, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tokens(value: serde_json::Value) -> Vec<TokenTree> {
        serde_json::from_value(value).unwrap()
    }

    fn ident(text: &str) -> serde_json::Value {
        json!({ "_type": "Ident", "to_string": text })
    }

    fn punct(op: &str) -> serde_json::Value {
        json!({ "_type": "Punct", "op": op })
    }

    fn meta(constructor: &str, deref: bool, name: &str, signer: &str) -> Vec<serde_json::Value> {
        let mut args = Vec::new();
        if deref {
            args.push(punct("*"));
        }
        args.extend([ident(name), punct(","), ident(signer)]);
        vec![
            ident("AccountMeta"),
            punct(":"),
            punct(":"),
            ident(constructor),
            json!({ "_type": "Group", "delimiter": "Parenthesis", "stream": args }),
        ]
    }

    #[test]
    fn test_writable_and_readonly_roles() {
        let mut stream = meta("new", true, "from", "true");
        stream.push(punct(","));
        stream.extend(meta("new_readonly", false, "to", "false"));
        stream.push(punct(","));

        let roles = parse_account_tokens(&tokens(json!(stream)));
        assert_eq!(
            roles,
            vec![
                AccountRole::new(Some("from".to_string()), true, true),
                AccountRole::new(Some("to".to_string()), false, false),
            ]
        );
    }

    #[test]
    fn test_bare_variable_is_reused_role() {
        let stream = json!([punct("*"), ident("payer_meta"), punct(","), ident("other")]);
        let roles = parse_account_tokens(&tokens(stream));
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0], AccountRole::new(Some("payer_meta".to_string()), false, false));
        assert_eq!(roles[1].name.as_deref(), Some("other"));
    }

    #[test]
    fn test_indexed_key_keeps_position_without_name() {
        // AccountMeta::new(*accounts[0].key, false)
        let stream = json!([
            ident("AccountMeta"), punct(":"), punct(":"), ident("new"),
            { "_type": "Group", "delimiter": "Parenthesis", "stream": [
                punct("*"), ident("accounts"),
                { "_type": "Group", "delimiter": "Bracket", "stream": [{ "_type": "Literal", "to_string": "0" }] },
                punct("."), ident("key"), punct(","), ident("true")
            ]}
        ]);
        let roles = parse_account_tokens(&tokens(stream));
        assert_eq!(roles, vec![AccountRole::new(None, true, true)]);
    }

    #[test]
    fn test_unrecognised_element_is_anonymous() {
        let stream = json!([ident("make_meta"), { "_type": "Group", "delimiter": "Parenthesis", "stream": [ident("key")] }, ident("x")]);
        let roles = parse_account_tokens(&tokens(stream));
        assert_eq!(roles, vec![AccountRole::new(None, false, false)]);
    }
}
