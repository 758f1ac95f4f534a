//! Macro token streams (the body of `vec![...]` and friends)

use serde::Deserialize;

use super::lenient;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum TokenTree {
    Ident {
        #[serde(rename = "to_string", default, deserialize_with = "lenient::node")]
        text: String,
    },
    Punct {
        #[serde(default, deserialize_with = "lenient::node")]
        op: String,
    },
    Literal {
        #[serde(rename = "to_string", default, deserialize_with = "lenient::node")]
        text: String,
    },
    Group {
        #[serde(default, deserialize_with = "lenient::node")]
        delimiter: String,
        #[serde(default, deserialize_with = "lenient::nodes")]
        stream: Vec<TokenTree>,
    },
    #[default]
    #[serde(other)]
    Other,
}

impl TokenTree {
    pub fn is_punct(&self, expected: &str) -> bool {
        matches!(self, TokenTree::Punct { op } if op == expected)
    }
}
