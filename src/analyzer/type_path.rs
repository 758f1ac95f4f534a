//! Type reference flattening

use crate::ast::{Expr, PathArguments, Type};
use crate::constants::types::{resolve_alias, WRAPPER_TYPES};
use crate::models::program::TypePath;

/// Flatten a type reference into identifier tokens.
///
/// `[T; N]` becomes the single token `T;N`. For a path, segment identifiers are
/// taken in order; the first segment with generic arguments contributes the
/// identifiers of its first argument's path and ends the walk, so nesting is
/// followed one level deep only.
pub fn normalize(ty: &Type) -> TypePath {
    match ty {
        Type::Array { elem, len } => TypePath(array_token(elem, len).into_iter().collect()),
        Type::Path { path } => {
            let mut tokens = Vec::new();
            for segment in &path.segments {
                if let Some(ident) = segment.ident.as_str() {
                    tokens.push(ident.to_string());
                }
                if let PathArguments::AngleBracketed { args } = &segment.arguments {
                    if let Some(Type::Path { path: inner }) = args.first().map(peel_type) {
                        tokens.extend(inner.idents().map(str::to_string));
                    }
                    break;
                }
            }
            TypePath(tokens)
        }
        Type::Reference { elem } | Type::Paren { elem } => normalize(elem),
        Type::Other => TypePath::default(),
    }
}

/// Canonical name of a field type: wrappers stripped, first remaining token, alias resolved.
///
/// A type made only of wrappers keeps its innermost wrapper.
pub fn canonical_name(path: &TypePath) -> Option<String> {
    let tokens = path.tokens();
    let name = tokens
        .iter()
        .find(|token| !WRAPPER_TYPES.contains(&token.as_str()))
        .or_else(|| tokens.last())?;
    Some(resolve_alias(name).to_string())
}

fn peel_type(ty: &Type) -> &Type {
    match ty {
        Type::Reference { elem } | Type::Paren { elem } => peel_type(elem),
        other => other,
    }
}

fn array_token(elem: &Type, len: &Expr) -> Option<String> {
    let elem_name = match peel_type(elem) {
        Type::Path { path } => path.leaf()?,
        _ => return None,
    };
    let len_text = match len.peel() {
        Expr::Lit { lit } => lit.int_text()?,
        Expr::Path { path } => path.leaf()?,
        _ => return None,
    };
    Some(format!("{};{}", elem_name, len_text))
}
