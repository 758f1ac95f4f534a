//! Opcode recovery from hand-written `unpack` byte dispatch

use log::debug;

use crate::ast::{Expr, ExprMatch, ImplItem, ItemImpl, Pat, Stmt};
use crate::constants::solana::{SUCCESS_WRAPPER, UNPACK_METHOD};
use crate::models::program::LegacyOpcodeEntry;

/// Extract the opcode mapping of the `unpack` method of an impl block.
///
/// Returns `None` when the block has no `unpack` method or the method has no
/// `Ok(match ..)` dispatch.
pub fn extract_dispatch(item: &ItemImpl) -> Option<Vec<LegacyOpcodeEntry>> {
    let method = item.items.iter().find_map(|impl_item| match impl_item {
        ImplItem::Method(method) if method.sig.ident.as_str() == Some(UNPACK_METHOD) => Some(method),
        _ => None,
    })?;

    // Ok(match ..) among the top-level statements
    let dispatch = method.block.stmts.iter().find_map(dispatch_match)?;

    let entries: Vec<LegacyOpcodeEntry> = dispatch
        .arms
        .iter()
        .filter_map(|arm| {
            let code = match &arm.pat {
                Pat::Lit { expr } => match expr.peel() {
                    Expr::Lit { lit } => lit.int_text()?.to_string(),
                    _ => return None,
                },
                _ => {
                    debug!("Ignoring non-literal dispatch arm");
                    return None;
                }
            };
            Some(LegacyOpcodeEntry {
                code,
                payload_struct_name: payload_name(&arm.body),
            })
        })
        .collect();

    debug!("Found {} legacy dispatch arms", entries.len());
    Some(entries)
}

/// `Ok(match ..)` carried by a statement, directly or through `return`
fn dispatch_match(stmt: &Stmt) -> Option<&ExprMatch> {
    let mut expr = stmt.expr()?;
    if let Expr::Return { expr: Some(inner) } = expr {
        expr = inner.as_ref();
    }

    let Expr::Call(call) = expr else {
        return None;
    };
    if call.func.as_path()?.leaf() != Some(SUCCESS_WRAPPER) {
        return None;
    }
    match call.args.first()?.peel() {
        Expr::Match(dispatch) => Some(dispatch),
        _ => None,
    }
}

/// Struct named by the last statement of an arm body
fn payload_name(body: &Expr) -> Option<String> {
    let last = match body {
        Expr::Block { block } => block.stmts.last()?.expr()?,
        other => other,
    };

    let name = match last.peel() {
        Expr::Struct(construction) => construction.path.type_name(),
        Expr::Path { path } => path.type_name(),
        Expr::Call(call) => match call.args.first()?.peel() {
            Expr::Try { expr } => named_path(expr),
            other => named_path(other),
        },
        _ => None,
    };
    name.map(str::to_string)
}

fn named_path(expr: &Expr) -> Option<&str> {
    match expr.peel() {
        Expr::Struct(construction) => construction.path.type_name(),
        Expr::Path { path } => path.type_name(),
        Expr::Call(call) => call.func.as_path()?.type_name(),
        _ => None,
    }
}
