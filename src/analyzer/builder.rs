//! Builder function analysis
//!
//! A builder function is a client-side helper assembling a ready-to-send
//! instruction. Its local bindings are followed to find which instruction
//! variant the serialized payload comes from and which account roles are
//! passed along, across the idioms seen in native programs:
//!
//! ```text
//! let data = Op::Transfer(TransferArgs { amount }).pack()?;
//! let accounts = vec![AccountMeta::new(*from, true), AccountMeta::new_readonly(to, false)];
//! Ok(Instruction { program_id, accounts, data })
//! ```
//!
//! as well as `Instruction { accounts: vec![..], data: .. }` literals and
//! `Instruction::new_with_borsh(program_id, &Op::Transfer { .. }, accounts)`.

use log::debug;

use crate::analyzer::accounts::parse_account_tokens;
use crate::analyzer::type_path::normalize;
use crate::ast::{Expr, FnArg, ItemFn, Stmt};
use crate::constants::solana::{
    ACCOUNTS_BINDING, DATA_BINDING, INSTRUCTION_BUILDER_PREFIX, INSTRUCTION_NAME_HINT,
    SUCCESS_WRAPPER, UNWRAP_METHODS, VEC_MACRO,
};
use crate::models::program::{AccountRole, BuilderFunction, InlineField, TypePath};

/// A name visible in the function body
struct Binding<'a> {
    name: &'a str,
    is_argument: bool,
    ty: TypePath,
    init: Option<&'a Expr>,
}

/// Where the instruction value itself is put together
#[derive(Default)]
struct Construction<'a> {
    data: Option<&'a Expr>,
    accounts: Option<&'a Expr>,
}

/// Parameters and top-level `let` bindings of one function, in order
struct Scope<'a> {
    bindings: Vec<Binding<'a>>,
}

impl<'a> Scope<'a> {
    fn collect(item: &'a ItemFn) -> Self {
        let mut bindings = Vec::new();

        for input in &item.sig.inputs {
            if let FnArg::Typed { pat, ty } = input {
                if let Some(name) = pat.binding_name() {
                    bindings.push(Binding {
                        name,
                        is_argument: true,
                        ty: normalize(ty),
                        init: None,
                    });
                }
            }
        }

        for stmt in &item.block.stmts {
            if let Stmt::Local(local) = stmt {
                if let Some(name) = local.pat.binding_name() {
                    bindings.push(Binding {
                        name,
                        is_argument: false,
                        ty: TypePath::default(),
                        init: local.init.as_deref(),
                    });
                }
            }
        }

        Self { bindings }
    }

    /// Latest binding of `name`
    fn binding(&self, name: &str) -> Option<&Binding<'a>> {
        self.bindings.iter().rev().find(|binding| binding.name == name)
    }

    fn initializer(&self, name: &str) -> Option<&'a Expr> {
        self.binding(name).and_then(|binding| binding.init)
    }

    /// Instruction reference of a payload expression, following one local alias
    fn resolve_reference(&self, expr: &Expr) -> Option<String> {
        let first = direct_reference(expr)?;
        if is_qualified(&first) {
            return Some(first);
        }

        let aliased = self
            .initializer(&first)
            .and_then(direct_reference);
        Some(aliased.unwrap_or(first))
    }

    /// Account roles of a `vec![..]` expression or of a local holding one
    fn account_list(&self, expr: &Expr) -> Option<Vec<AccountRole>> {
        vec_roles(expr).or_else(|| {
            let name = expr.as_path()?.leaf()?;
            vec_roles(self.initializer(name)?)
        })
    }

    fn parameters(&self) -> Vec<InlineField> {
        self.bindings
            .iter()
            .filter(|binding| binding.is_argument)
            .map(|binding| InlineField {
                name: binding.name.to_string(),
                ty: binding.ty.clone(),
            })
            .collect()
    }
}

/// Analyze a free function
pub fn analyze_function(item: &ItemFn) -> Option<BuilderFunction> {
    let name = item.sig.ident.as_str()?;
    let scope = Scope::collect(item);
    let construction = find_construction(&item.block.stmts).unwrap_or_default();

    // `data` binding first, then the data handed to the constructed instruction
    let produces_instruction_ref = match scope.initializer(DATA_BINDING) {
        Some(init) => scope.resolve_reference(init),
        None => construction.data.and_then(|data| scope.resolve_reference(data)),
    };

    // Same order for the account list
    let accounts = scope
        .initializer(ACCOUNTS_BINDING)
        .and_then(vec_roles)
        .or_else(|| construction.accounts.and_then(|accounts| scope.account_list(accounts)));

    if produces_instruction_ref.is_some() || accounts.is_some() {
        debug!(
            "Builder {} produces {:?} with {} accounts",
            name,
            produces_instruction_ref,
            accounts.as_ref().map_or(0, Vec::len)
        );
    }

    Some(BuilderFunction {
        name: name.to_string(),
        produces_instruction_ref,
        accounts,
        parameters: scope.parameters(),
    })
}

/// Last `Instruction { .. }` literal or `Instruction::new_with_*(..)` call of the body
fn find_construction(stmts: &[Stmt]) -> Option<Construction<'_>> {
    stmts.iter().rev().find_map(|stmt| {
        let mut expr = stmt.expr()?.peel();
        if let Expr::Return { expr: Some(inner) } = expr {
            expr = inner.peel();
        }
        // Ok(..)
        if let Expr::Call(call) = expr {
            if call.func.as_path().and_then(|path| path.leaf()) == Some(SUCCESS_WRAPPER) {
                expr = call.args.first()?.peel();
            }
        }

        match expr {
            Expr::Struct(construction) if names_instruction(construction.path.idents()) => {
                Some(Construction {
                    data: construction.field(DATA_BINDING),
                    accounts: construction.field(ACCOUNTS_BINDING),
                })
            }
            Expr::Call(call) => {
                let path = call.func.as_path()?;
                let is_builder = names_instruction(path.idents())
                    && path.leaf()?.starts_with(INSTRUCTION_BUILDER_PREFIX);
                is_builder.then(|| Construction {
                    data: call.args.get(1),
                    accounts: call.args.get(2),
                })
            }
            _ => None,
        }
    })
}

fn names_instruction<'s>(mut idents: impl Iterator<Item = &'s str>) -> bool {
    idents.any(|ident| ident.contains(INSTRUCTION_NAME_HINT))
}

fn is_qualified(reference: &str) -> bool {
    reference.contains("::")
}

/// Reference named by an expression without looking at other bindings
fn direct_reference(expr: &Expr) -> Option<String> {
    serialized_receiver(expr).or_else(|| value_reference(expr))
}

/// Receiver of `<receiver>.pack()?`, `<receiver>.try_to_vec().unwrap()` and the like
fn serialized_receiver(expr: &Expr) -> Option<String> {
    match unwrap_fallible(expr) {
        Expr::MethodCall(call) => value_reference(&call.receiver),
        _ => None,
    }
}

fn unwrap_fallible(expr: &Expr) -> &Expr {
    match expr.peel() {
        Expr::Try { expr } => unwrap_fallible(expr),
        Expr::MethodCall(call)
            if call.method.as_str().map_or(false, |method| UNWRAP_METHODS.contains(&method)) =>
        {
            unwrap_fallible(&call.receiver)
        }
        other => other,
    }
}

/// Path of a call's callee, a bare path, or a struct literal
fn value_reference(expr: &Expr) -> Option<String> {
    match expr.peel() {
        Expr::Call(call) => call.func.as_path()?.joined(),
        Expr::Path { path } => path.joined(),
        Expr::Struct(construction) => construction.path.joined(),
        _ => None,
    }
}

fn vec_roles(expr: &Expr) -> Option<Vec<AccountRole>> {
    match expr.peel() {
        Expr::Macro(mac) if mac.mac.path.leaf() == Some(VEC_MACRO) => {
            Some(parse_account_tokens(&mac.mac.tokens))
        }
        _ => None,
    }
}
