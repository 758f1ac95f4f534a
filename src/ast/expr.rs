//! Statements, expressions and patterns

use serde::Deserialize;

use super::{lenient, Ident, Path, TokenTree, Type};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum Stmt {
    Local(Local),
    #[serde(rename = "StmtExpr")]
    Expr {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Expr,
    },
    #[serde(rename = "StmtSemi")]
    Semi {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Expr,
    },
    #[default]
    #[serde(other)]
    Other,
}

impl Stmt {
    /// Expression carried by the statement, a `let` initializer included
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            Stmt::Local(local) => local.init.as_deref(),
            Stmt::Expr { expr } | Stmt::Semi { expr } => Some(expr),
            Stmt::Other => None,
        }
    }
}

/// `let` binding
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Local {
    #[serde(default, deserialize_with = "lenient::node")]
    pub pat: Pat,
    #[serde(default, deserialize_with = "lenient::node")]
    pub init: Option<Box<Expr>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum Pat {
    #[serde(rename = "PatIdent")]
    Ident {
        #[serde(default, deserialize_with = "lenient::node")]
        ident: Ident,
    },
    #[serde(rename = "PatType")]
    Type {
        #[serde(default, deserialize_with = "lenient::node")]
        pat: Box<Pat>,
        #[serde(default, deserialize_with = "lenient::node")]
        ty: Type,
    },
    #[serde(rename = "PatLit")]
    Lit {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Box<Expr>,
    },
    #[serde(rename = "PatWild")]
    Wild,
    #[default]
    #[serde(other)]
    Other,
}

impl Pat {
    /// Name bound by a plain identifier pattern, looking through a type ascription
    pub fn binding_name(&self) -> Option<&str> {
        match self {
            Pat::Ident { ident } => ident.as_str(),
            Pat::Type { pat, .. } => pat.binding_name(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum Expr {
    #[serde(rename = "ExprCall")]
    Call(ExprCall),
    #[serde(rename = "ExprMethodCall")]
    MethodCall(ExprMethodCall),
    #[serde(rename = "ExprPath")]
    Path {
        #[serde(default, deserialize_with = "lenient::node")]
        path: Path,
    },
    #[serde(rename = "ExprStruct")]
    Struct(ExprStruct),
    #[serde(rename = "ExprTry")]
    Try {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Box<Expr>,
    },
    #[serde(rename = "ExprMatch")]
    Match(ExprMatch),
    #[serde(rename = "ExprMacro")]
    Macro(ExprMacro),
    #[serde(rename = "ExprLit")]
    Lit {
        #[serde(default, deserialize_with = "lenient::node")]
        lit: Lit,
    },
    #[serde(rename = "ExprReference")]
    Reference {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Box<Expr>,
    },
    #[serde(rename = "ExprUnary")]
    Unary {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Box<Expr>,
    },
    #[serde(rename = "ExprParen")]
    Paren {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Box<Expr>,
    },
    #[serde(rename = "ExprBlock")]
    Block {
        #[serde(default, deserialize_with = "lenient::node")]
        block: Block,
    },
    #[serde(rename = "ExprReturn")]
    Return {
        #[serde(default, deserialize_with = "lenient::node")]
        expr: Option<Box<Expr>>,
    },
    #[default]
    #[serde(other)]
    Other,
}

impl Expr {
    /// Strip parentheses, borrows and unary operators (`*x`, `&x`, `(x)`)
    pub fn peel(&self) -> &Expr {
        match self {
            Expr::Paren { expr } | Expr::Reference { expr } | Expr::Unary { expr } => expr.peel(),
            other => other,
        }
    }

    /// Path of a bare path expression
    pub fn as_path(&self) -> Option<&Path> {
        match self.peel() {
            Expr::Path { path } => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExprCall {
    #[serde(default, deserialize_with = "lenient::node")]
    pub func: Box<Expr>,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExprMethodCall {
    #[serde(default, deserialize_with = "lenient::node")]
    pub receiver: Box<Expr>,
    #[serde(default, deserialize_with = "lenient::node")]
    pub method: Ident,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExprStruct {
    #[serde(default, deserialize_with = "lenient::node")]
    pub path: Path,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub fields: Vec<FieldValue>,
}

impl ExprStruct {
    /// Value of the named field, shorthand `{ accounts }` included
    pub fn field(&self, name: &str) -> Option<&Expr> {
        self.fields
            .iter()
            .find(|field| field.member.as_str() == Some(name))
            .map(|field| &field.expr)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldValue {
    #[serde(default, deserialize_with = "lenient::node")]
    pub member: Ident,
    #[serde(default, deserialize_with = "lenient::node")]
    pub expr: Expr,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExprMatch {
    #[serde(default, deserialize_with = "lenient::node")]
    pub expr: Box<Expr>,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub arms: Vec<Arm>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Arm {
    #[serde(default, deserialize_with = "lenient::node")]
    pub pat: Pat,
    #[serde(default, deserialize_with = "lenient::node")]
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExprMacro {
    #[serde(default, deserialize_with = "lenient::node")]
    pub mac: Macro,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Macro {
    #[serde(default, deserialize_with = "lenient::node")]
    pub path: Path,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub tokens: Vec<TokenTree>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum Lit {
    #[serde(rename = "LitInt")]
    Int {
        #[serde(rename = "to_string", default, deserialize_with = "lenient::node")]
        repr: String,
    },
    #[serde(rename = "LitStr")]
    Str {
        #[serde(rename = "to_string", default, deserialize_with = "lenient::node")]
        repr: String,
    },
    #[serde(rename = "LitBool")]
    Bool {
        #[serde(default, deserialize_with = "lenient::node")]
        value: bool,
    },
    #[default]
    #[serde(other)]
    Other,
}

impl Lit {
    /// Source text of an integer literal, verbatim
    pub fn int_text(&self) -> Option<&str> {
        match self {
            Lit::Int { repr } if !repr.is_empty() => Some(repr),
            _ => None,
        }
    }
}
