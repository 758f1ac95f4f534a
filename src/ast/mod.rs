//! Node model of the syntax tree produced by the external syn-based parser
//!
//! The tree arrives as JSON where every node carries a `_type` tag. Each node
//! family is a closed enum with an `Other` catch-all, so an unknown node kind
//! deserializes fine and is simply not recognised by the extractors. Node
//! fields decode through `lenient`: a malformed sub-node becomes its default
//! and the rest of the tree is still read. Only input that is not a JSON
//! object fails.

mod expr;
mod lenient;
mod tokens;

use serde::Deserialize;

use crate::errors::{AbiResult, ErrorExt};

pub use self::expr::{
    Arm, Block, Expr, ExprCall, ExprMacro, ExprMatch, ExprMethodCall, ExprStruct, FieldValue,
    Lit, Local, Macro, Pat, Stmt,
};
pub use self::tokens::TokenTree;

/// Parse a syntax tree document
pub fn parse_tree(json: &str) -> AbiResult<File> {
    serde_json::from_str(json).with_simple_context("tree_loader", "parse_tree")
}

/// Identifier node, `{"to_string": "name"}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ident {
    #[serde(rename = "to_string", default, deserialize_with = "lenient::node")]
    pub name: String,
}

impl Ident {
    /// The identifier text, or `None` when the node is malformed
    pub fn as_str(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}

/// Root of a parsed source unit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct File {
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub items: Vec<Item>,
}

/// Top-level item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum Item {
    #[serde(rename = "ItemUse")]
    Use(ItemUse),
    #[serde(rename = "ItemStruct")]
    Struct(ItemStruct),
    #[serde(rename = "ItemEnum")]
    Enum(ItemEnum),
    #[serde(rename = "ItemImpl")]
    Impl(ItemImpl),
    #[serde(rename = "ItemFn")]
    Fn(ItemFn),
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemUse {
    #[serde(default, deserialize_with = "lenient::node")]
    pub tree: UseTree,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum UseTree {
    #[serde(rename = "UsePath")]
    Path {
        #[serde(default, deserialize_with = "lenient::node")]
        ident: Ident,
        #[serde(default, deserialize_with = "lenient::node")]
        tree: Box<UseTree>,
    },
    #[serde(rename = "UseName")]
    Name {
        #[serde(default, deserialize_with = "lenient::node")]
        ident: Ident,
    },
    #[serde(rename = "UseRename")]
    Rename {
        #[serde(default, deserialize_with = "lenient::node")]
        ident: Ident,
        #[serde(default, deserialize_with = "lenient::node")]
        rename: Ident,
    },
    #[serde(rename = "UseGlob")]
    Glob,
    #[serde(rename = "UseGroup")]
    Group {
        #[serde(default, deserialize_with = "lenient::nodes")]
        items: Vec<UseTree>,
    },
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type")]
pub enum Visibility {
    #[serde(rename = "VisPublic")]
    Public,
    #[serde(rename = "VisCrate")]
    Crate,
    #[serde(rename = "VisRestricted")]
    Restricted,
    #[default]
    #[serde(rename = "VisInherited")]
    Inherited,
    #[serde(other)]
    Other,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemStruct {
    #[serde(default, deserialize_with = "lenient::node")]
    pub vis: Visibility,
    #[serde(default, deserialize_with = "lenient::node")]
    pub ident: Ident,
    #[serde(default, deserialize_with = "lenient::node")]
    pub fields: Fields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum Fields {
    #[serde(rename = "FieldsNamed")]
    Named {
        #[serde(default, deserialize_with = "lenient::nodes")]
        named: Vec<Field>,
    },
    #[serde(rename = "FieldsUnnamed")]
    Unnamed {
        #[serde(default, deserialize_with = "lenient::nodes")]
        unnamed: Vec<Field>,
    },
    #[default]
    #[serde(rename = "FieldsUnit", alias = "Unit")]
    Unit,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Field {
    #[serde(default, deserialize_with = "lenient::node")]
    pub vis: Visibility,
    #[serde(default, deserialize_with = "lenient::node")]
    pub ident: Option<Ident>,
    #[serde(default, deserialize_with = "lenient::node")]
    pub ty: Type,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemEnum {
    #[serde(default, deserialize_with = "lenient::node")]
    pub vis: Visibility,
    #[serde(default, deserialize_with = "lenient::node")]
    pub ident: Ident,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub variants: Vec<VariantNode>,
}

/// Entry of an enum body. Only `Variant` nodes take part in opcode numbering.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum VariantNode {
    Variant(Variant),
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Variant {
    #[serde(default, deserialize_with = "lenient::node")]
    pub ident: Ident,
    #[serde(default, deserialize_with = "lenient::node")]
    pub fields: Fields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemImpl {
    #[serde(default, deserialize_with = "lenient::node")]
    pub self_ty: Type,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub items: Vec<ImplItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum ImplItem {
    #[serde(rename = "ImplItemMethod", alias = "ImplItemFn")]
    Method(ImplItemMethod),
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImplItemMethod {
    #[serde(default, deserialize_with = "lenient::node")]
    pub sig: Signature,
    #[serde(default, deserialize_with = "lenient::node")]
    pub block: Block,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemFn {
    #[serde(default, deserialize_with = "lenient::node")]
    pub vis: Visibility,
    #[serde(default, deserialize_with = "lenient::node")]
    pub sig: Signature,
    #[serde(default, deserialize_with = "lenient::node")]
    pub block: Block,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Signature {
    #[serde(default, deserialize_with = "lenient::node")]
    pub ident: Ident,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub inputs: Vec<FnArg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum FnArg {
    #[serde(rename = "PatType", alias = "Typed")]
    Typed {
        #[serde(default, deserialize_with = "lenient::node")]
        pat: Box<Pat>,
        #[serde(default, deserialize_with = "lenient::node")]
        ty: Type,
    },
    Receiver,
    #[default]
    #[serde(other)]
    Other,
}

/// Type reference
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum Type {
    #[serde(rename = "TypePath")]
    Path {
        #[serde(default, deserialize_with = "lenient::node")]
        path: Path,
    },
    #[serde(rename = "TypeArray")]
    Array {
        #[serde(default, deserialize_with = "lenient::node")]
        elem: Box<Type>,
        #[serde(default, deserialize_with = "lenient::node")]
        len: Box<Expr>,
    },
    #[serde(rename = "TypeReference")]
    Reference {
        #[serde(default, deserialize_with = "lenient::node")]
        elem: Box<Type>,
    },
    #[serde(rename = "TypeParen")]
    Paren {
        #[serde(default, deserialize_with = "lenient::node")]
        elem: Box<Type>,
    },
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Path {
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// Segment identifiers in order, malformed segments skipped
    pub fn idents(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| segment.ident.as_str())
    }

    /// Last segment identifier
    pub fn leaf(&self) -> Option<&str> {
        self.idents().last()
    }

    /// `a::b::C` rendering of the path, `None` when no segment is readable
    pub fn joined(&self) -> Option<String> {
        let joined = self.idents().collect::<Vec<_>>().join("::");
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Last segment that starts with an upper-case letter, i.e. the type-like name
    pub fn type_name(&self) -> Option<&str> {
        self.idents()
            .filter(|ident| ident.chars().next().map_or(false, char::is_uppercase))
            .last()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathSegment {
    #[serde(default, deserialize_with = "lenient::node")]
    pub ident: Ident,
    #[serde(default, deserialize_with = "lenient::node")]
    pub arguments: PathArguments,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "_type")]
pub enum PathArguments {
    #[serde(rename = "AngleBracketedGenericArguments")]
    AngleBracketed {
        #[serde(default, deserialize_with = "lenient::nodes")]
        args: Vec<Type>,
    },
    #[serde(rename = "ParenthesizedGenericArguments")]
    Parenthesized,
    #[default]
    None,
    #[serde(other)]
    Other,
}
