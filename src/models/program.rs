//! Program elements recovered from the source tree, before assembly

use std::collections::HashMap;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::types::INTEGER_SUFFIXES;

/// Flattened type reference, outer-to-inner identifier tokens.
///
/// Fixed-size arrays are a single `elem;len` token. An empty path means the
/// type could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypePath(pub Vec<String>);

impl TypePath {
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn leading(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("::"))
    }
}

/// Field of a struct definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    pub is_public: bool,
    #[serde(rename = "type")]
    pub ty: TypePath,
}

/// Struct definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDef {
    pub name: String,
    pub is_public: bool,
    pub fields: Vec<FieldDef>,
}

/// Name-indexed struct definitions, iterated in declaration order.
///
/// A repeated name overwrites the earlier definition in place and is reported
/// through [`StructCatalog::duplicates`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructCatalog {
    structs: Vec<StructDef>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    duplicates: Vec<String>,
}

impl StructCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a struct, replacing any earlier one of the same name
    pub fn insert(&mut self, def: StructDef) {
        match self.index.get(&def.name) {
            Some(&position) => {
                warn!("Struct {} is defined more than once, keeping the last definition", def.name);
                if !self.duplicates.contains(&def.name) {
                    self.duplicates.push(def.name.clone());
                }
                self.structs[position] = def;
            }
            None => {
                self.index.insert(def.name.clone(), self.structs.len());
                self.structs.push(def);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&StructDef> {
        self.index.get(name).map(|&position| &self.structs[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructDef> {
        self.structs.iter()
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Names that were declared more than once
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

/// Named field declared inline in an enum variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypePath,
}

/// Enum variant with its position-derived opcode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumVariant {
    pub code: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_struct_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_fields: Option<Vec<InlineField>>,
}

/// Enum definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    pub name: String,
    pub is_public: bool,
    pub variants: Vec<EnumVariant>,
}

/// Opcode taken from a literal match arm of a legacy `unpack` routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOpcodeEntry {
    /// Literal text of the arm pattern, verbatim
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_struct_name: Option<String>,
}

impl LegacyOpcodeEntry {
    /// Integer value of the literal.
    ///
    /// `0x`/`0o`/`0b` prefixes, `_` separators and integer type suffixes are
    /// accepted. Anything else (char or byte literals, unknown suffixes) is `None`.
    pub fn numeric_code(&self) -> Option<u64> {
        let cleaned: String = self.code.chars().filter(|c| *c != '_').collect();
        let (digits, radix) = match cleaned.get(..2) {
            Some("0x") | Some("0X") => (&cleaned[2..], 16),
            Some("0o") | Some("0O") => (&cleaned[2..], 8),
            Some("0b") | Some("0B") => (&cleaned[2..], 2),
            _ => (cleaned.as_str(), 10),
        };
        let end = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        let (value, suffix) = digits.split_at(end);
        if value.is_empty() || !(suffix.is_empty() || INTEGER_SUFFIXES.contains(&suffix)) {
            return None;
        }
        u64::from_str_radix(value, radix).ok()
    }
}

/// Account role assembled by a builder function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRole {
    /// Variable the key came from, absent for anonymous expressions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_writable: bool,
    pub is_signer: bool,
}

impl AccountRole {
    pub fn new(name: Option<String>, is_writable: bool, is_signer: bool) -> Self {
        Self { name, is_writable, is_signer }
    }

    /// Convert to solana_instruction::AccountMeta for a concrete key
    pub fn to_account_meta(&self, pubkey: &solana_pubkey::Pubkey) -> solana_instruction::AccountMeta {
        if self.is_writable {
            solana_instruction::AccountMeta::new(*pubkey, self.is_signer)
        } else {
            solana_instruction::AccountMeta::new_readonly(*pubkey, self.is_signer)
        }
    }
}

/// What a free function builds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderFunction {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces_instruction_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<AccountRole>>,
    /// Declared parameters with their flattened types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<InlineField>,
}

impl BuilderFunction {
    /// Whether the produced reference ends with `Enum::Variant`
    pub fn produces(&self, enum_name: &str, variant_name: &str) -> bool {
        let Some(reference) = &self.produces_instruction_ref else {
            return false;
        };
        let mut segments = reference.rsplit("::");
        segments.next() == Some(variant_name) && segments.next() == Some(enum_name)
    }

    /// Whether the last segment of the produced reference is `name`
    pub fn produces_leaf(&self, name: &str) -> bool {
        self.produces_instruction_ref
            .as_deref()
            .and_then(|reference| reference.rsplit("::").next())
            == Some(name)
    }
}

/// Import paths found in `use` items and the well-known ones among them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFlags {
    pub has_instruction: bool,
    pub has_account_meta: bool,
    pub has_program_error: bool,
    pub has_pubkey: bool,
    pub paths: Vec<String>,
}
