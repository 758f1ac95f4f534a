//! Data models for the recovered instruction ABI

pub mod abi;
pub mod instruction;
pub mod program;
#[cfg(test)]
mod tests;

pub use self::abi::AbiDocument;
pub use self::instruction::{AbiField, InstructionAbi};
pub use self::program::{
    AccountRole, BuilderFunction, EnumDef, EnumVariant, FieldDef, ImportFlags, InlineField,
    LegacyOpcodeEntry, StructCatalog, StructDef, TypePath,
};
