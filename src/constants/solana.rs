//! Names of the Solana program idioms the extractors look for

/// Import paths whose presence is reported by the import scanner
pub const INSTRUCTION_PATH: &str = "solana_program::instruction::Instruction";
pub const ACCOUNT_META_PATH: &str = "solana_program::instruction::AccountMeta";
pub const PROGRAM_ERROR_PATH: &str = "solana_program::program_error::ProgramError";
pub const PUBKEY_PATH: &str = "solana_program::pubkey::Pubkey";

/// Substring identifying the instruction enum and `Instruction { .. }` constructions
pub const INSTRUCTION_NAME_HINT: &str = "Instruction";

/// Local binding holding the serialized instruction payload
pub const DATA_BINDING: &str = "data";
/// Local binding (or struct field) holding the account list
pub const ACCOUNTS_BINDING: &str = "accounts";

/// Account role constructor and its writable / readonly associated functions
pub const ACCOUNT_META_IDENT: &str = "AccountMeta";
pub const WRITABLE_CONSTRUCTOR: &str = "new";
pub const READONLY_CONSTRUCTOR: &str = "new_readonly";

/// Macro building the account vector
pub const VEC_MACRO: &str = "vec";

/// Legacy byte-dispatch decode routine
pub const UNPACK_METHOD: &str = "unpack";
/// Success wrapper around the dispatch `match`
pub const SUCCESS_WRAPPER: &str = "Ok";

/// Methods that unwrap a fallible payload serialization
pub const UNWRAP_METHODS: &[&str] = &["unwrap", "expect"];

/// Prefix of `Instruction::new_with_borsh` / `new_with_bytes` / `new_with_bincode`
pub const INSTRUCTION_BUILDER_PREFIX: &str = "new_with_";

/// Generic name given to legacy opcodes whose payload could not be named
pub const GENERIC_INSTRUCTION_PREFIX: &str = "instruction_";
