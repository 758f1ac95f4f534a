//! Core analysis engine: recovers the instruction ABI from a parsed source unit

mod accounts;
mod assembler;
mod builder;
mod enums;
mod imports;
mod legacy;
mod structs;
pub mod type_path;

use log::{debug, info};
use serde::Serialize;

use crate::ast::{File, Item};
use crate::models::instruction::InstructionAbi;
use crate::models::program::{BuilderFunction, EnumDef, ImportFlags, LegacyOpcodeEntry, StructCatalog};

pub use self::enums::EnumSelection;

/// Where the opcode list of the analysis came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InstructionSource {
    /// Variants of the selected instruction enum
    Enum { name: String, selection: EnumSelection },
    /// Literal arms of an `unpack` byte dispatch
    Legacy,
    /// Neither convention found, the instruction list is empty
    Unknown,
}

impl InstructionSource {
    pub fn origin(&self) -> &'static str {
        match self {
            InstructionSource::Enum { .. } => "enum",
            InstructionSource::Legacy => "legacy",
            InstructionSource::Unknown => "unknown",
        }
    }
}

/// Result of one analysis run: the ABI plus the raw collections it was built from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramAnalysis {
    /// Assembled instruction ABI, in opcode order
    pub instructions: Vec<InstructionAbi>,
    /// Convention the opcodes were taken from
    pub source: InstructionSource,
    /// Struct definitions by name
    pub structs: StructCatalog,
    /// Every enum of the source unit
    pub enums: Vec<EnumDef>,
    /// Legacy dispatch mapping, empty when no `unpack` routine exists
    pub legacy_opcodes: Vec<LegacyOpcodeEntry>,
    /// Every free function with what could be recovered from it
    pub builders: Vec<BuilderFunction>,
    /// Import presence flags
    pub imports: ImportFlags,
    /// Notes about ambiguous or incomplete results
    pub diagnostics: Vec<String>,
}

/// Main analyzer that runs the extractors and the assembler
pub struct Analyzer;

impl Analyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Analyze a source unit.
    ///
    /// Never fails: unrecognised shapes are skipped and show up as missing data.
    pub fn analyze(&self, file: &File) -> ProgramAnalysis {
        let mut scanner = imports::ImportScanner::new();
        let mut catalog = StructCatalog::new();
        let mut enum_defs = Vec::new();
        let mut legacy_opcodes: Option<Vec<LegacyOpcodeEntry>> = None;
        let mut builders = Vec::new();

        // Dispatch each top-level item to its extractor
        for item in &file.items {
            match item {
                Item::Use(item_use) => scanner.record(&item_use.tree),
                Item::Struct(item_struct) => {
                    if let Some(def) = structs::extract_struct(item_struct) {
                        catalog.insert(def);
                    }
                }
                Item::Enum(item_enum) => enum_defs.extend(enums::extract_enum(item_enum)),
                Item::Impl(item_impl) => {
                    if legacy_opcodes.as_ref().map_or(true, Vec::is_empty) {
                        legacy_opcodes = legacy::extract_dispatch(item_impl);
                    }
                }
                Item::Fn(item_fn) => builders.extend(builder::analyze_function(item_fn)),
                Item::Other => debug!("Skipping unrecognised top-level item"),
            }
        }

        let legacy_opcodes = legacy_opcodes.unwrap_or_default();
        let mut diagnostics = Vec::new();

        for name in catalog.duplicates() {
            diagnostics.push(format!("struct {} is defined more than once, the last definition is used", name));
        }

        // Enum convention first, legacy dispatch otherwise
        let (instructions, source) = match enums::select_instruction_enum(&enum_defs) {
            Some((instruction_enum, selection)) => {
                if selection == EnumSelection::FirstDeclared {
                    diagnostics.push(format!(
                        "no enum is named like an instruction enum, used the first declared: {}",
                        instruction_enum.name
                    ));
                }
                (
                    assembler::assemble_from_enum(instruction_enum, &catalog, &builders),
                    InstructionSource::Enum {
                        name: instruction_enum.name.clone(),
                        selection,
                    },
                )
            }
            None if !legacy_opcodes.is_empty() => (
                assembler::assemble_from_legacy(&legacy_opcodes, &catalog, &builders),
                InstructionSource::Legacy,
            ),
            None => {
                diagnostics.push("no instruction enum or unpack dispatch found".to_string());
                (Vec::new(), InstructionSource::Unknown)
            }
        };

        // Instructions no builder function produced
        let unmatched = instructions.iter().filter(|i| i.accounts.is_none()).count();
        if unmatched > 0 {
            diagnostics.push(format!("{} instructions have no matching builder function", unmatched));
        }

        info!(
            "Recovered {} instructions ({}) from {} structs, {} enums, {} functions",
            instructions.len(),
            source.origin(),
            catalog.len(),
            enum_defs.len(),
            builders.len()
        );

        ProgramAnalysis {
            instructions,
            source,
            structs: catalog,
            enums: enum_defs,
            legacy_opcodes,
            builders,
            imports: scanner.finish(),
            diagnostics,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
