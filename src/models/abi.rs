//! Persisted ABI document

use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::analyzer::{InstructionSource, ProgramAnalysis};
use crate::models::instruction::InstructionAbi;
use crate::models::program::ImportFlags;
use crate::utils::hash::fingerprint;

/// Instruction ABI of a Solana program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiDocument {
    /// Program name
    pub name: String,
    /// Document version
    pub version: String,
    /// Program instructions, ordered by opcode
    pub instructions: Vec<InstructionAbi>,
    /// Document metadata
    pub metadata: Metadata,
}

/// Document metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Where the opcodes came from (enum, legacy, unknown)
    pub origin: String,
    /// Name of the instruction enum, if one was selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_enum: Option<String>,
    /// SHA-256 of the instruction list
    pub fingerprint: String,
    /// Import flags of the last analyzed source unit
    #[serde(default)]
    pub imports: ImportFlags,
}

impl AbiDocument {
    /// Create an empty document
    pub fn new(name: String) -> Self {
        let mut document = Self {
            name,
            version: "0.1.0".to_string(),
            instructions: Vec::new(),
            metadata: Metadata {
                origin: "unknown".to_string(),
                ..Metadata::default()
            },
        };
        document.refresh_fingerprint();
        document
    }

    /// Build a document from one analysis run
    pub fn from_analysis(name: String, analysis: &ProgramAnalysis) -> Self {
        let mut document = Self::new(name);
        for instruction in &analysis.instructions {
            document.add_instruction(instruction.clone());
        }

        document.metadata.origin = analysis.source.origin().to_string();
        if let InstructionSource::Enum { name, .. } = &analysis.source {
            document.metadata.instruction_enum = Some(name.clone());
        }
        document.metadata.imports = analysis.imports.clone();
        document.refresh_fingerprint();
        document
    }

    /// Add an instruction, replacing the one with the same code.
    ///
    /// Stored accounts survive when the incoming record has none.
    pub fn add_instruction(&mut self, mut instruction: InstructionAbi) {
        match self.instructions.iter_mut().find(|i| i.code == instruction.code) {
            Some(existing) => {
                if instruction.accounts.is_none() && existing.accounts.is_some() {
                    debug!("Keeping stored accounts for instruction {}", existing.name);
                    instruction.accounts = existing.accounts.take();
                }
                *existing = instruction;
            }
            None => {
                self.instructions.push(instruction);
                self.instructions.sort_by_key(|i| i.code);
            }
        }
    }

    /// Merge a freshly extracted document into this persisted one
    pub fn merge(&mut self, incoming: AbiDocument) {
        let previous = self.metadata.fingerprint.clone();

        for instruction in incoming.instructions {
            self.add_instruction(instruction);
        }

        if incoming.metadata.origin != "unknown" {
            self.metadata.origin = incoming.metadata.origin;
        }
        if incoming.metadata.instruction_enum.is_some() {
            self.metadata.instruction_enum = incoming.metadata.instruction_enum;
        }
        self.metadata.imports = incoming.metadata.imports;
        self.refresh_fingerprint();

        if previous == self.metadata.fingerprint {
            info!("ABI for {} is unchanged", self.name);
        } else {
            info!("ABI for {} updated ({} instructions)", self.name, self.instructions.len());
        }
    }

    /// Recompute the fingerprint from the instruction list
    pub fn refresh_fingerprint(&mut self) {
        let canonical = serde_json::to_vec(&self.instructions).unwrap_or_default();
        self.metadata.fingerprint = fingerprint(&canonical);
    }
}
