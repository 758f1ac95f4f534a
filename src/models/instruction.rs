//! Instruction ABI records

use serde::{Serialize, Deserialize};

use crate::models::program::AccountRole;

/// One callable instruction of the analyzed program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionAbi {
    /// Opcode
    pub code: u64,
    /// Instruction name
    pub name: String,
    /// Payload fields in serialization order
    pub inputs: Vec<AbiField>,
    /// Account roles in transaction order, absent when no builder function was matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<AccountRole>>,
}

/// Typed payload field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiField {
    /// Field name
    pub name: String,
    /// Canonical scalar or type name, absent when unknown
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
}

impl InstructionAbi {
    /// Create an instruction with no inputs and unknown accounts
    pub fn new(code: u64, name: String) -> Self {
        Self {
            code,
            name,
            inputs: Vec::new(),
            accounts: None,
        }
    }

    /// Add an input field
    pub fn add_input(&mut self, name: String, ty: Option<String>) {
        self.inputs.push(AbiField { name, ty });
    }
}
