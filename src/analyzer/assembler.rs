//! Final ABI assembly

use log::{debug, warn};

use crate::analyzer::type_path::canonical_name;
use crate::constants::solana::GENERIC_INSTRUCTION_PREFIX;
use crate::models::instruction::InstructionAbi;
use crate::models::program::{
    BuilderFunction, EnumDef, EnumVariant, LegacyOpcodeEntry, StructCatalog,
};

/// Join the instruction enum with the struct catalog and builder functions.
///
/// One record per variant, in declaration order.
pub fn assemble_from_enum(
    instruction_enum: &EnumDef,
    catalog: &StructCatalog,
    builders: &[BuilderFunction],
) -> Vec<InstructionAbi> {
    instruction_enum
        .variants
        .iter()
        .map(|variant| {
            let mut instruction = InstructionAbi::new(variant.code, variant.name.clone());
            for (name, ty) in variant_inputs(variant, catalog) {
                instruction.add_input(name, ty);
            }

            // First builder producing Enum::Variant supplies the accounts
            let builder = builders
                .iter()
                .find(|builder| builder.produces(&instruction_enum.name, &variant.name));
            match builder {
                Some(builder) => {
                    debug!("{}::{} is built by {}", instruction_enum.name, variant.name, builder.name);
                    instruction.accounts = builder.accounts.clone();
                }
                None => debug!("No builder function for {}::{}", instruction_enum.name, variant.name),
            }

            instruction
        })
        .collect()
}

/// Join a legacy opcode mapping with the struct catalog and builder functions.
///
/// Entries whose literal is not an integer are dropped.
pub fn assemble_from_legacy(
    entries: &[LegacyOpcodeEntry],
    catalog: &StructCatalog,
    builders: &[BuilderFunction],
) -> Vec<InstructionAbi> {
    entries
        .iter()
        .filter_map(|entry| {
            let Some(code) = entry.numeric_code() else {
                warn!("Dispatch literal {} is not an integer, skipping", entry.code);
                return None;
            };
            let name = entry
                .payload_struct_name
                .clone()
                .unwrap_or_else(|| format!("{}{}", GENERIC_INSTRUCTION_PREFIX, code));

            let mut instruction = InstructionAbi::new(code, name);
            if let Some(payload) = &entry.payload_struct_name {
                for (field_name, ty) in struct_inputs(payload, catalog) {
                    instruction.add_input(field_name, ty);
                }
                instruction.accounts = builders
                    .iter()
                    .find(|builder| builder.produces_leaf(payload))
                    .and_then(|builder| builder.accounts.clone());
            }

            Some(instruction)
        })
        .collect()
}

fn variant_inputs(variant: &EnumVariant, catalog: &StructCatalog) -> Vec<(String, Option<String>)> {
    if let Some(payload) = &variant.payload_struct_name {
        return struct_inputs(payload, catalog);
    }
    variant
        .inline_fields
        .iter()
        .flatten()
        .map(|field| (field.name.clone(), canonical_name(&field.ty)))
        .collect()
}

fn struct_inputs(payload: &str, catalog: &StructCatalog) -> Vec<(String, Option<String>)> {
    match catalog.get(payload) {
        Some(def) => def
            .fields
            .iter()
            .map(|field| (field.name.clone(), canonical_name(&field.ty)))
            .collect(),
        None => {
            debug!("Payload {} is not a struct of this source unit", payload);
            Vec::new()
        }
    }
}
