//! Instruction enum extraction

use log::{debug, info, warn};
use serde::Serialize;

use crate::analyzer::type_path::normalize;
use crate::ast::{Fields, ItemEnum, VariantNode};
use crate::constants::solana::INSTRUCTION_NAME_HINT;
use crate::models::program::{EnumDef, EnumVariant, InlineField};

/// Why an enum was taken as the instruction enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumSelection {
    /// The only enum of the source unit
    Sole,
    /// First enum whose name contains `Instruction`
    NameHint,
    /// Several enums, none named like an instruction enum: the first declared one
    FirstDeclared,
}

/// Extract an enum, numbering its variants by declaration position.
///
/// Entries that are not `Variant` nodes, or variants without a name, do not
/// consume an opcode.
pub fn extract_enum(item: &ItemEnum) -> Option<EnumDef> {
    let name = item.ident.as_str()?;
    let mut variants = Vec::new();

    for node in &item.variants {
        let variant = match node {
            VariantNode::Variant(variant) => variant,
            VariantNode::Other => {
                debug!("Skipping unrecognised entry in enum {}", name);
                continue;
            }
        };
        let Some(variant_name) = variant.ident.as_str() else {
            debug!("Skipping unnamed variant in enum {}", name);
            continue;
        };

        let (payload_struct_name, inline_fields) = match &variant.fields {
            Fields::Unnamed { unnamed } if unnamed.len() == 1 => {
                (normalize(&unnamed[0].ty).leading().map(str::to_string), None)
            }
            Fields::Named { named } => {
                let fields = named
                    .iter()
                    .filter_map(|field| {
                        Some(InlineField {
                            name: field.ident.as_ref()?.as_str()?.to_string(),
                            ty: normalize(&field.ty),
                        })
                    })
                    .collect();
                (None, Some(fields))
            }
            _ => (None, None),
        };

        variants.push(EnumVariant {
            code: variants.len() as u64,
            name: variant_name.to_string(),
            payload_struct_name,
            inline_fields,
        });
    }

    Some(EnumDef {
        name: name.to_string(),
        is_public: item.vis.is_public(),
        variants,
    })
}

/// Pick the instruction enum among all enums of a source unit
pub fn select_instruction_enum(enums: &[EnumDef]) -> Option<(&EnumDef, EnumSelection)> {
    match enums {
        [] => None,
        [only] => Some((only, EnumSelection::Sole)),
        _ => {
            if let Some(hinted) = enums.iter().find(|e| e.name.contains(INSTRUCTION_NAME_HINT)) {
                info!("Selected {} as the instruction enum", hinted.name);
                return Some((hinted, EnumSelection::NameHint));
            }
            let first = &enums[0];
            warn!(
                "{} enums and none named like an instruction enum, falling back to the first declared: {}",
                enums.len(),
                first.name
            );
            Some((first, EnumSelection::FirstDeclared))
        }
    }
}
