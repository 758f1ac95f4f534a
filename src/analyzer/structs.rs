//! Struct catalog construction

use log::debug;

use crate::analyzer::type_path::normalize;
use crate::ast::{Fields, ItemStruct};
use crate::models::program::{FieldDef, StructDef};

/// Capture a struct definition. Unnamed (tuple) fields are skipped.
pub fn extract_struct(item: &ItemStruct) -> Option<StructDef> {
    let name = item.ident.as_str()?;

    let fields = match &item.fields {
        Fields::Named { named } => named
            .iter()
            .filter_map(|field| {
                let field_name = field.ident.as_ref()?.as_str()?;
                Some(FieldDef {
                    name: field_name.to_string(),
                    is_public: field.vis.is_public(),
                    ty: normalize(&field.ty),
                })
            })
            .collect(),
        Fields::Unnamed { .. } => {
            debug!("Struct {} has tuple fields, skipping them", name);
            Vec::new()
        }
        Fields::Unit | Fields::Other => Vec::new(),
    };

    Some(StructDef {
        name: name.to_string(),
        is_public: item.vis.is_public(),
        fields,
    })
}
