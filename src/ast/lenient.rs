//! Fail-soft field decoding for tree nodes
//!
//! A node field holding the wrong shape (`null` where a node is expected, an
//! object without `_type`, a number where a list is expected) decodes to the
//! field's default instead of rejecting the whole document. For node enums the
//! default is the unrecognised variant, so extractors skip it like any other
//! unknown node.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a single node field, defaulting when it is malformed
pub fn node<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_or_default(value))
}

/// Decode a node list element by element.
///
/// A malformed element keeps its position as a default node; a value that is
/// not a list at all gives an empty list.
pub fn nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(elements) => Ok(elements.into_iter().map(decode_or_default).collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            debug!("Expected a node list, found {}", other);
            Ok(Vec::new())
        }
    }
}

fn decode_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_value(value) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Malformed tree node, treating it as unrecognised: {}", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Fields, Ident, Item, Visibility};
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "node")]
        vis: Visibility,
        #[serde(default, deserialize_with = "node")]
        fields: Fields,
        #[serde(default, deserialize_with = "nodes")]
        items: Vec<Item>,
        #[serde(default, deserialize_with = "node")]
        ident: Option<Ident>,
    }

    #[test]
    fn test_malformed_fields_fall_back_to_defaults() {
        let holder: Holder = serde_json::from_value(json!({
            "vis": {},
            "fields": null,
            "items": [{ "no_tag": true }, { "_type": "ItemEnum", "ident": { "to_string": "Op" } }],
            "ident": 42
        }))
        .unwrap();

        assert_eq!(holder.vis, Visibility::Inherited);
        assert!(matches!(holder.fields, Fields::Unit));
        assert!(matches!(holder.items[0], Item::Other));
        assert!(matches!(holder.items[1], Item::Enum(_)));
        assert!(holder.ident.is_none());
    }

    #[test]
    fn test_non_list_becomes_empty() {
        let holder: Holder = serde_json::from_value(json!({ "items": 7 })).unwrap();
        assert!(holder.items.is_empty());
    }
}
