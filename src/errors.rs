//! Error handling for the Solana ABI extractor.
//!
//! The analysis passes never fail: unrecognised shapes and lookup misses turn
//! into partial results. Errors only come from the boundaries around them,
//! namely decoding the syntax tree handed over by the external parser and
//! reading or writing persisted ABI documents.

use thiserror::Error;
use std::fmt;

/// Main error type for the ABI extractor.
#[derive(Error, Debug)]
pub enum AbiError {
    /// The syntax tree document could not be decoded into the node model.
    #[error("Syntax tree parse error: {0}")]
    TreeParse(String),

    /// Errors related to file I/O, such as file not found or permission denied.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing an ABI or analysis to JSON failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A persisted ABI document is unreadable or cannot be merged.
    #[error("ABI document error: {0}")]
    AbiDocument(String),
}

/// Result type alias for the ABI extractor.
pub type AbiResult<T> = Result<T, AbiError>;

/// Where an error happened.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Component where the error occurred (e.g., "tree_loader").
    pub component: String,

    /// Operation being performed when the error occurred (e.g., "parse_tree").
    pub operation: String,

    /// Additional details, such as the file being processed.
    pub details: Option<String>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "In {} while {}", self.component, self.operation)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorExt<T> {
    /// Add context to an error, classifying it into an [`AbiError`] category:
    /// `tree*` components are parse errors, `*serialize*` operations are
    /// serialization errors, the rest concern ABI documents.
    fn with_context(self, context: ErrorContext) -> AbiResult<T>;

    /// Add component and operation context to an error.
    fn with_simple_context(self, component: &str, operation: &str) -> AbiResult<T>;
}

impl<T, E: std::error::Error + 'static> ErrorExt<T> for Result<T, E> {
    fn with_context(self, context: ErrorContext) -> AbiResult<T> {
        self.map_err(|e| {
            let error_msg = format!("{}: {}", context, e);
            let component = context.component.to_lowercase();
            let operation = context.operation.to_lowercase();
            match (component.as_str(), operation.as_str()) {
                (c, _) if c.contains("tree") => AbiError::TreeParse(error_msg),
                (_, o) if o.contains("serialize") => AbiError::Serialization(error_msg),
                // anything else happens around a persisted document
                _ => AbiError::AbiDocument(error_msg),
            }
        })
    }

    fn with_simple_context(self, component: &str, operation: &str) -> AbiResult<T> {
        self.with_context(ErrorContext {
            component: component.to_string(),
            operation: operation.to_string(),
            details: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_component_maps_to_tree_parse() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{ not json");
        let err = result.with_simple_context("tree_loader", "parse_tree").unwrap_err();
        assert!(matches!(err, AbiError::TreeParse(_)));
        assert!(err.to_string().contains("In tree_loader while parse_tree"));
    }

    #[test]
    fn test_context_details_are_rendered() {
        let context = ErrorContext {
            component: "generator".to_string(),
            operation: "load_abi".to_string(),
            details: Some("abi.json".to_string()),
        };
        assert_eq!(context.to_string(), "In generator while load_abi (abi.json)");
    }

    #[test]
    fn test_generator_errors_are_classified() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("[1,");
        let err = parse.with_simple_context("abi_generator", "load_abi").unwrap_err();
        assert!(matches!(err, AbiError::AbiDocument(_)));

        let parse: Result<serde_json::Value, _> = serde_json::from_str("[1,");
        let err = parse.with_simple_context("abi_generator", "serialize_abi").unwrap_err();
        assert!(matches!(err, AbiError::Serialization(_)));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(AbiError::from(io), AbiError::Io(_)));
    }
}
