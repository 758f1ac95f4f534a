//! ABI document persistence

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error, info};

use crate::errors::{self, AbiResult, ErrorContext};
use crate::models::abi::AbiDocument;

/// Save the ABI document to a file
pub fn save_abi(document: &AbiDocument, path: &Path) -> Result<()> {
    // Resolve the output path against the working directory
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    info!("Saving ABI to absolute path: {}", absolute_path.display());

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        if !parent.exists() {
            info!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    // Serialize ABI to JSON
    let json = to_json(document)?;

    // Write to file
    let mut file = File::create(&absolute_path).map_err(|e| {
        error!("Failed to create file: {} - Error: {}", absolute_path.display(), e);
        anyhow::anyhow!("Failed to create file: {} - Error: {}", absolute_path.display(), e)
    })?;

    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", absolute_path.display()))?;

    info!("Wrote {} bytes to {}", json.len(), absolute_path.display());
    Ok(())
}

/// Load a previously saved ABI document, `None` when the file does not exist
pub fn load_abi(path: &Path) -> Result<Option<AbiDocument>> {
    if !path.exists() {
        debug!("No stored ABI at {}", path.display());
        return Ok(None);
    }

    let document = read_document(path)?;
    debug!("Loaded stored ABI with {} instructions", document.instructions.len());
    Ok(Some(document))
}

fn read_document(path: &Path) -> AbiResult<AbiDocument> {
    let json = fs::read_to_string(path)?;

    // A stored document that no longer parses is reported, never overwritten
    errors::ErrorExt::with_context(
        serde_json::from_str::<AbiDocument>(&json),
        ErrorContext {
            component: "abi_generator".to_string(),
            operation: "load_abi".to_string(),
            details: Some(path.display().to_string()),
        },
    )
}

/// Render the ABI document as pretty JSON
pub fn to_json(document: &AbiDocument) -> AbiResult<String> {
    errors::ErrorExt::with_simple_context(
        serde_json::to_string_pretty(document),
        "abi_generator",
        "serialize_abi",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AbiError;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("abi.json");
        let document = AbiDocument::new("vault".to_string());

        save_abi(&document, &path).unwrap();
        let loaded = load_abi(&path).unwrap().unwrap();

        assert_eq!(loaded.name, "vault");
        assert_eq!(loaded.metadata.fingerprint, document.metadata.fingerprint);
    }

    #[test]
    fn test_missing_document_is_none() {
        let dir = tempdir().unwrap();
        assert!(load_abi(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_document_is_an_abi_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abi.json");
        fs::write(&path, "{ \"name\": ").unwrap();

        let err = load_abi(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<AbiError>(), Some(AbiError::AbiDocument(_))));
    }

    #[test]
    fn test_unreadable_document_is_an_io_error() {
        let dir = tempdir().unwrap();

        // a directory exists but cannot be read as a file
        let err = load_abi(dir.path()).unwrap_err();
        assert!(matches!(err.downcast_ref::<AbiError>(), Some(AbiError::Io(_))));
    }
}
