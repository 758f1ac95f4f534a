//! A library for recovering the instruction ABI of Solana programs
//!
//! The input is the syntax tree of a native program's instruction module, as
//! produced by an external syn-based parser. The analyzer finds the
//! instruction enum (or a legacy `unpack` byte dispatch), the payload structs
//! and the client-side builder functions, and joins them into an ordered list
//! of instructions with opcodes, typed inputs and account roles.

pub mod analyzer;
pub mod ast;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod models;
pub mod utils;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

pub use crate::analyzer::{Analyzer, ProgramAnalysis};
pub use crate::models::AbiDocument;

/// Analyze an already parsed source unit
pub fn analyze_tree(tree: &ast::File) -> ProgramAnalysis {
    Analyzer::new().analyze(tree)
}

/// Parse and analyze a syntax tree document
pub fn analyze_json(json: &str) -> errors::AbiResult<ProgramAnalysis> {
    let tree = ast::parse_tree(json)?;
    Ok(analyze_tree(&tree))
}

/// Main entry point: build the ABI document of a syntax tree file.
///
/// When `output_path` is given, the document is merged into the one already
/// stored there (if any) and saved.
pub fn extract_abi(tree_path: &Path, name: &str, output_path: Option<&Path>) -> Result<AbiDocument> {
    info!("Reading syntax tree from {}", tree_path.display());
    let json = fs::read_to_string(tree_path)
        .with_context(|| format!("Failed to read syntax tree: {}", tree_path.display()))?;

    let analysis = analyze_json(&json)?;
    let mut document = AbiDocument::from_analysis(name.to_string(), &analysis);

    if let Some(path) = output_path {
        if let Some(mut stored) = generator::load_abi(path)? {
            stored.merge(document);
            document = stored;
        }
        generator::save_abi(&document, path)?;
    }

    Ok(document)
}

/// Version of the ABI extractor
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
