//! `use` tree scanning

use crate::ast::UseTree;
use crate::constants::solana::{ACCOUNT_META_PATH, INSTRUCTION_PATH, PROGRAM_ERROR_PATH, PUBKEY_PATH};
use crate::models::program::ImportFlags;

/// Collects joined import paths in first-seen order
#[derive(Debug, Default)]
pub struct ImportScanner {
    paths: Vec<String>,
}

impl ImportScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every path reachable from a `use` tree
    pub fn record(&mut self, tree: &UseTree) {
        self.walk(tree, Vec::new());
    }

    fn walk(&mut self, tree: &UseTree, mut prefix: Vec<String>) {
        match tree {
            UseTree::Path { ident, tree } => {
                prefix.extend(ident.as_str().map(str::to_string));
                self.walk(tree, prefix);
            }
            UseTree::Group { items } => {
                for item in items {
                    self.walk(item, prefix.clone());
                }
            }
            UseTree::Name { ident } | UseTree::Rename { ident, .. } => {
                prefix.extend(ident.as_str().map(str::to_string));
                self.push(prefix);
            }
            UseTree::Glob | UseTree::Other => self.push(prefix),
        }
    }

    fn push(&mut self, segments: Vec<String>) {
        if segments.len() < 2 {
            return;
        }
        let path = segments.join("::");
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Final flags
    pub fn finish(self) -> ImportFlags {
        let has = |wanted: &str| self.paths.iter().any(|path| path == wanted);
        ImportFlags {
            has_instruction: has(INSTRUCTION_PATH),
            has_account_meta: has(ACCOUNT_META_PATH),
            has_program_error: has(PROGRAM_ERROR_PATH),
            has_pubkey: has(PUBKEY_PATH),
            paths: self.paths.clone(),
        }
    }
}
