//! Constants used throughout the extractor

pub mod solana;
pub mod types;
