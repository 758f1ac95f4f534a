//! Utility functions and helpers

pub mod hash;
