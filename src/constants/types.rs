//! Type normalisation tables

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Generic wrappers stripped from a field type before naming it
pub const WRAPPER_TYPES: &[&str] = &["Vec", "Option", "Box", "COption"];

/// Type suffixes allowed on an integer literal
pub const INTEGER_SUFFIXES: &[&str] = &[
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
];

/// Platform integer wrappers and the primitive they stand for
pub static TYPE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut aliases = HashMap::new();

    aliases.insert("NonZeroU8", "u8");
    aliases.insert("NonZeroU16", "u16");
    aliases.insert("NonZeroU32", "u32");
    aliases.insert("NonZeroU64", "u64");
    aliases.insert("NonZeroU128", "u128");
    aliases.insert("NonZeroUsize", "usize");

    aliases.insert("NonZeroI8", "i8");
    aliases.insert("NonZeroI16", "i16");
    aliases.insert("NonZeroI32", "i32");
    aliases.insert("NonZeroI64", "i64");
    aliases.insert("NonZeroI128", "i128");
    aliases.insert("NonZeroIsize", "isize");

    aliases
});

/// Resolve an alias to its canonical scalar name
pub fn resolve_alias(name: &str) -> &str {
    TYPE_ALIASES.get(name).copied().unwrap_or(name)
}
