//! Common utility functions shared across the TomeBridge crates.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Total** - every function accepts any input without failing

pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use string::{
    encode_uri_component, names_match_exact, names_match_folded, none_if_empty, normalize_key,
    slugify, slugify_untrimmed, slugify_with, SLUG_SEPARATOR,
};
