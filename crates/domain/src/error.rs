//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input could not be parsed (malformed JSON, wrong top-level shape, unknown level name)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a parse error for input that cannot be turned into domain types.
    ///
    /// Use this when a character source is not valid JSON or is not shaped
    /// like an array of characters.
    ///
    /// # Example
    /// ```ignore
    /// let Value::Array(items) = value else {
    ///     return Err(DomainError::parse("JSON is not an array of characters."));
    /// };
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
