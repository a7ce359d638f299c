//! Error types for port operations.

/// Entity store errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Store operation failed - includes operation name for tracing.
    #[error("Store error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Some entities of a batch were written before a later one failed.
    ///
    /// Entities already written stay written; nothing is rolled back.
    #[error("Batch {operation} failed after {written} entities were written: {message}")]
    PartialBatch {
        operation: &'static str,
        written: usize,
        message: String,
    },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a PartialBatch error.
    pub fn partial_batch(operation: &'static str, written: usize, message: impl ToString) -> Self {
        Self::PartialBatch {
            operation,
            written,
            message: message.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from file sources (input documents, folder browsing).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl SourceError {
    pub fn io(path: impl ToString, err: impl ToString) -> Self {
        Self::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
