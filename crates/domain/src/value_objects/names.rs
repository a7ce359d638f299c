//! Display name newtype for imported characters
//!
//! Unlike a validated name, a display name never rejects input: blank or
//! missing names fall back to a placeholder so that every record still
//! produces an entity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a record carries no usable name.
pub const UNNAMED_CHARACTER: &str = "Unnamed Character";

// ============================================================================
// DisplayName
// ============================================================================

/// A trimmed, never-empty display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Build a display name from raw input, substituting [`UNNAMED_CHARACTER`]
    /// when the trimmed input is empty or absent.
    pub fn from_raw(raw: Option<&str>) -> Self {
        Self::from_raw_or(raw, UNNAMED_CHARACTER)
    }

    /// Same as [`DisplayName::from_raw`] with a caller-chosen placeholder.
    ///
    /// A blank placeholder falls back to [`UNNAMED_CHARACTER`].
    pub fn from_raw_or(raw: Option<&str>, placeholder: &str) -> Self {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if !trimmed.is_empty() {
            return Self(trimmed.to_string());
        }
        let placeholder = placeholder.trim();
        if placeholder.is_empty() {
            Self(UNNAMED_CHARACTER.to_string())
        } else {
            Self(placeholder.to_string())
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DisplayName {
    fn from(s: String) -> Self {
        Self::from_raw(Some(&s))
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> String {
        name.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
