//! External collaborator ports (file sources, input documents, notifications).

use async_trait::async_trait;

use super::error::SourceError;

// =============================================================================
// File Sources
// =============================================================================

/// Existence checks against a fixed, fetchable asset root.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetProbe: Send + Sync {
    /// Whether `path` exists. Failures to check count as "does not exist".
    async fn probe_exists(&self, path: &str) -> bool;
}

/// Every file below a browsed folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseResult {
    /// The folder that was browsed, as the host names it
    pub root: String,
    /// File paths, `/`-separated, including subdirectories
    pub files: Vec<String>,
}

/// Listing of an interactively chosen folder.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FolderBrowser: Send + Sync {
    async fn browse(&self, root: &str) -> Result<BrowseResult, SourceError>;
}

// =============================================================================
// Input Documents
// =============================================================================

/// Raw text of a characters document plus a label for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    pub label: String,
    pub text: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn read_text(&self) -> Result<InputDocument, SourceError>;
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// Fire-and-forget user-facing messages. Never used for control flow.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationPort: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

impl<'a> dyn NotificationPort + 'a {
    pub fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.notify(NoticeLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}
