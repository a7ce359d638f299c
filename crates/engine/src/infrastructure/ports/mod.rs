//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Entity storage (actors and folders live in the host)
//! - File sources (probe a fixed asset root, or browse a chosen folder)
//! - Input documents (the characters JSON)
//! - Notifications (user-facing messages at the boundary)

mod error;
mod external;
mod repos;

// =============================================================================
// Entity Store Ports
// =============================================================================
pub use repos::{ActorRepo, FolderRepo};

// =============================================================================
// External Collaborator Ports
// =============================================================================
pub use external::{
    AssetProbe, BrowseResult, FolderBrowser, InputDocument, InputSource, NoticeLevel,
    NotificationPort,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockActorRepo, MockFolderRepo};

#[cfg(test)]
pub use external::{MockAssetProbe, MockFolderBrowser, MockInputSource, MockNotificationPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{RepoError, SourceError};
