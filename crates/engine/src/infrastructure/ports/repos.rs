//! Entity store port traits.
//!
//! The host owns persistence. These traits are the narrow slice of it the
//! import pipeline needs: list, batch create, batch partial update.

use async_trait::async_trait;
use tomebridge_domain::{Actor, ActorDelta, ActorPayload, Folder, FolderId, FolderKind};

use super::error::RepoError;

// =============================================================================
// Actor Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorRepo: Send + Sync {
    // Queries
    async fn list_all(&self) -> Result<Vec<Actor>, RepoError>;
    async fn list_in_folder(&self, folder: FolderId) -> Result<Vec<Actor>, RepoError>;

    // Batch writes - each call is one request against the store
    async fn create_batch(&self, payloads: Vec<ActorPayload>) -> Result<Vec<Actor>, RepoError>;
    async fn update_batch(&self, deltas: Vec<ActorDelta>) -> Result<Vec<Actor>, RepoError>;
}

// =============================================================================
// Folder Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FolderRepo: Send + Sync {
    async fn list(&self, kind: FolderKind) -> Result<Vec<Folder>, RepoError>;
    async fn create(&self, name: &str, kind: FolderKind) -> Result<Folder, RepoError>;
}
