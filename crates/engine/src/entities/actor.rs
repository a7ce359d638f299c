//! Actor entity operations.

use std::sync::Arc;
use tomebridge_domain::{self as domain, ActorDelta, ActorPayload, FolderId};

use crate::infrastructure::ports::{ActorRepo, RepoError};

/// Actor entity operations.
///
/// Batch writes with nothing in them are skipped rather than sent to the store.
pub struct Actor {
    repo: Arc<dyn ActorRepo>,
}

impl Actor {
    pub fn new(repo: Arc<dyn ActorRepo>) -> Self {
        Self { repo }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn list_all(&self) -> Result<Vec<domain::Actor>, RepoError> {
        self.repo.list_all().await
    }

    /// Actors whose folder is exactly `folder`.
    pub async fn list_in_folder(&self, folder: FolderId) -> Result<Vec<domain::Actor>, RepoError> {
        self.repo.list_in_folder(folder).await
    }

    // =========================================================================
    // Batch writes
    // =========================================================================

    pub async fn create_batch(&self, payloads: Vec<ActorPayload>) -> Result<usize, RepoError> {
        if payloads.is_empty() {
            return Ok(0);
        }
        let count = payloads.len();
        let created = self.repo.create_batch(payloads).await?;
        tracing::debug!(requested = count, created = created.len(), "Created actors");
        Ok(created.len())
    }

    pub async fn update_batch(&self, deltas: Vec<ActorDelta>) -> Result<usize, RepoError> {
        if deltas.is_empty() {
            return Ok(0);
        }
        let count = deltas.len();
        let updated = self.repo.update_batch(deltas).await?;
        tracing::debug!(requested = count, updated = updated.len(), "Updated actors");
        Ok(updated.len())
    }
}
