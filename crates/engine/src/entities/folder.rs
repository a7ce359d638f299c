//! Folder entity operations.
//!
//! All lookups here are for actor folders.

use std::sync::Arc;
use tomebridge_domain::{self as domain, find_folder_exact, find_folder_folded, FolderKind};

use crate::infrastructure::ports::{FolderRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum FolderError {
    #[error("Folder not found: {0}")]
    NotFound(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Folder entity operations.
pub struct Folder {
    repo: Arc<dyn FolderRepo>,
}

impl Folder {
    pub fn new(repo: Arc<dyn FolderRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<domain::Folder>, RepoError> {
        self.repo.list(FolderKind::Actor).await
    }

    /// First actor folder whose name matches ignoring case and surrounding whitespace.
    pub async fn find_folded(&self, name: &str) -> Result<Option<domain::Folder>, RepoError> {
        let folders = self.list().await?;
        Ok(find_folder_folded(&folders, FolderKind::Actor, name).cloned())
    }

    /// First actor folder whose name is exactly `name`.
    pub async fn find_exact(&self, name: &str) -> Result<Option<domain::Folder>, RepoError> {
        let folders = self.list().await?;
        Ok(find_folder_exact(&folders, FolderKind::Actor, name).cloned())
    }

    /// Folder that must already exist, matched ignoring case.
    pub async fn require(&self, name: &str) -> Result<domain::Folder, FolderError> {
        self.find_folded(name)
            .await?
            .ok_or_else(|| FolderError::NotFound(name.to_string()))
    }

    /// Existing folder matched ignoring case, or a new one named `name`.
    pub async fn get_or_create(&self, name: &str) -> Result<domain::Folder, RepoError> {
        if let Some(existing) = self.find_folded(name).await? {
            return Ok(existing);
        }
        let created = self.repo.create(name, FolderKind::Actor).await?;
        tracing::info!(folder = %created.name, folder_id = %created.id, "Created actor folder");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockFolderRepo;

    #[tokio::test]
    async fn when_folder_exists_with_other_case_then_get_or_create_reuses_it() {
        let existing = domain::Folder::new("tome", FolderKind::Actor);
        let listed = existing.clone();

        let mut repo = MockFolderRepo::new();
        repo.expect_list()
            .returning(move |_| Ok(vec![listed.clone()]));
        repo.expect_create().never();

        let folder = Folder::new(Arc::new(repo));
        let found = folder.get_or_create("Tome").await.expect("get_or_create");

        assert_eq!(found.id, existing.id);
    }

    #[tokio::test]
    async fn when_folder_missing_then_get_or_create_creates_it() {
        let mut repo = MockFolderRepo::new();
        repo.expect_list().returning(|_| Ok(vec![]));
        repo.expect_create()
            .withf(|name, kind| name == "NPCs" && *kind == FolderKind::Actor)
            .times(1)
            .returning(|name, kind| Ok(domain::Folder::new(name, kind)));

        let folder = Folder::new(Arc::new(repo));
        let created = folder.get_or_create("NPCs").await.expect("get_or_create");

        assert_eq!(created.name, "NPCs");
    }

    #[tokio::test]
    async fn when_folder_missing_then_require_fails() {
        let mut repo = MockFolderRepo::new();
        repo.expect_list().returning(|_| Ok(vec![]));

        let folder = Folder::new(Arc::new(repo));
        let err = folder.require("Tome").await.unwrap_err();

        assert!(matches!(err, FolderError::NotFound(name) if name == "Tome"));
    }

    #[tokio::test]
    async fn find_exact_respects_case() {
        let listed = domain::Folder::new("NPCs", FolderKind::Actor);
        let mut repo = MockFolderRepo::new();
        repo.expect_list()
            .returning(move |_| Ok(vec![listed.clone()]));

        let folder = Folder::new(Arc::new(repo));

        assert!(folder.find_exact("npcs").await.expect("find").is_none());
        assert!(folder.find_exact("NPCs").await.expect("find").is_some());
    }
}
