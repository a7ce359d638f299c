//! Folder merge use case: move actors from a staging folder into a canonical one.

use std::sync::Arc;

use tomebridge_domain::{plan_merge, MergeOutcome, MergeScope};

use crate::entities::{Actor, Folder, FolderError};
use crate::infrastructure::ports::RepoError;

#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Must already exist
    pub source: String,
    /// Created if missing
    pub target: String,
    pub include_subfolders: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeReport {
    /// The source folder had no eligible actors
    NothingToDo {
        source: String,
        include_subfolders: bool,
    },
    /// Every eligible actor collided with a name in the target
    AllDuplicates {
        target: String,
        eligible: usize,
        skipped: Vec<String>,
    },
    Moved {
        target: String,
        moved: usize,
        skipped: Vec<String>,
    },
}

/// Move every source actor whose name is not already taken in the target.
pub struct MergeFolders {
    actor: Arc<Actor>,
    folder: Arc<Folder>,
}

impl MergeFolders {
    pub fn new(actor: Arc<Actor>, folder: Arc<Folder>) -> Self {
        Self { actor, folder }
    }

    pub async fn execute(&self, request: &MergeRequest) -> Result<MergeReport, MergeError> {
        let source = self.folder.require(&request.source).await?;
        let target = self.folder.get_or_create(&request.target).await?;

        let folders = self.folder.list().await?;
        let actors = self.actor.list_all().await?;
        let outcome = plan_merge(
            &actors,
            &folders,
            MergeScope {
                source: &source,
                target: &target,
                include_subfolders: request.include_subfolders,
            },
        );

        let plan = match outcome {
            MergeOutcome::NothingToDo => {
                tracing::info!(source = %source.name, "No actors to merge");
                return Ok(MergeReport::NothingToDo {
                    source: request.source.clone(),
                    include_subfolders: request.include_subfolders,
                });
            }
            MergeOutcome::Planned(plan) => plan,
        };

        if !plan.to_skip.is_empty() {
            tracing::info!(skipped = ?plan.to_skip, "Skipped name duplicates");
        }

        if plan.to_move.is_empty() {
            return Ok(MergeReport::AllDuplicates {
                target: request.target.clone(),
                eligible: plan.eligible(),
                skipped: plan.to_skip,
            });
        }

        let moved = self.actor.update_batch(plan.move_deltas()).await?;
        tracing::info!(
            source = %source.name,
            target = %target.name,
            moved,
            skipped = plan.to_skip.len(),
            "Merged folders"
        );

        Ok(MergeReport::Moved {
            target: request.target.clone(),
            moved,
            skipped: plan.to_skip,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Folder \"{0}\" not found")]
    FolderNotFound(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<FolderError> for MergeError {
    fn from(err: FolderError) -> Self {
        match err {
            FolderError::NotFound(name) => Self::FolderNotFound(name),
            FolderError::Repo(e) => Self::Repo(e),
        }
    }
}
