//! Maintenance use cases over the actors of one folder.
//!
//! Each runs a single batch update against the actors directly inside the
//! folder; subfolders are never included.

use std::sync::Arc;

use futures_util::future::join_all;
use tomebridge_domain::{
    plan_actor_link, plan_default_ownership, plan_image_refresh, CandidateProfile, OwnershipLevel,
};

use crate::entities::{Actor, Folder, FolderError};
use crate::infrastructure::ports::RepoError;
use crate::use_cases::images::ResolveImages;

/// Container for maintenance use cases.
pub struct MaintenanceUseCases {
    pub link_actor_data: Arc<LinkActorData>,
    pub default_ownership: Arc<SetDefaultOwnership>,
    pub refresh_images: Arc<RefreshImages>,
}

impl MaintenanceUseCases {
    pub fn new(
        link_actor_data: Arc<LinkActorData>,
        default_ownership: Arc<SetDefaultOwnership>,
        refresh_images: Arc<RefreshImages>,
    ) -> Self {
        Self {
            link_actor_data,
            default_ownership,
            refresh_images,
        }
    }
}

// =============================================================================
// Link Actor Data
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkReport {
    FolderEmpty { folder: String },
    AlreadyLinked { folder: String, total: usize },
    Linked { folder: String, updated: usize, skipped: usize },
}

/// Turn on "Link Actor Data" for every actor in a folder.
pub struct LinkActorData {
    actor: Arc<Actor>,
    folder: Arc<Folder>,
}

impl LinkActorData {
    pub fn new(actor: Arc<Actor>, folder: Arc<Folder>) -> Self {
        Self { actor, folder }
    }

    pub async fn execute(&self, folder_name: &str) -> Result<LinkReport, MaintenanceError> {
        let folder = self.folder.require(folder_name).await?;
        let actors = self.actor.list_in_folder(folder.id).await?;
        if actors.is_empty() {
            return Ok(LinkReport::FolderEmpty {
                folder: folder_name.to_string(),
            });
        }

        let plan = plan_actor_link(&actors);
        if plan.updates.is_empty() {
            return Ok(LinkReport::AlreadyLinked {
                folder: folder_name.to_string(),
                total: plan.already_linked,
            });
        }

        let updated = self.actor.update_batch(plan.updates).await?;
        tracing::info!(folder = %folder.name, updated, skipped = plan.already_linked, "Linked actor data");
        Ok(LinkReport::Linked {
            folder: folder_name.to_string(),
            updated,
            skipped: plan.already_linked,
        })
    }
}

// =============================================================================
// Default Ownership
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipReport {
    FolderEmpty {
        folder: String,
    },
    Updated {
        folder: String,
        updated: usize,
        level: OwnershipLevel,
    },
}

/// Set the default ("All Players") ownership level of every actor in a folder.
pub struct SetDefaultOwnership {
    actor: Arc<Actor>,
    folder: Arc<Folder>,
}

impl SetDefaultOwnership {
    pub fn new(actor: Arc<Actor>, folder: Arc<Folder>) -> Self {
        Self { actor, folder }
    }

    pub async fn execute(
        &self,
        folder_name: &str,
        level: OwnershipLevel,
    ) -> Result<OwnershipReport, MaintenanceError> {
        let folder = self.folder.require(folder_name).await?;
        let actors = self.actor.list_in_folder(folder.id).await?;
        if actors.is_empty() {
            return Ok(OwnershipReport::FolderEmpty {
                folder: folder_name.to_string(),
            });
        }

        let updated = self
            .actor
            .update_batch(plan_default_ownership(&actors, level))
            .await?;
        tracing::info!(folder = %folder.name, updated, %level, "Set default ownership");
        Ok(OwnershipReport::Updated {
            folder: folder_name.to_string(),
            updated,
            level,
        })
    }
}

// =============================================================================
// Image Refresh
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: usize,
    /// Actors for which no image was found
    pub unmatched: Vec<String>,
}

/// Re-resolve portrait and token images of existing actors by probing a base path.
///
/// The folder name must match exactly.
pub struct RefreshImages {
    actor: Arc<Actor>,
    folder: Arc<Folder>,
    images: Arc<ResolveImages>,
}

impl RefreshImages {
    pub fn new(actor: Arc<Actor>, folder: Arc<Folder>, images: Arc<ResolveImages>) -> Self {
        Self {
            actor,
            folder,
            images,
        }
    }

    pub async fn execute(
        &self,
        folder_name: &str,
        base: &str,
    ) -> Result<RefreshReport, MaintenanceError> {
        let folder = self
            .folder
            .find_exact(folder_name)
            .await?
            .ok_or_else(|| MaintenanceError::FolderNotFound(folder_name.to_string()))?;
        let actors = self.actor.list_in_folder(folder.id).await?;

        let resolved = join_all(
            actors
                .iter()
                .map(|actor| self.images.probe_one(&actor.name, CandidateProfile::Refresh, base)),
        )
        .await;

        let mut report = RefreshReport::default();
        let mut deltas = Vec::new();
        for (actor, images) in actors.iter().zip(&resolved) {
            match plan_image_refresh(actor.id, images) {
                Some(delta) => deltas.push(delta),
                None => {
                    tracing::info!(actor = %actor.name, "No image files found");
                    report.unmatched.push(actor.name.clone());
                }
            }
        }

        report.updated = self.actor.update_batch(deltas).await?;
        tracing::info!(
            folder = %folder.name,
            updated = report.updated,
            unmatched = report.unmatched.len(),
            "Refreshed actor images"
        );
        Ok(report)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    #[error("Folder \"{0}\" not found")]
    FolderNotFound(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<FolderError> for MaintenanceError {
    fn from(err: FolderError) -> Self {
        match err {
            FolderError::NotFound(name) => Self::FolderNotFound(name),
            FolderError::Repo(e) => Self::Repo(e),
        }
    }
}
