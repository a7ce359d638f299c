//! Character import use case.
//!
//! Reads a characters document, resolves each character's images, maps the
//! records to actor payloads and upserts them into the import folder by exact
//! name. Everything that can fail without writing happens first: a malformed
//! document or an unreadable image folder leaves the store untouched.

use std::sync::Arc;

use tomebridge_domain::{
    map_record, parse_character_array, plan_upsert, CandidateProfile, DomainError,
    ExistingEntityIndex, MappingDefaults,
};

use crate::entities::{Actor, Folder};
use crate::infrastructure::ports::{InputSource, RepoError, SourceError};
use crate::use_cases::images::{ImageSource, ResolveImages};

/// Pipeline stages, logged as the import advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Idle,
    RecordsLoaded,
    ImagesResolved,
    PayloadsMapped,
    PlanComputed,
    Applied,
    Reported,
}

#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Folder that receives the actors; created if missing
    pub folder: String,
    pub images: ImageSource,
}

/// Outcome of one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub folder: String,
    /// Label of the characters document
    pub input: String,
    pub images_from: String,
    pub created: usize,
    pub updated: usize,
    /// Display names that got no portrait
    pub without_portrait: Vec<String>,
}

/// Import characters from a JSON document into an actor folder.
pub struct ImportCharacters {
    actor: Arc<Actor>,
    folder: Arc<Folder>,
    images: Arc<ResolveImages>,
    defaults: MappingDefaults,
}

impl ImportCharacters {
    pub fn new(
        actor: Arc<Actor>,
        folder: Arc<Folder>,
        images: Arc<ResolveImages>,
        defaults: MappingDefaults,
    ) -> Self {
        Self {
            actor,
            folder,
            images,
            defaults,
        }
    }

    pub async fn execute(
        &self,
        input: &dyn InputSource,
        request: &ImportRequest,
    ) -> Result<ImportReport, ImportError> {
        let mut stage = ImportStage::Idle;

        let document = input.read_text().await?;
        let records = parse_character_array(&document.text)?;
        tracing::info!(input = %document.label, records = records.len(), "Loaded characters");
        log_stage(&mut stage, ImportStage::RecordsLoaded);

        let names: Vec<String> = records
            .iter()
            .map(|record| {
                record
                    .display_name(&self.defaults.placeholder_name)
                    .to_string()
            })
            .collect();
        let images = self
            .images
            .resolve_all(&names, CandidateProfile::Import, &request.images)
            .await?;
        log_stage(&mut stage, ImportStage::ImagesResolved);

        let folder = self.folder.get_or_create(&request.folder).await?;
        let payloads: Vec<_> = records
            .iter()
            .zip(&images)
            .map(|(record, resolved)| map_record(record, folder.id, resolved, &self.defaults))
            .collect();
        let without_portrait = payloads
            .iter()
            .filter(|payload| payload.img.is_none())
            .map(|payload| payload.name.to_string())
            .collect();
        log_stage(&mut stage, ImportStage::PayloadsMapped);

        let existing = self.actor.list_in_folder(folder.id).await?;
        let index = ExistingEntityIndex::for_folder(&existing, folder.id);
        let plan = plan_upsert(payloads, &index);
        tracing::info!(
            folder = %folder.name,
            to_create = plan.to_create.len(),
            to_update = plan.to_update.len(),
            "Computed upsert plan"
        );
        log_stage(&mut stage, ImportStage::PlanComputed);

        let update_deltas = plan.update_deltas();
        let created = self.actor.create_batch(plan.to_create).await?;
        let updated = self.actor.update_batch(update_deltas).await?;
        log_stage(&mut stage, ImportStage::Applied);

        let report = ImportReport {
            folder: request.folder.clone(),
            input: document.label,
            images_from: request.images.location().to_string(),
            created,
            updated,
            without_portrait,
        };
        log_stage(&mut stage, ImportStage::Reported);
        Ok(report)
    }
}

fn log_stage(current: &mut ImportStage, next: ImportStage) {
    tracing::debug!(from = ?current, to = ?next, "Import stage");
    *current = next;
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Input malformed: {0}")]
    InputMalformed(String),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for ImportError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Parse(message) => Self::InputMalformed(message),
        }
    }
}
