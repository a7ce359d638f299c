//! Import followed by a merge of the import folder into the canonical folder.

use std::sync::Arc;

use crate::infrastructure::ports::InputSource;
use crate::use_cases::import::{ImportCharacters, ImportError, ImportReport, ImportRequest};
use crate::use_cases::merge::{MergeError, MergeFolders, MergeReport, MergeRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub import: ImportReport,
    pub merge: MergeReport,
}

pub struct SyncCharacters {
    import: Arc<ImportCharacters>,
    merge: Arc<MergeFolders>,
}

impl SyncCharacters {
    pub fn new(import: Arc<ImportCharacters>, merge: Arc<MergeFolders>) -> Self {
        Self { import, merge }
    }

    /// The merge source is always the folder just imported into.
    pub async fn execute(
        &self,
        input: &dyn InputSource,
        request: &ImportRequest,
        target: &str,
        include_subfolders: bool,
    ) -> Result<SyncReport, SyncError> {
        let import = self.import.execute(input, request).await?;
        let merge = self
            .merge
            .execute(&MergeRequest {
                source: request.folder.clone(),
                target: target.to_string(),
                include_subfolders,
            })
            .await?;
        Ok(SyncReport { import, merge })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),
    #[error("Merge failed: {0}")]
    Merge(#[from] MergeError),
}
