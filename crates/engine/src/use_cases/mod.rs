//! Use cases - User story orchestration.
//!
//! Each module contains use cases for one step of the character pipeline.
//! Use cases orchestrate across entity modules and return structured reports.

pub mod images;
pub mod import;
pub mod maintenance;
pub mod merge;
pub mod sync;

// Re-export main types
pub use images::{ImageSource, ResolveImages};
pub use import::{ImportCharacters, ImportError, ImportReport, ImportRequest, ImportStage};
pub use maintenance::{
    LinkActorData, LinkReport, MaintenanceError, MaintenanceUseCases, OwnershipReport,
    RefreshImages, RefreshReport, SetDefaultOwnership,
};
pub use merge::{MergeError, MergeFolders, MergeReport, MergeRequest};
pub use sync::{SyncCharacters, SyncError, SyncReport};
