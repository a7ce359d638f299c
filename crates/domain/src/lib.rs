//! TomeBridge domain: character records, name normalization, image
//! resolution and the import/merge planners.
//!
//! Everything here is pure. Inputs (record text, file listings, the current
//! state of the host's actors and folders) are passed in; plans come out.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod images;
pub mod mapping;
pub mod payload;
pub mod planning;
pub mod value_objects;

pub use entities::{
    find_folder_exact, find_folder_folded, parse_character_array, Actor, CharacterContent,
    CharacterRecord, ContentSection, Folder, FolderKind, FolderTree, PrototypeToken, TokenTexture,
};

pub use error::DomainError;

pub use ids::{ActorId, FolderId};

pub use images::{
    resolve_from_listing, CandidateList, CandidateProfile, FileListing, ImageCandidateSet,
    ResolvedImages,
};

pub use mapping::{build_biography, map_record, MappingDefaults};

pub use payload::{ActorChange, ActorDelta, ActorPayload, Movement, DEFAULT_ACTOR_TYPE};

pub use planning::{
    plan_actor_link, plan_default_ownership, plan_image_refresh, plan_merge, plan_upsert,
    ActorLinkPlan, ExistingEntityIndex, FolderMove, MergeOutcome, MergePlan, MergeScope,
    PlannedUpdate, UpsertPlan,
};

pub use value_objects::{DisplayName, Ownership, OwnershipLevel, UNNAMED_CHARACTER};
