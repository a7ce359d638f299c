//! Entity modules - Domain capability encapsulation.
//!
//! Each module wraps the store operations for one host entity type.
//! They depend on repository ports and provide the building blocks for use cases.

pub mod actor;
pub mod folder;

pub use actor::Actor;
pub use folder::{Folder, FolderError};
