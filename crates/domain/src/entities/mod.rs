//! Domain entities - Host documents and import records

mod actor;
mod character_record;
mod folder;

pub use actor::{Actor, PrototypeToken, TokenTexture};
pub use character_record::{
    parse_character_array, CharacterContent, CharacterRecord, ContentSection,
};
pub use folder::{find_folder_exact, find_folder_folded, Folder, FolderKind, FolderTree};
