//! Folder entity - a named container that other entities live in
//!
//! Folders form a tree through their optional `parent` link. The host allows
//! arbitrarily deep nesting; membership checks walk that chain.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::common::{names_match_exact, names_match_folded};
use crate::ids::FolderId;

/// Which document type a folder groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderKind {
    Actor,
    Item,
    Scene,
    JournalEntry,
    /// Forward-compatibility fallback for other host folder types.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for FolderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FolderKind::Actor => write!(f, "Actor"),
            FolderKind::Item => write!(f, "Item"),
            FolderKind::Scene => write!(f, "Scene"),
            FolderKind::JournalEntry => write!(f, "JournalEntry"),
            FolderKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A container in the host's sidebar tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FolderKind,
    #[serde(default)]
    pub parent: Option<FolderId>,
}

impl Folder {
    pub fn new(name: impl Into<String>, kind: FolderKind) -> Self {
        Self {
            id: FolderId::new(),
            name: name.into(),
            kind,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: FolderId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Find a folder of `kind` whose name matches `name` case-insensitively.
pub fn find_folder_folded<'a>(folders: &'a [Folder], kind: FolderKind, name: &str) -> Option<&'a Folder> {
    folders
        .iter()
        .find(|f| f.kind == kind && names_match_folded(&f.name, name))
}

/// Find a folder of `kind` whose name matches `name` exactly.
pub fn find_folder_exact<'a>(folders: &'a [Folder], kind: FolderKind, name: &str) -> Option<&'a Folder> {
    folders
        .iter()
        .find(|f| f.kind == kind && names_match_exact(&f.name, name))
}

/// Parent links of every known folder, for membership checks.
#[derive(Debug, Clone, Default)]
pub struct FolderTree {
    parents: HashMap<FolderId, Option<FolderId>>,
}

impl FolderTree {
    pub fn new(folders: &[Folder]) -> Self {
        Self {
            parents: folders.iter().map(|f| (f.id, f.parent)).collect(),
        }
    }

    /// Whether something stored in `folder` belongs to `container`.
    ///
    /// Without `include_subfolders` only direct membership counts. With it, the
    /// parent chain of `folder` is walked until `container` is found, the
    /// chain ends, or a folder repeats.
    pub fn is_member(
        &self,
        folder: Option<FolderId>,
        container: FolderId,
        include_subfolders: bool,
    ) -> bool {
        let Some(start) = folder else {
            return false;
        };
        if !include_subfolders {
            return start == container;
        }

        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if id == container {
                return true;
            }
            if !seen.insert(id) {
                return false;
            }
            current = self.parents.get(&id).copied().flatten();
        }
        false
    }
}
