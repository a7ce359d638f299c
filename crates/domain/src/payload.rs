//! Write payloads handed to the host's entity store.
//!
//! `ActorPayload` is the normalized shape of one imported character, ready for
//! a create batch. `ActorDelta` is a partial update: an identity plus typed
//! changes, each addressing one nested path of the stored entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ActorId, FolderId};
use crate::value_objects::{DisplayName, OwnershipLevel};

/// Default actor type tag for imported characters.
pub const DEFAULT_ACTOR_TYPE: &str = "npc";

/// Normalized entity payload produced for each imported character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorPayload {
    pub name: DisplayName,
    #[serde(rename = "type")]
    pub actor_type: String,
    pub folder: FolderId,
    /// Portrait; serialized as an explicit `null` when nothing was resolved
    pub img: Option<String>,
    pub system: ActorSystem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prototype_token: Option<TokenPatch>,
    pub flags: ImportFlags,
}

impl ActorPayload {
    /// Resolved token texture, if any.
    pub fn token_src(&self) -> Option<&str> {
        self.prototype_token
            .as_ref()
            .map(|token| token.texture.src.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSystem {
    pub details: ActorDetails,
    pub attributes: ActorAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDetails {
    pub race: String,
    pub biography: Biography,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biography {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAttributes {
    pub movement: Movement,
}

/// Movement defaults applied to every imported character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub walk: u32,
    pub units: String,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            walk: 30,
            units: "ft".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPatch {
    pub texture: TextureSrc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSrc {
    pub src: String,
}

/// Provenance flag: where the record came from and the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportFlags {
    pub import: ImportProvenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportProvenance {
    pub source: String,
    pub raw: Value,
}

// =============================================================================
// Partial updates
// =============================================================================

/// One field-level change of a stored actor.
#[derive(Debug, Clone, PartialEq)]
pub enum ActorChange {
    /// Overwrite the imported fields with a fresh payload (nested objects merged)
    Replace(Box<ActorPayload>),
    Folder(FolderId),
    Portrait(String),
    TokenTexture(String),
    ActorLink(bool),
    DefaultOwnership(OwnershipLevel),
}

impl ActorChange {
    /// Dotted path of the field this change writes.
    pub fn path(&self) -> &'static str {
        match self {
            ActorChange::Replace(_) => "*",
            ActorChange::Folder(_) => "folder",
            ActorChange::Portrait(_) => "img",
            ActorChange::TokenTexture(_) => "prototypeToken.texture.src",
            ActorChange::ActorLink(_) => "prototypeToken.actorLink",
            ActorChange::DefaultOwnership(_) => "ownership.default",
        }
    }
}

/// A partial update addressed at one actor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorDelta {
    pub id: ActorId,
    pub changes: Vec<ActorChange>,
}

impl ActorDelta {
    pub fn new(id: ActorId) -> Self {
        Self {
            id,
            changes: Vec::new(),
        }
    }

    pub fn with(mut self, change: ActorChange) -> Self {
        self.changes.push(change);
        self
    }

    /// Paths touched by this delta, in order.
    pub fn paths(&self) -> Vec<&'static str> {
        self.changes.iter().map(ActorChange::path).collect()
    }

    /// The target folder if this delta moves the actor.
    pub fn target_folder(&self) -> Option<FolderId> {
        self.changes.iter().rev().find_map(|change| match change {
            ActorChange::Folder(folder) => Some(*folder),
            _ => None,
        })
    }
}
