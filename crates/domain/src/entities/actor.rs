//! Actor entity - a character document as stored by the host
//!
//! The host owns the full document; the import pipeline only ever reads the
//! fields below and writes through [`ActorDelta`]s. Game-system data and flags
//! are kept as opaque JSON so unknown fields survive a round trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ActorId, FolderId};
use crate::payload::{ActorChange, ActorDelta, ActorPayload};
use crate::value_objects::Ownership;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub actor_type: String,
    #[serde(default)]
    pub folder: Option<FolderId>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub system: Value,
    #[serde(default)]
    pub prototype_token: PrototypeToken,
    #[serde(default)]
    pub ownership: Ownership,
    #[serde(default)]
    pub flags: Value,
}

/// Token defaults copied onto every token placed from this actor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrototypeToken {
    /// "Link Actor Data": tokens share the actor's data instead of a copy
    #[serde(default)]
    pub actor_link: bool,
    #[serde(default)]
    pub texture: TokenTexture,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTexture {
    #[serde(default)]
    pub src: Option<String>,
}

impl Actor {
    /// Minimal actor, mostly for tests and fixtures.
    pub fn new(name: impl Into<String>, folder: Option<FolderId>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            actor_type: crate::payload::DEFAULT_ACTOR_TYPE.to_string(),
            folder,
            img: None,
            system: Value::Null,
            prototype_token: PrototypeToken::default(),
            ownership: Ownership::default(),
            flags: Value::Null,
        }
    }

    /// Materialize a create payload under a freshly assigned id.
    pub fn from_payload(id: ActorId, payload: &ActorPayload) -> Self {
        let mut actor = Self {
            id,
            name: String::new(),
            actor_type: String::new(),
            folder: None,
            img: None,
            system: Value::Null,
            prototype_token: PrototypeToken::default(),
            ownership: Ownership::default(),
            flags: Value::Null,
        };
        actor.apply_change(&ActorChange::Replace(Box::new(payload.clone())));
        actor
    }

    pub fn with_actor_link(mut self, linked: bool) -> Self {
        self.prototype_token.actor_link = linked;
        self
    }

    /// Apply every change of `delta` in order. Fields not named by a change are untouched.
    pub fn apply(&mut self, delta: &ActorDelta) {
        for change in &delta.changes {
            self.apply_change(change);
        }
    }

    fn apply_change(&mut self, change: &ActorChange) {
        match change {
            ActorChange::Replace(payload) => {
                self.name = payload.name.to_string();
                self.actor_type = payload.actor_type.clone();
                self.folder = Some(payload.folder);
                self.img = payload.img.clone();
                merge_json(&mut self.system, to_json(&payload.system));
                merge_json(&mut self.flags, to_json(&payload.flags));
                if let Some(src) = payload.token_src() {
                    self.prototype_token.texture.src = Some(src.to_string());
                }
            }
            ActorChange::Folder(folder) => self.folder = Some(*folder),
            ActorChange::Portrait(src) => self.img = Some(src.clone()),
            ActorChange::TokenTexture(src) => self.prototype_token.texture.src = Some(src.clone()),
            ActorChange::ActorLink(linked) => self.prototype_token.actor_link = *linked,
            ActorChange::DefaultOwnership(level) => self.ownership.default = *level,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Deep-merge `patch` into `target`: objects merge key by key, anything else replaces.
fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(target.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch,
    }
}
