//! In-memory stand-in for the host's entity store.
//!
//! Holds actors and folders behind a `RwLock` and can be seeded from, and
//! written back to, a JSON world snapshot. The CLI runs every use case
//! against this store; tests use it when mocks would only restate the store.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tomebridge_domain::{Actor, ActorDelta, ActorId, ActorPayload, Folder, FolderId, FolderKind};

use super::ports::{ActorRepo, FolderRepo, RepoError};

/// Serialized form of a world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub actors: Vec<Actor>,
}

#[derive(Default)]
pub struct SnapshotStore {
    state: RwLock<WorldSnapshot>,
}

impl SnapshotStore {
    pub fn new(snapshot: WorldSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Load a snapshot file; a missing file starts an empty world.
    pub async fn load(path: &Path) -> Result<Self, RepoError> {
        let snapshot = match tokio::fs::read_to_string(path).await {
            Ok(text) => serde_json::from_str(&text).map_err(RepoError::serialization)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No world snapshot found, starting empty");
                WorldSnapshot::default()
            }
            Err(e) => return Err(RepoError::database("load_snapshot", e)),
        };
        Ok(Self::new(snapshot))
    }

    pub async fn save(&self, path: &Path) -> Result<(), RepoError> {
        let snapshot = self.snapshot().await;
        let text = serde_json::to_string_pretty(&snapshot).map_err(RepoError::serialization)?;
        tokio::fs::write(path, text)
            .await
            .map_err(|e| RepoError::database("save_snapshot", e))
    }

    pub async fn snapshot(&self) -> WorldSnapshot {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl ActorRepo for SnapshotStore {
    async fn list_all(&self) -> Result<Vec<Actor>, RepoError> {
        Ok(self.state.read().await.actors.clone())
    }

    async fn list_in_folder(&self, folder: FolderId) -> Result<Vec<Actor>, RepoError> {
        Ok(self
            .state
            .read()
            .await
            .actors
            .iter()
            .filter(|a| a.folder == Some(folder))
            .cloned()
            .collect())
    }

    async fn create_batch(&self, payloads: Vec<ActorPayload>) -> Result<Vec<Actor>, RepoError> {
        let mut state = self.state.write().await;
        let created: Vec<Actor> = payloads
            .iter()
            .map(|payload| Actor::from_payload(ActorId::new(), payload))
            .collect();
        state.actors.extend(created.iter().cloned());
        Ok(created)
    }

    /// Applies deltas in order. An unknown id stops the batch; earlier deltas stay applied.
    async fn update_batch(&self, deltas: Vec<ActorDelta>) -> Result<Vec<Actor>, RepoError> {
        let mut state = self.state.write().await;
        let mut updated = Vec::with_capacity(deltas.len());
        for delta in &deltas {
            let Some(actor) = state.actors.iter_mut().find(|a| a.id == delta.id) else {
                return Err(RepoError::partial_batch(
                    "update",
                    updated.len(),
                    RepoError::not_found("Actor", delta.id),
                ));
            };
            actor.apply(delta);
            updated.push(actor.clone());
        }
        Ok(updated)
    }
}

#[async_trait]
impl FolderRepo for SnapshotStore {
    async fn list(&self, kind: FolderKind) -> Result<Vec<Folder>, RepoError> {
        Ok(self
            .state
            .read()
            .await
            .folders
            .iter()
            .filter(|f| f.kind == kind)
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str, kind: FolderKind) -> Result<Folder, RepoError> {
        let folder = Folder::new(name, kind);
        self.state.write().await.folders.push(folder.clone());
        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tomebridge_domain::ActorChange;

    #[tokio::test]
    async fn update_batch_reports_partial_failure_without_rollback() {
        let folder = Folder::new("NPCs", FolderKind::Actor);
        let known = Actor::new("Mira", None);
        let store = SnapshotStore::new(WorldSnapshot {
            folders: vec![folder.clone()],
            actors: vec![known.clone()],
        });

        let err = store
            .update_batch(vec![
                ActorDelta::new(known.id).with(ActorChange::Folder(folder.id)),
                ActorDelta::new(ActorId::new()).with(ActorChange::Folder(folder.id)),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::PartialBatch { written: 1, .. }));
        let moved = store.list_in_folder(folder.id).await.expect("list");
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, known.id);
    }

    #[tokio::test]
    async fn folders_are_listed_by_kind() {
        let store = SnapshotStore::default();
        store.create("Tome", FolderKind::Actor).await.expect("create");
        store.create("Loot", FolderKind::Item).await.expect("create");

        let actor_folders = store.list(FolderKind::Actor).await.expect("list");
        assert_eq!(actor_folders.len(), 1);
        assert_eq!(actor_folders[0].name, "Tome");
    }

    #[tokio::test]
    async fn snapshot_roundtrips_through_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("world.json");
        let folder = Folder::new("NPCs", FolderKind::Actor);
        let store = SnapshotStore::new(WorldSnapshot {
            folders: vec![folder.clone()],
            actors: vec![Actor::new("Guard", Some(folder.id)).with_actor_link(true)],
        });

        store.save(&path).await.expect("save");
        let reloaded = SnapshotStore::load(&path).await.expect("load");

        assert_eq!(reloaded.snapshot().await, store.snapshot().await);
    }

    #[tokio::test]
    async fn missing_snapshot_starts_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = SnapshotStore::load(&dir.path().join("absent.json"))
            .await
            .expect("load");
        assert_eq!(store.snapshot().await, WorldSnapshot::default());
    }
}
