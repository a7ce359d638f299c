//! Upsert planner: split mapped payloads into creates and updates.
//!
//! Lookup is by exact display name (see [`names_match_exact`]). Folder merges
//! compare case-insensitively instead; the two rules are intentionally kept
//! apart.
//!
//! [`names_match_exact`]: crate::common::names_match_exact

use std::collections::HashMap;

use crate::entities::Actor;
use crate::ids::{ActorId, FolderId};
use crate::payload::{ActorChange, ActorDelta, ActorPayload};

/// Existing actors of one folder, keyed by their exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingEntityIndex {
    by_name: HashMap<String, ActorId>,
}

impl ExistingEntityIndex {
    /// Index the actors stored directly in `folder`.
    ///
    /// When two actors share a name the later one wins.
    pub fn for_folder<'a>(actors: impl IntoIterator<Item = &'a Actor>, folder: FolderId) -> Self {
        let by_name = actors
            .into_iter()
            .filter(|actor| actor.folder == Some(folder))
            .map(|actor| (actor.name.clone(), actor.id))
            .collect();
        Self { by_name }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, ActorId)>) -> Self {
        Self {
            by_name: pairs.into_iter().collect(),
        }
    }

    /// Look up an existing actor by exact display name.
    pub fn lookup_exact(&self, name: &str) -> Option<ActorId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// A payload routed to an existing actor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUpdate {
    pub id: ActorId,
    pub payload: ActorPayload,
}

impl PlannedUpdate {
    /// The update as a full-replacement delta for the store.
    pub fn to_delta(&self) -> ActorDelta {
        ActorDelta::new(self.id).with(ActorChange::Replace(Box::new(self.payload.clone())))
    }
}

/// Creates and updates, each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpsertPlan {
    pub to_create: Vec<ActorPayload>,
    pub to_update: Vec<PlannedUpdate>,
}

impl UpsertPlan {
    pub fn total(&self) -> usize {
        self.to_create.len() + self.to_update.len()
    }

    pub fn update_deltas(&self) -> Vec<ActorDelta> {
        self.to_update.iter().map(PlannedUpdate::to_delta).collect()
    }
}

/// Route each payload to create or update. Nothing is dropped.
pub fn plan_upsert(payloads: Vec<ActorPayload>, index: &ExistingEntityIndex) -> UpsertPlan {
    let mut plan = UpsertPlan::default();
    for payload in payloads {
        match index.lookup_exact(payload.name.as_str()) {
            Some(id) => plan.to_update.push(PlannedUpdate { id, payload }),
            None => plan.to_create.push(payload),
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CharacterRecord;
    use crate::images::ResolvedImages;
    use crate::mapping::{map_record, MappingDefaults};

    fn payloads(folder: FolderId, names: &[&str]) -> Vec<ActorPayload> {
        names
            .iter()
            .map(|name| {
                map_record(
                    &CharacterRecord::named(*name),
                    folder,
                    &ResolvedImages::none(),
                    &MappingDefaults::default(),
                )
            })
            .collect()
    }

    #[test]
    fn test_existing_names_are_updated_others_created() {
        let folder = FolderId::new();
        let guard = Actor::new("Guard", Some(folder));
        let index = ExistingEntityIndex::for_folder([&guard], folder);

        let plan = plan_upsert(payloads(folder, &["Mira", "Guard", "Adrian"]), &index);

        assert_eq!(plan.total(), 3);
        let created: Vec<&str> = plan.to_create.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(created, vec!["Mira", "Adrian"]);
        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].id, guard.id);
    }

    #[test]
    fn test_lookup_is_exact_not_case_insensitive() {
        let folder = FolderId::new();
        let guard = Actor::new("guard", Some(folder));
        let index = ExistingEntityIndex::for_folder([&guard], folder);

        let plan = plan_upsert(payloads(folder, &["Guard"]), &index);

        assert_eq!(plan.to_create.len(), 1);
        assert!(plan.to_update.is_empty());
    }

    #[test]
    fn test_index_only_covers_its_folder() {
        let folder = FolderId::new();
        let elsewhere = Actor::new("Mira", Some(FolderId::new()));
        let index = ExistingEntityIndex::for_folder([&elsewhere], folder);
        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_names_later_wins() {
        let folder = FolderId::new();
        let first = Actor::new("Guard", Some(folder));
        let second = Actor::new("Guard", Some(folder));
        let index = ExistingEntityIndex::for_folder([&first, &second], folder);
        assert_eq!(index.lookup_exact("Guard"), Some(second.id));
    }

    #[test]
    fn test_counts_always_add_up_and_plan_is_idempotent() {
        let folder = FolderId::new();
        let existing: Vec<Actor> = ["A", "C", "E"]
            .iter()
            .map(|n| Actor::new(*n, Some(folder)))
            .collect();
        let index = ExistingEntityIndex::for_folder(&existing, folder);
        let input = payloads(folder, &["A", "B", "C", "D", "E", "A"]);

        let first = plan_upsert(input.clone(), &index);
        let second = plan_upsert(input.clone(), &index);

        assert_eq!(first.total(), input.len());
        assert_eq!(first, second);
        assert_eq!(first.to_update.len(), 4);
        for name in ["A", "C", "E"] {
            assert!(first.to_update.iter().any(|u| u.payload.name.as_str() == name));
        }
    }

    #[test]
    fn test_update_delta_replaces_payload() {
        let folder = FolderId::new();
        let id = ActorId::new();
        let index = ExistingEntityIndex::from_pairs([("Mira".to_string(), id)]);
        let plan = plan_upsert(payloads(folder, &["Mira"]), &index);

        let deltas = plan.update_deltas();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].id, id);
        assert_eq!(deltas[0].paths(), vec!["*"]);
    }
}
