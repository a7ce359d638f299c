//! Folder merge planner: move actors from a staging folder into a canonical
//! folder, skipping any whose name already exists there.
//!
//! Names collide when their [`normalize_key`] forms are equal, so `"Guard"`
//! collides with `" guard"` but not with `"Guards"`. The planner only computes
//! the plan; applying it is a single batch write by the caller.

use std::collections::HashSet;

use crate::common::normalize_key;
use crate::entities::{Actor, Folder, FolderTree};
use crate::ids::{ActorId, FolderId};
use crate::payload::{ActorChange, ActorDelta};

/// One planned move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderMove {
    pub actor: ActorId,
    pub target: FolderId,
}

impl FolderMove {
    pub fn to_delta(self) -> ActorDelta {
        ActorDelta::new(self.actor).with(ActorChange::Folder(self.target))
    }
}

/// Partition of the eligible source actors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    pub to_move: Vec<FolderMove>,
    /// Display names of source actors that collided with the target
    pub to_skip: Vec<String>,
}

impl MergePlan {
    pub fn eligible(&self) -> usize {
        self.to_move.len() + self.to_skip.len()
    }

    pub fn move_deltas(&self) -> Vec<ActorDelta> {
        self.to_move.iter().map(|m| m.to_delta()).collect()
    }
}

/// Result of planning a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The source folder has no eligible actors at all
    NothingToDo,
    /// At least one eligible actor; `to_move` may still be empty if all collided
    Planned(MergePlan),
}

/// Which folders take part in a merge.
#[derive(Debug, Clone, Copy)]
pub struct MergeScope<'a> {
    pub source: &'a Folder,
    pub target: &'a Folder,
    pub include_subfolders: bool,
}

/// Compute the merge plan for `actors`.
///
/// The same membership rule (direct, or transitive with `include_subfolders`)
/// selects both the source actors and the target names.
pub fn plan_merge(actors: &[Actor], folders: &[Folder], scope: MergeScope<'_>) -> MergeOutcome {
    let tree = FolderTree::new(folders);
    let member_of = |actor: &Actor, container: FolderId| {
        tree.is_member(actor.folder, container, scope.include_subfolders)
    };

    let target_names: HashSet<String> = actors
        .iter()
        .filter(|actor| member_of(actor, scope.target.id))
        .map(|actor| normalize_key(&actor.name))
        .collect();

    let sources: Vec<&Actor> = actors
        .iter()
        .filter(|actor| member_of(actor, scope.source.id))
        .collect();

    if sources.is_empty() {
        return MergeOutcome::NothingToDo;
    }

    let mut plan = MergePlan::default();
    for actor in sources {
        if target_names.contains(&normalize_key(&actor.name)) {
            plan.to_skip.push(actor.name.clone());
        } else {
            plan.to_move.push(FolderMove {
                actor: actor.id,
                target: scope.target.id,
            });
        }
    }
    MergeOutcome::Planned(plan)
}
