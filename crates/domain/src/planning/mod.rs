//! Pure planners. They compute what to write; they never write.

mod maintenance;
mod merge;
mod upsert;

pub use maintenance::{plan_actor_link, plan_default_ownership, plan_image_refresh, ActorLinkPlan};
pub use merge::{plan_merge, FolderMove, MergeOutcome, MergePlan, MergeScope};
pub use upsert::{plan_upsert, ExistingEntityIndex, PlannedUpdate, UpsertPlan};
