//! Batch field updates over the actors of one folder.
//!
//! None of these involve matching or conflict logic; each produces a list of
//! deltas for a single batch write.

use crate::entities::Actor;
use crate::ids::ActorId;
use crate::images::ResolvedImages;
use crate::payload::{ActorChange, ActorDelta};
use crate::value_objects::OwnershipLevel;

/// Actors that still need "Link Actor Data" enabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorLinkPlan {
    pub updates: Vec<ActorDelta>,
    pub already_linked: usize,
}

pub fn plan_actor_link<'a>(actors: impl IntoIterator<Item = &'a Actor>) -> ActorLinkPlan {
    let mut plan = ActorLinkPlan::default();
    for actor in actors {
        if actor.prototype_token.actor_link {
            plan.already_linked += 1;
        } else {
            plan.updates
                .push(ActorDelta::new(actor.id).with(ActorChange::ActorLink(true)));
        }
    }
    plan
}

/// Set the "All Players" level on every actor, leaving per-user entries alone.
pub fn plan_default_ownership<'a>(
    actors: impl IntoIterator<Item = &'a Actor>,
    level: OwnershipLevel,
) -> Vec<ActorDelta> {
    actors
        .into_iter()
        .map(|actor| ActorDelta::new(actor.id).with(ActorChange::DefaultOwnership(level)))
        .collect()
}

/// Delta for an actor whose images were re-resolved, or `None` if nothing was found.
///
/// A portrait sets both `img` and the token texture; a token image then
/// overrides the token texture.
pub fn plan_image_refresh(id: ActorId, images: &ResolvedImages) -> Option<ActorDelta> {
    if images.is_empty() {
        return None;
    }
    let mut delta = ActorDelta::new(id);
    if let Some(portrait) = &images.portrait {
        delta = delta
            .with(ActorChange::Portrait(portrait.clone()))
            .with(ActorChange::TokenTexture(portrait.clone()));
    }
    if let Some(token) = &images.token {
        delta = delta.with(ActorChange::TokenTexture(token.clone()));
    }
    Some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_link_skips_already_linked() {
        let linked = Actor::new("A", None).with_actor_link(true);
        let unlinked = Actor::new("B", None);

        let plan = plan_actor_link([&linked, &unlinked]);

        assert_eq!(plan.already_linked, 1);
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].id, unlinked.id);
        assert_eq!(plan.updates[0].changes, vec![ActorChange::ActorLink(true)]);
    }

    #[test]
    fn test_default_ownership_for_each_actor() {
        let actors = vec![Actor::new("A", None), Actor::new("B", None)];
        let deltas = plan_default_ownership(&actors, OwnershipLevel::Limited);
        assert_eq!(deltas.len(), 2);
        assert!(deltas.iter().all(|d| d.paths() == vec!["ownership.default"]));
    }

    #[test]
    fn test_image_refresh_token_wins_texture() {
        let id = ActorId::new();
        let images = ResolvedImages {
            portrait: Some("base/mira.png".to_string()),
            token: Some("base/mira token.png".to_string()),
        };

        let mut actor = Actor::new("Mira", None);
        actor.id = id;
        let delta = plan_image_refresh(id, &images).expect("delta");
        actor.apply(&delta);

        assert_eq!(actor.img.as_deref(), Some("base/mira.png"));
        assert_eq!(
            actor.prototype_token.texture.src.as_deref(),
            Some("base/mira token.png")
        );
    }

    #[test]
    fn test_image_refresh_portrait_only_sets_texture_too() {
        let images = ResolvedImages {
            portrait: Some("mira.jpg".to_string()),
            token: None,
        };
        let delta = plan_image_refresh(ActorId::new(), &images).expect("delta");
        assert_eq!(delta.paths(), vec!["img", "prototypeToken.texture.src"]);
    }

    #[test]
    fn test_image_refresh_nothing_found() {
        assert_eq!(plan_image_refresh(ActorId::new(), &ResolvedImages::none()), None);
    }
}
