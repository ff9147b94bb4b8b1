//! Target eligibility and selection.

use rustc_hash::FxHashSet;

use pt_core::{EntityId, WorldPos};

use crate::Entity;

/// Hover text ending in "<ASCII word char>'s pet", any case.
pub fn is_pet(hover_text: &str) -> bool {
    hover_text
        .to_lowercase()
        .strip_suffix("'s pet")
        .and_then(|owner| owner.chars().last())
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A wild creature nobody owns: not an item, not a player, no kingdom, not
/// controlled, not preserved, not a pet.
pub fn is_wild(entity: &Entity) -> bool {
    !entity.item
        && !entity.player
        && entity.kingdom == 0
        && !entity.controlled
        && !entity.name.starts_with("preserved")
        && !is_pet(&entity.hover_text)
}

pub fn can_engage(entity: &Entity) -> bool {
    is_wild(entity)
}

pub fn can_groom(entity: &Entity) -> bool {
    is_wild(entity) && entity.groomable
}

/// The closest entity to `from` that passes `eligible` and is not ignored.
/// Ties go to the earlier entity.
pub fn nearest<F>(
    entities: Vec<Entity>,
    from: WorldPos,
    ignored: &FxHashSet<EntityId>,
    eligible: F,
) -> Option<Entity>
where
    F: Fn(&Entity) -> bool,
{
    entities
        .into_iter()
        .filter(|e| !ignored.contains(&e.id) && eligible(e))
        .min_by(|a, b| a.position.dist_sq(from).total_cmp(&b.position.dist_sq(from)))
}

/// First player whose name starts with `prefix`, ignoring case.
pub fn player_named(entities: Vec<Entity>, prefix: &str) -> Option<Entity> {
    let prefix = prefix.to_lowercase();
    entities
        .into_iter()
        .find(|e| e.player && e.name.to_lowercase().starts_with(&prefix))
}
