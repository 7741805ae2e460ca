use bevy::prelude::Entity;

use crate::components::Tag;

/// Returns the first entity whose tag equals `tag`.
///
/// Takes any iterator of tagged entities so callers can narrow the search
/// with their own query filters.
pub fn find_entity_by_tag<'a>(
    tagged: impl IntoIterator<Item = (Entity, &'a Tag)>,
    tag: &str,
) -> Option<Entity> {
    tagged
        .into_iter()
        .find(|(_, candidate)| candidate.is(tag))
        .map(|(entity, _)| entity)
}
