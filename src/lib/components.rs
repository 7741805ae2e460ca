use bevy::{
    prelude::{Component, ReflectComponent},
    reflect::Reflect,
};

// Tag the controller looks for unless configured otherwise
pub const PLAYER_TAG: &str = "Player";

// A label used to look entities up by name or category.
// Several entities may share a tag, lookups return the first one found.
#[derive(Component, Reflect, Default, Debug, Clone, PartialEq, Eq)]
#[reflect(Component)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.0 == tag
    }
}
