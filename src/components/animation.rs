//! Per-entity animation components.
//!
//! The game logic (outside this crate) decides what a character is doing by
//! writing its [`CharacterState`]. The playback systems in
//! [`crate::systems::animation`] turn that into an [`Animation`] key plus an
//! elapsed time, and from there into the [`Sprite`] source rectangle.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::sprite::Sprite;
use crate::resources::animationstore::{AnimationKey, AnimationStore, SpriteTableError};
use crate::resources::spritesheet::Direction;

/// What a character is currently doing and which way it faces.
#[derive(Debug, Clone, PartialEq, Component, Serialize, Deserialize)]
pub struct CharacterState {
    pub character: String,
    pub action: String,
    pub direction: Direction,
}

impl CharacterState {
    pub fn new(
        character: impl Into<String>,
        action: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            character: character.into(),
            action: action.into(),
            direction,
        }
    }

    pub fn key(&self) -> AnimationKey {
        AnimationKey::new(&self.character, &self.action, self.direction)
    }

    /// Switch action, keeping the facing.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }

    pub fn face(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

/// Playback state: which animation is playing and for how long.
#[derive(Debug, Clone, PartialEq, Component, Serialize, Deserialize)]
pub struct Animation {
    pub key: AnimationKey,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(key: AnimationKey) -> Self {
        Self {
            key,
            elapsed_time: 0.0,
        }
    }

    /// Play `key` from its first frame.
    pub fn restart(&mut self, key: AnimationKey) {
        self.key = key;
        self.elapsed_time = 0.0;
    }
}

/// Components for an animated character, with the sprite already showing the
/// first frame. Fails if the table has no animation for `state`.
pub fn animated_sprite(
    store: &AnimationStore,
    state: CharacterState,
) -> Result<(CharacterState, Animation, Sprite), SpriteTableError> {
    let clip = store.lookup(&state.character, &state.action, state.direction)?;
    let sprite = Sprite::new(store.image().clone(), clip.frame_at(0.0));
    let animation = Animation::new(clip.key().clone());
    Ok((state, animation, sprite))
}
