//! Animation systems.
//!
//! - [`sync_animation_state`] restarts playback when an entity's
//!   [`CharacterState`] asks for a different animation.
//! - [`animation`] advances elapsed time and writes the active frame to the
//!   entity's [`Sprite`].
//!
//! # Animation Flow
//!
//! 1. Animation data is defined in [`AnimationStore`]
//! 2. Game logic writes [`CharacterState`] (action and facing)
//! 3. `sync_animation_state` points [`Animation`] at the matching key, from frame 0
//! 4. `animation` samples [`SpriteAnimation::frame_at`] with the elapsed time
//!
//! [`SpriteAnimation::frame_at`]: crate::resources::animationstore::SpriteAnimation::frame_at

use bevy_ecs::prelude::*;
use log::{debug, error};

use crate::components::animation::{Animation, CharacterState};
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Follow changes of [`CharacterState`].
///
/// A changed state that still maps to the playing key keeps its elapsed time,
/// so re-asserting the same action does not restart the loop.
pub fn sync_animation_state(
    mut query: Query<(&CharacterState, &mut Animation), Changed<CharacterState>>,
) {
    for (state, mut animation) in query.iter_mut() {
        if animation
            .key
            .matches(&state.character, &state.action, state.direction)
        {
            continue;
        }
        debug!("Animation {} -> {}", animation.key, state.key());
        animation.restart(state.key());
    }
}

/// Advance animation playback and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Looks up animation data from [`AnimationStore`]; does nothing when the
///   world has no sprite table.
/// - A key missing from the table is a content defect: it is logged and the
///   sprite keeps its current frame.
pub fn animation(
    mut query: Query<(Entity, &mut Animation, &mut Sprite)>,
    animation_store: Option<Res<AnimationStore>>,
    time: Res<WorldTime>,
) {
    let Some(animation_store) = animation_store else {
        return;
    };

    for (entity, mut anim_comp, mut sprite) in query.iter_mut() {
        anim_comp.elapsed_time += time.delta;

        let Some(clip) = animation_store.get(&anim_comp.key) else {
            error!(
                "Entity {:?} plays unknown animation {}",
                entity, anim_comp.key
            );
            continue;
        };

        let frame = clip.frame_at(anim_comp.elapsed_time);
        if sprite.source != frame {
            sprite.source = frame;
        }
    }
}
