use std::sync::Arc;

use bevy_ecs::prelude::Component;

use crate::resources::spritesheet::FrameRect;

/// Sprite is identified by a texture key and the source rectangle of the
/// frame currently shown from that sprite sheet. The animation system keeps
/// `source` up to date; the engine draws it.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: Arc<str>,
    pub source: FrameRect,
}

impl Sprite {
    pub fn new(tex_key: impl Into<Arc<str>>, source: FrameRect) -> Self {
        Self {
            tex_key: tex_key.into(),
            source,
        }
    }
}
