//! Sprite animation table library.
//!
//! Exposes the sprite animation table, the ECS components and systems that
//! play it back, and the bootstrap that hands both to the game engine.

pub mod bootstrap;
pub mod components;
pub mod resources;
pub mod systems;
