//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – what a character is doing and its playback state
//! - [`sprite`] – texture key and current source rectangle for the engine

pub mod animation;
pub mod sprite;
