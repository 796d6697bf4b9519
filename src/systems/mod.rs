//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – follow character state and advance sprite animations
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod time;
