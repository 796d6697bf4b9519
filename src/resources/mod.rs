//! ECS resources made available to systems.
//!
//! Long-lived data injected into the ECS world at boot and read by systems
//! during execution.
//!
//! Overview
//! - `animationstore` – the validated sprite animation table
//! - `assetpaths` – resolved bitmap paths handed to the engine
//! - `gameconfig` – INI-backed asset wiring and clock settings
//! - `spritesheet` – authored sprite data format
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod assetpaths;
pub mod gameconfig;
pub mod spritesheet;
pub mod worldtime;
