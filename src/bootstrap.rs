//! Engine bootstrap.
//!
//! Resolves the asset paths and the sprite table into the [`EngineFlags`]
//! payload handed to the engine at startup, and builds the ECS [`World`] the
//! engine runs in.
//!
//! Two wirings exist and are kept as explicit [`BootVariant`]s:
//! - [`BootVariant::SpriteData`]: character sheet plus the sprite table.
//! - [`BootVariant::TileSet`]: character sheet plus a tile-set bitmap, no
//!   sprite table.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use log::{info, warn};
use thiserror::Error;

use crate::resources::animationstore::AnimationStore;
use crate::resources::assetpaths::AssetPaths;
use crate::resources::gameconfig::GameConfig;
use crate::resources::spritesheet::AssetError;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{animation, sync_animation_state};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BootVariant {
    #[default]
    SpriteData,
    TileSet,
}

impl BootVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BootVariant::SpriteData => "sprites",
            BootVariant::TileSet => "tileset",
        }
    }
}

impl fmt::Display for BootVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BootVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sprites" | "sprite_data" => Ok(BootVariant::SpriteData),
            "tileset" | "tile_set" => Ok(BootVariant::TileSet),
            other => Err(format!("Unknown boot variant '{}'", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum BootError {
    #[error("{0}")]
    Config(String),
    #[error("failed to load sprite data: {0}")]
    Asset(#[from] AssetError),
    #[error("boot variant 'tileset' needs [assets] tileset to name an image")]
    MissingTileset,
}

/// What the engine receives at startup.
#[derive(Debug, Clone)]
pub struct EngineFlags {
    pub characters_path: PathBuf,
    pub tileset_path: Option<PathBuf>,
    pub sprites: Option<AnimationStore>,
}

impl EngineFlags {
    pub fn variant(&self) -> BootVariant {
        if self.sprites.is_some() {
            BootVariant::SpriteData
        } else {
            BootVariant::TileSet
        }
    }

    pub fn asset_paths(&self) -> AssetPaths {
        AssetPaths {
            characters: self.characters_path.clone(),
            tileset: self.tileset_path.clone(),
        }
    }
}

/// Load the configured sprite table, from file or the built-in one.
pub fn load_sprites(config: &GameConfig) -> Result<AnimationStore, AssetError> {
    match config.sprites_path() {
        Some(path) => {
            info!("Loading sprite data from {:?}", path);
            AnimationStore::load_from_file(path)
        }
        None => {
            info!("Using built-in sprite data");
            AnimationStore::builtin()
        }
    }
}

/// Produce the engine payload for the configured variant.
///
/// The sprite table is validated here, so content errors surface before the
/// engine starts.
pub fn boot(config: &GameConfig) -> Result<EngineFlags, BootError> {
    let characters_path = config.characters_path();

    let flags = match config.variant {
        BootVariant::SpriteData => {
            let store = load_sprites(config)?;
            let sheet_path = config.resolve(&**store.image());
            if sheet_path != characters_path {
                warn!(
                    "Sprite data refers to sheet {:?} but characters image is {:?}",
                    sheet_path, characters_path
                );
            }
            EngineFlags {
                characters_path,
                tileset_path: None,
                sprites: Some(store),
            }
        }
        BootVariant::TileSet => {
            if config.tileset_image.as_os_str().is_empty() {
                return Err(BootError::MissingTileset);
            }
            EngineFlags {
                characters_path,
                tileset_path: Some(config.tileset_path()),
                sprites: None,
            }
        }
    };

    info!(
        "Boot variant '{}': characters={:?}, tileset={:?}, sprites={}",
        flags.variant(),
        flags.characters_path,
        flags.tileset_path,
        flags.sprites.as_ref().map_or(0, AnimationStore::len)
    );

    Ok(flags)
}

/// Build the world the engine runs in, with the boot payload as resources.
pub fn build_world(flags: &EngineFlags, time_scale: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(time_scale));
    world.insert_resource(flags.asset_paths());
    if let Some(store) = &flags.sprites {
        world.insert_resource(store.clone());
    }
    world
}

/// Schedule that drives sprite playback. Run once per rendered frame, after
/// [`update_world_time`](crate::systems::time::update_world_time).
pub fn animation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((sync_animation_state, animation).chain());
    schedule
}
