//! Resolved asset locations handed to the engine.

use std::path::PathBuf;

use bevy_ecs::prelude::Resource;

/// Bitmaps the engine loads itself. Paths are already joined with the
/// assets root; existence is not checked here.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Character sprite sheet.
    pub characters: PathBuf,
    /// Tile-set bitmap, only present for the tile-set boot variant.
    pub tileset: Option<PathBuf>,
}
