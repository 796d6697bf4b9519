//! Game configuration resource.
//!
//! Manages the asset wiring and clock settings loaded from an INI
//! configuration file. Provides defaults for safe startup and methods to
//! load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [assets]
//! root = ./assets
//! characters = graphics/characters.gif
//! tileset = graphics/tileset.gif
//! sprites = data/sprites.json
//!
//! [boot]
//! variant = sprites
//!
//! [time]
//! time_scale = 1.0
//! ```
//!
//! `sprites = builtin` (or no `sprites` key at all) selects the sprite table
//! compiled into the binary.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::bootstrap::BootVariant;

/// Default safe values for startup
const DEFAULT_ASSETS_ROOT: &str = "./assets";
const DEFAULT_CHARACTERS_IMAGE: &str = "graphics/characters.gif";
const DEFAULT_TILESET_IMAGE: &str = "graphics/tileset.gif";
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const BUILTIN_SPRITES: &str = "builtin";

/// Game configuration resource.
///
/// Stores where the engine's bitmaps and the sprite data live, which boot
/// wiring to produce, and the clock scale.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Directory every asset path below is relative to.
    pub assets_root: PathBuf,
    /// Character sprite sheet bitmap.
    pub characters_image: PathBuf,
    /// Tile-set bitmap.
    pub tileset_image: PathBuf,
    /// Sprite data file. `None` selects the built-in table.
    pub sprites_data: Option<PathBuf>,
    /// Which engine wiring to boot.
    pub variant: BootVariant,
    /// Multiplier applied to every frame delta.
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            characters_image: PathBuf::from(DEFAULT_CHARACTERS_IMAGE),
            tileset_image: PathBuf::from(DEFAULT_TILESET_IMAGE),
            sprites_data: None,
            variant: BootVariant::default(),
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.assets_root = PathBuf::from(root);
        }
        if let Some(characters) = config.get("assets", "characters") {
            self.characters_image = PathBuf::from(characters);
        }
        if let Some(tileset) = config.get("assets", "tileset") {
            self.tileset_image = PathBuf::from(tileset);
        }
        if let Some(sprites) = config.get("assets", "sprites") {
            self.sprites_data = if sprites.is_empty() || sprites == BUILTIN_SPRITES {
                None
            } else {
                Some(PathBuf::from(sprites))
            };
        }

        // [boot] section
        if let Some(variant) = config.get("boot", "variant") {
            match variant.parse() {
                Ok(v) => self.variant = v,
                Err(e) => warn!("{}; keeping {:?}", e, self.variant),
            }
        }

        // [time] section
        match config.getfloat("time", "time_scale") {
            Ok(Some(scale)) if scale.is_finite() && scale >= 0.0 => {
                self.time_scale = scale as f32
            }
            Ok(Some(scale)) => warn!("Ignoring invalid time_scale {}", scale),
            Ok(None) => {}
            Err(e) => warn!("Ignoring time_scale: {}", e),
        }

        info!(
            "Loaded config: assets={:?}, characters={:?}, tileset={:?}, sprites={:?}, variant={:?}, time_scale={}",
            self.assets_root,
            self.characters_image,
            self.tileset_image,
            self.sprites_data,
            self.variant,
            self.time_scale
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [assets] section
        config.set(
            "assets",
            "root",
            Some(self.assets_root.display().to_string()),
        );
        config.set(
            "assets",
            "characters",
            Some(self.characters_image.display().to_string()),
        );
        config.set(
            "assets",
            "tileset",
            Some(self.tileset_image.display().to_string()),
        );
        let sprites = match &self.sprites_data {
            Some(path) => path.display().to_string(),
            None => BUILTIN_SPRITES.to_string(),
        };
        config.set("assets", "sprites", Some(sprites));

        // [boot] section
        config.set("boot", "variant", Some(self.variant.as_str().to_string()));

        // [time] section
        config.set("time", "time_scale", Some(self.time_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Join a path with the assets root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.assets_root.join(relative)
    }

    pub fn characters_path(&self) -> PathBuf {
        self.resolve(&self.characters_image)
    }

    pub fn tileset_path(&self) -> PathBuf {
        self.resolve(&self.tileset_image)
    }

    /// Resolved sprite data file, or `None` for the built-in table.
    pub fn sprites_path(&self) -> Option<PathBuf> {
        self.sprites_data.as_ref().map(|p| self.resolve(p))
    }
}
