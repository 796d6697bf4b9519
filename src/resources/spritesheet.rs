//! Authored sprite sheet data.
//!
//! These types mirror the JSON the content authors write, field for field:
//!
//! ```json
//! {
//!   "imageUrl": "graphics/characters.gif",
//!   "sprites": [
//!     { "name": "mario", "action": "walking", "direction": "right",
//!       "animation": [[291, 44, 16, 16], [304, 44, 16, 16]],
//!       "animationSpeed": 0.25 }
//!   ]
//! }
//! ```
//!
//! Nothing here is validated. [`AnimationStore::from_sheet`] turns a
//! [`SpriteSheetData`] into the checked, indexed table.
//!
//! [`AnimationStore::from_sheet`]: crate::resources::animationstore::AnimationStore::from_sheet

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::animationstore::SpriteTableError;

/// Pixel rectangle of one frame inside the sprite sheet bitmap.
///
/// Serialized as the authored `[x, y, width, height]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers at least one pixel.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<[u32; 4]> for FrameRect {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<FrameRect> for [u32; 4] {
    fn from(rect: FrameRect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

impl fmt::Display for FrameRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Facing of a character. Each facing has its own frame set in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    /// Stable slot used by the store's index.
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`, expected `left` or `right`")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// One authored sprite entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteEntryData {
    /// Character key, e.g. `"mario"`.
    pub name: String,
    /// Behavioral state, e.g. `"walking"`.
    pub action: String,
    pub direction: Direction,
    /// Frames in playback order.
    pub animation: Vec<FrameRect>,
    /// Seconds each frame stays on screen.
    #[serde(rename = "animationSpeed")]
    pub animation_speed: f32,
}

/// The whole authored file: one sheet bitmap and its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheetData {
    /// Sheet bitmap, relative to the assets root.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub sprites: Vec<SpriteEntryData>,
}

/// Failure to bring sprite data from disk into a usable table.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid sprite data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Table(#[from] SpriteTableError),
}

impl SpriteSheetData {
    /// Parse the authored JSON format.
    pub fn from_json_str(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a sprite data file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_authored_entry() {
        let json = r#"{
            "imageUrl": "graphics/characters.gif",
            "sprites": [
                {"name" : "mario", "action": "walking", "direction": "left",
                 "animation": [ [206, 44, 16, 16 ],[193, 44, 16, 16 ]], "animationSpeed" : 0.250 }
            ]
        }"#;
        let sheet = SpriteSheetData::from_json_str(json).unwrap();
        assert_eq!(sheet.image_url, "graphics/characters.gif");
        assert_eq!(sheet.sprites.len(), 1);

        let entry = &sheet.sprites[0];
        assert_eq!(entry.name, "mario");
        assert_eq!(entry.action, "walking");
        assert_eq!(entry.direction, Direction::Left);
        assert_eq!(
            entry.animation,
            vec![FrameRect::new(206, 44, 16, 16), FrameRect::new(193, 44, 16, 16)]
        );
        assert_eq!(entry.animation_speed, 0.25);
    }

    #[test]
    fn integer_speed_is_accepted() {
        let json = r#"{"imageUrl": "a.gif", "sprites": [
            {"name": "mario", "action": "standing", "direction": "right",
             "animation": [[275, 44, 16, 16]], "animationSpeed": 1}
        ]}"#;
        let sheet = SpriteSheetData::from_json_str(json).unwrap();
        assert_eq!(sheet.sprites[0].animation_speed, 1.0);
    }

    #[test]
    fn negative_coordinates_are_rejected() {
        let json = r#"{"imageUrl": "a.gif", "sprites": [
            {"name": "mario", "action": "standing", "direction": "right",
             "animation": [[-1, 44, 16, 16]], "animationSpeed": 1}
        ]}"#;
        assert!(matches!(
            SpriteSheetData::from_json_str(json),
            Err(AssetError::Json(_))
        ));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let json = r#"{"imageUrl": "a.gif", "sprites": [
            {"name": "mario", "action": "standing", "direction": "up",
             "animation": [[0, 0, 16, 16]], "animationSpeed": 1}
        ]}"#;
        assert!(SpriteSheetData::from_json_str(json).is_err());
    }

    #[test]
    fn frame_rect_serializes_as_array() {
        let json = serde_json::to_string(&FrameRect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, "[1,2,3,4]");
    }

    #[test]
    fn direction_from_str() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" Right ".parse::<Direction>().unwrap(), Direction::Right);
        let err = "up".parse::<Direction>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown direction `up`, expected `left` or `right`"
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SpriteSheetData::load_from_file("does/not/exist.json").unwrap_err();
        match err {
            AssetError::Io { path, .. } => assert_eq!(path, PathBuf::from("does/not/exist.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
