//! Sprite animation table.
//!
//! [`AnimationStore`] is the validated, read-only registry of every sprite
//! animation in the game, keyed by `(character, action, direction)`. It is
//! built once at startup from [`SpriteSheetData`] and never mutated after
//! that. Cloning the store is cheap and shares the same table, so the
//! hosting application and the engine can each hold one.
//!
//! Playback is a pure function of elapsed time, see
//! [`SpriteAnimation::frame_at`]. The playback state itself lives on
//! entities, in [`crate::components::animation::Animation`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::resources::spritesheet::{
    AssetError, Direction, FrameRect, SpriteEntryData, SpriteSheetData,
};

/// Sprite data shipped with the game.
const BUILTIN_SPRITES: &str = include_str!("../../assets/data/sprites.json");

/// Typed lookup key of one animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationKey {
    pub character: String,
    pub action: String,
    pub direction: Direction,
}

impl AnimationKey {
    pub fn new(
        character: impl Into<String>,
        action: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            character: character.into(),
            action: action.into(),
            direction,
        }
    }

    /// Compare against a borrowed triple without allocating.
    pub fn matches(&self, character: &str, action: &str, direction: Direction) -> bool {
        self.direction == direction && self.character == character && self.action == action
    }
}

impl fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.character, self.action, self.direction)
    }
}

/// Why a single authored entry was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedReason {
    #[error("character name is empty")]
    EmptyCharacter,
    #[error("action name is empty")]
    EmptyAction,
    #[error("animation has no frames")]
    NoFrames,
    #[error("frame {frame} {rect} has zero width or height")]
    EmptyFrame { frame: usize, rect: FrameRect },
    #[error("animation speed {0} must be a positive number")]
    InvalidSpeed(f32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpriteTableError {
    /// No entry for the requested key. This is a content defect.
    #[error("no sprite animation for {key}")]
    NotFound { key: AnimationKey },
    #[error("sprite entry #{index} is malformed: {reason}")]
    Malformed {
        index: usize,
        reason: MalformedReason,
    },
    #[error("sprite entry #{second} redefines {key}, first defined by entry #{first}")]
    DuplicateKey {
        key: AnimationKey,
        first: usize,
        second: usize,
    },
}

impl SpriteTableError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SpriteTableError::NotFound { .. })
    }

    /// True for every load-time rejection of the table content.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            SpriteTableError::Malformed { .. } | SpriteTableError::DuplicateKey { .. }
        )
    }
}

/// One validated animation clip.
///
/// `frames` is never empty, every frame has an area, and `frame_duration`
/// is finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAnimation {
    key: AnimationKey,
    frames: SmallVec<[FrameRect; 4]>,
    frame_duration: f32,
}

impl SpriteAnimation {
    fn from_entry(index: usize, entry: SpriteEntryData) -> Result<Self, SpriteTableError> {
        let malformed = |reason| SpriteTableError::Malformed { index, reason };

        if entry.name.trim().is_empty() {
            return Err(malformed(MalformedReason::EmptyCharacter));
        }
        if entry.action.trim().is_empty() {
            return Err(malformed(MalformedReason::EmptyAction));
        }
        if entry.animation.is_empty() {
            return Err(malformed(MalformedReason::NoFrames));
        }
        if let Some((frame, rect)) = entry
            .animation
            .iter()
            .enumerate()
            .find(|(_, rect)| !rect.has_area())
        {
            return Err(malformed(MalformedReason::EmptyFrame {
                frame,
                rect: *rect,
            }));
        }
        if !(entry.animation_speed.is_finite() && entry.animation_speed > 0.0) {
            return Err(malformed(MalformedReason::InvalidSpeed(
                entry.animation_speed,
            )));
        }

        Ok(Self {
            key: AnimationKey::new(entry.name, entry.action, entry.direction),
            frames: SmallVec::from_vec(entry.animation),
            frame_duration: entry.animation_speed,
        })
    }

    pub fn key(&self) -> &AnimationKey {
        &self.key
    }

    pub fn character(&self) -> &str {
        &self.key.character
    }

    pub fn action(&self) -> &str {
        &self.key.action
    }

    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    /// Seconds each frame is displayed.
    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    /// Length of one full loop through the frames.
    pub fn cycle_duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }

    pub fn is_static(&self) -> bool {
        self.frames.len() == 1
    }

    /// Index of the frame shown after `elapsed` seconds of playback.
    ///
    /// Animations loop forever. Negative or non-finite times sample frame 0.
    pub fn frame_index_at(&self, elapsed: f32) -> usize {
        if !(elapsed.is_finite() && elapsed > 0.0) {
            return 0;
        }
        let step = (elapsed / self.frame_duration).floor() as u64;
        (step % self.frames.len() as u64) as usize
    }

    /// Frame shown after `elapsed` seconds of playback.
    ///
    /// Periodic in [`cycle_duration`](Self::cycle_duration), up to f32
    /// rounding for times within an ulp of a frame boundary.
    pub fn frame_at(&self, elapsed: f32) -> FrameRect {
        self.frames[self.frame_index_at(elapsed)]
    }

    /// Endless frame sequence sampled every `dt` seconds, starting at 0.
    pub fn frames_iter(&self, dt: f32) -> impl Iterator<Item = FrameRect> + '_ {
        (0u64..).map(move |tick| self.frame_at(tick as f32 * dt))
    }
}

/// character -> action -> entry index per direction
type KeyIndex = FxHashMap<String, FxHashMap<String, [Option<usize>; 2]>>;

#[derive(Debug)]
struct StoreInner {
    image: Arc<str>,
    entries: Vec<SpriteAnimation>,
    index: KeyIndex,
}

/// Immutable registry of sprite animations for one sprite sheet.
#[derive(Resource, Debug, Clone)]
pub struct AnimationStore {
    inner: Arc<StoreInner>,
}

impl AnimationStore {
    /// Validate the authored sheet and build the lookup index.
    ///
    /// Fails on the first malformed or duplicated entry.
    pub fn from_sheet(sheet: SpriteSheetData) -> Result<Self, SpriteTableError> {
        let mut entries = Vec::with_capacity(sheet.sprites.len());
        let mut index = KeyIndex::default();

        for (i, entry) in sheet.sprites.into_iter().enumerate() {
            let animation = SpriteAnimation::from_entry(i, entry)?;
            let key = animation.key();
            let slot = &mut index
                .entry(key.character.clone())
                .or_default()
                .entry(key.action.clone())
                .or_default()[key.direction.index()];
            if let Some(first) = *slot {
                return Err(SpriteTableError::DuplicateKey {
                    key: key.clone(),
                    first,
                    second: i,
                });
            }
            *slot = Some(i);
            entries.push(animation);
        }

        info!(
            "Loaded {} sprite animations for {} character(s) from sheet {}",
            entries.len(),
            index.len(),
            sheet.image_url
        );

        Ok(Self {
            inner: Arc::new(StoreInner {
                image: Arc::from(sheet.image_url),
                entries,
                index,
            }),
        })
    }

    /// Parse and validate the authored JSON format.
    pub fn from_json_str(json: &str) -> Result<Self, AssetError> {
        let sheet = SpriteSheetData::from_json_str(json)?;
        Ok(Self::from_sheet(sheet)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let sheet = SpriteSheetData::load_from_file(path)?;
        Ok(Self::from_sheet(sheet)?)
    }

    /// The table shipped with the game.
    pub fn builtin() -> Result<Self, AssetError> {
        Self::from_json_str(BUILTIN_SPRITES)
    }

    /// Sprite sheet bitmap reference, as authored.
    pub fn image(&self) -> &Arc<str> {
        &self.inner.image
    }

    fn position(&self, character: &str, action: &str, direction: Direction) -> Option<usize> {
        self.inner
            .index
            .get(character)?
            .get(action)?
            .get(direction.index())
            .copied()
            .flatten()
    }

    /// Resolve a key triple to its animation.
    pub fn lookup(
        &self,
        character: &str,
        action: &str,
        direction: Direction,
    ) -> Result<&SpriteAnimation, SpriteTableError> {
        self.position(character, action, direction)
            .map(|i| &self.inner.entries[i])
            .ok_or_else(|| SpriteTableError::NotFound {
                key: AnimationKey::new(character, action, direction),
            })
    }

    pub fn get(&self, key: &AnimationKey) -> Option<&SpriteAnimation> {
        self.position(&key.character, &key.action, key.direction)
            .map(|i| &self.inner.entries[i])
    }

    pub fn contains(&self, key: &AnimationKey) -> bool {
        self.get(key).is_some()
    }

    /// All animations in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &SpriteAnimation> {
        self.inner.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Distinct character names, in the order they first appear.
    pub fn characters(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.inner.index.len());
        for entry in &self.inner.entries {
            if !names.contains(&entry.character()) {
                names.push(entry.character());
            }
        }
        names
    }

    /// Actions defined for a character, in authored order.
    pub fn actions(&self, character: &str) -> Vec<&str> {
        let mut actions: Vec<&str> = Vec::new();
        for entry in self.iter().filter(|e| e.character() == character) {
            if !actions.contains(&entry.action()) {
                actions.push(entry.action());
            }
        }
        actions
    }

    /// The validated table back in its authored form.
    pub fn to_sheet(&self) -> SpriteSheetData {
        SpriteSheetData {
            image_url: self.inner.image.to_string(),
            sprites: self
                .iter()
                .map(|clip| SpriteEntryData {
                    name: clip.character().to_string(),
                    action: clip.action().to_string(),
                    direction: clip.direction(),
                    animation: clip.frames().to_vec(),
                    animation_speed: clip.frame_duration(),
                })
                .collect(),
        }
    }
}
