//! Hitbox asset container.
//!
//! A [`HitboxAsset`] holds every animation authored for one character or
//! entity, plus where it was imported from. Lookups hand out borrowed views
//! or copies and report a miss as `None` or an empty `Vec`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use framebox_core::{Animation, Frame, Hitbox, HitboxType, Socket, SpriteRef};
use serde::{Deserialize, Serialize};

/// Asset type tag used in asset ids.
pub const ASSET_TYPE: &str = "HitboxData";

/// Display name given to assets created without one.
pub const DEFAULT_DISPLAY_NAME: &str = "New Hitbox Data";

/// All hitbox data for a character or entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitboxAsset {
    /// Display name (e.g. character name)
    pub display_name: String,
    /// Animations in import order
    #[serde(default)]
    pub animations: Vec<Animation>,
    /// JSON file this asset was imported from, used by reimport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    /// Time of the last successful import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_import: Option<DateTime<Utc>>,
}

impl Default for HitboxAsset {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_NAME)
    }
}

impl HitboxAsset {
    /// Creates an empty asset.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            animations: Vec::new(),
            source_path: None,
            last_import: None,
        }
    }

    /// Adds an animation.
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animations.push(animation);
        self
    }

    /// Identifier of the form `HitboxData:<display name>`.
    #[must_use]
    pub fn asset_id(&self) -> String {
        format!("{ASSET_TYPE}:{}", self.display_name)
    }

    /// Names of all animations, in order.
    #[must_use]
    pub fn animation_names(&self) -> Vec<String> {
        self.animations.iter().map(|a| a.name.clone()).collect()
    }

    /// Returns the number of animations.
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Gets an animation by name, ignoring case.
    #[must_use]
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.is_named(name))
    }

    /// Gets an animation by index.
    #[must_use]
    pub fn animation_by_index(&self, index: usize) -> Option<&Animation> {
        self.animations.get(index)
    }

    /// Checks if an animation exists.
    #[must_use]
    pub fn has_animation(&self, name: &str) -> bool {
        self.animation(name).is_some()
    }

    /// Number of frames in an animation, 0 when it does not exist.
    #[must_use]
    pub fn frame_count(&self, animation: &str) -> usize {
        self.animation(animation).map_or(0, Animation::frame_count)
    }

    /// Gets a frame by animation name and frame index.
    #[must_use]
    pub fn frame(&self, animation: &str, index: usize) -> Option<&Frame> {
        self.animation(animation).and_then(|a| a.frame(index))
    }

    /// Gets a frame by animation name and frame name.
    #[must_use]
    pub fn frame_by_name(&self, animation: &str, frame: &str) -> Option<&Frame> {
        self.animation(animation).and_then(|a| a.frame_by_name(frame))
    }

    /// Finds the animation linked to a sprite sequence.
    #[must_use]
    pub fn find_animation_by_sprite(&self, sprite: &SpriteRef) -> Option<&Animation> {
        self.animations
            .iter()
            .find(|a| a.sprite.as_ref() == Some(sprite))
    }

    /// Copies all hitboxes of a frame.
    #[must_use]
    pub fn hitboxes(&self, animation: &str, index: usize) -> Vec<Hitbox> {
        self.frame(animation, index)
            .map(|f| f.hitboxes.clone())
            .unwrap_or_default()
    }

    /// Copies the hitboxes of one type from a frame.
    #[must_use]
    pub fn hitboxes_by_type(&self, animation: &str, index: usize, hitbox_type: HitboxType) -> Vec<Hitbox> {
        self.frame(animation, index)
            .map(|f| f.collect_hitboxes_of_type(hitbox_type))
            .unwrap_or_default()
    }

    /// Copies all sockets of a frame.
    #[must_use]
    pub fn sockets(&self, animation: &str, index: usize) -> Vec<Socket> {
        self.frame(animation, index)
            .map(|f| f.sockets.clone())
            .unwrap_or_default()
    }

    /// Finds a socket in a frame by name, ignoring case.
    #[must_use]
    pub fn find_socket(&self, animation: &str, index: usize, socket: &str) -> Option<&Socket> {
        self.frame(animation, index).and_then(|f| f.find_socket(socket))
    }
}
