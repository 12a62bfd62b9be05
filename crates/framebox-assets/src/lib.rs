//! # Framebox Assets
//!
//! Hitbox data as authored content:
//! - [`HitboxAsset`]: every animation of one character, with lookups
//! - JSON import from the hitbox editor, including reimport from the
//!   recorded source file
//! - Versioned asset files and a shared [`AssetLibrary`] with hot reload
//! - [`AssetConfig`] loaded from `framebox.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod asset;
pub mod config;
pub mod import;
pub mod store;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::asset::*;
    pub use crate::config::*;
    pub use crate::import::*;
    pub use crate::store::*;
}

pub use prelude::*;
