//! # Framebox Core
//!
//! Frame-indexed hitboxes for 2D fighting games.
//!
//! This crate provides:
//! - Local-space data: hitboxes (attack, hurt, collision), sockets, frames
//!   and animations
//! - World-space projection (scale, horizontal flip, translation)
//! - Attack-versus-hurtbox hit detection with per-hit results
//! - Damage and knockback reductions over a batch of hits
//!
//! Every operation is a pure function over plain values. Nothing is cached
//! between calls, so the API can be used from any number of threads without
//! coordination. Loading and storing frame data lives in `framebox-assets`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod aggregate;
pub mod collision;
pub mod frame;
pub mod geometry;
pub mod hitbox;
pub mod projection;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregate::*;
    pub use crate::collision::*;
    pub use crate::frame::*;
    pub use crate::geometry::*;
    pub use crate::hitbox::*;
    pub use crate::projection::*;
}

pub use glam::{Vec2, Vec3};
pub use prelude::*;
