//! # Framebox Common
//!
//! Shared types for the Framebox crates:
//! - Error enums for import, asset persistence and tooling
//! - Schema version used by saved asset files
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::version::*;
}

pub use prelude::*;
