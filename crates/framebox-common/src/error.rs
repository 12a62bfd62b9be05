//! Error types for Framebox.
//!
//! The collision core is infallible; everything here belongs to the import,
//! persistence and tooling layers around it.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for Framebox operations.
#[derive(Debug, Error)]
pub enum FrameboxError {
    /// JSON import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Asset file and library errors
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Errors raised while turning hitbox JSON into animations.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Source file could not be read
    #[error("Failed to read file: {path}")]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document root is valid JSON but not an object
    #[error("JSON root must be an object")]
    NotAnObject,

    /// A record violates a data invariant (strict mode only)
    #[error("Invalid hitbox data: {0}")]
    Validation(String),

    /// Reimport requested on an asset that never recorded its source
    #[error("No source file path stored")]
    NoSourcePath,

    /// Stored source path no longer exists
    #[error("Source file not found: {0}")]
    SourceMissing(PathBuf),
}

/// Errors raised by asset persistence and the asset library.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset file not found
    #[error("Asset file not found: {0}")]
    NotFound(PathBuf),

    /// IO error while reading or writing an asset file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset file is not valid JSON or does not match the asset layout
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Asset name cannot be used as a file name
    #[error("Invalid asset name: {0:?}")]
    InvalidName(String),

    /// Configuration file could not be encoded
    #[error("Config encoding error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Actual version found
        actual: String,
    },
}

/// Result type alias for Framebox operations.
pub type FrameboxResult<T> = Result<T, FrameboxError>;

/// Result type alias for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type alias for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;
