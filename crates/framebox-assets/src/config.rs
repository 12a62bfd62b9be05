//! Asset pipeline configuration.
//!
//! Loaded from `framebox.toml`. A missing or broken file is not fatal: the
//! defaults are used and the reason is logged.

use std::fs;
use std::path::{Path, PathBuf};

use framebox_common::AssetResult;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "framebox.toml";

/// Default directory for saved assets.
pub const DEFAULT_ASSET_DIR: &str = "assets/hitboxes";

/// Asset pipeline configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory where asset files are written and scanned
    pub asset_dir: PathBuf,
    /// Reject negative box sizes instead of clamping them to zero
    pub strict_validation: bool,
    /// Write asset files as indented JSON
    pub pretty_output: bool,
    /// Reload changed asset files when the library is polled
    pub hot_reload: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            strict_validation: false,
            pretty_output: true,
            hot_reload: cfg!(debug_assertions),
        }
    }
}

impl AssetConfig {
    /// Load configuration from the working directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> AssetResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }
}
