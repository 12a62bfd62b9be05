//! Asset persistence and the in-memory asset library.
//!
//! Saved assets are JSON documents wrapped in a versioned envelope:
//!
//! ```json
//! { "version": { "major": 1, "minor": 0, "patch": 0 }, "asset": { ... } }
//! ```
//!
//! Files use the `.asset.json` suffix so they can sit next to the hitbox
//! JSON they were imported from without being picked up as sources.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use framebox_common::{AssetError, AssetResult, Compatibility, SchemaVersion};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::asset::HitboxAsset;
use crate::config::AssetConfig;

/// File name suffix of saved assets.
pub const ASSET_FILE_SUFFIX: &str = ".asset.json";

#[derive(Serialize)]
struct AssetFileRef<'a> {
    version: SchemaVersion,
    asset: &'a HitboxAsset,
}

#[derive(Deserialize)]
struct AssetFile {
    version: SchemaVersion,
    asset: HitboxAsset,
}

/// File name used for an asset called `name`.
#[must_use]
pub fn asset_file_name(name: &str) -> String {
    format!("{name}{ASSET_FILE_SUFFIX}")
}

/// Rejects names that would not stay a single file inside the asset
/// directory.
pub fn validate_asset_name(name: &str) -> AssetResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(AssetError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Checks whether a path looks like a saved asset.
#[must_use]
pub fn is_asset_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(ASSET_FILE_SUFFIX))
}

/// Writes an asset, creating parent directories as needed.
pub fn save_asset(asset: &HitboxAsset, path: &Path, pretty: bool) -> AssetResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = AssetFileRef {
        version: SchemaVersion::HITBOX_ASSET,
        asset,
    };
    let contents = if pretty {
        serde_json::to_string_pretty(&file)?
    } else {
        serde_json::to_string(&file)?
    };
    fs::write(path, contents)?;

    info!("Saved asset '{}' to {}", asset.display_name, path.display());
    Ok(())
}

/// Reads an asset saved by [`save_asset`].
pub fn load_asset(path: &Path) -> AssetResult<HitboxAsset> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let file: AssetFile = serde_json::from_str(&contents)?;

    match SchemaVersion::HITBOX_ASSET.compatibility(&file.version) {
        Compatibility::Incompatible => {
            return Err(AssetError::VersionMismatch {
                expected: SchemaVersion::HITBOX_ASSET.to_string(),
                actual: file.version.to_string(),
            });
        },
        Compatibility::NewerMinor => warn!(
            "{} was written as v{}, newer than v{}; unknown fields are dropped",
            path.display(),
            file.version,
            SchemaVersion::HITBOX_ASSET
        ),
        Compatibility::Exact | Compatibility::OlderMinor => {},
    }

    debug!("Loaded asset '{}' (v{})", file.asset.display_name, file.version);
    Ok(file.asset)
}

struct LibraryEntry {
    asset: Arc<HitboxAsset>,
    path: Option<PathBuf>,
    modified: Option<SystemTime>,
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Shared, thread-safe collection of loaded assets keyed by display name
/// (ignoring case).
///
/// Readers get `Arc` snapshots, so a reload never invalidates an asset that
/// another thread is still using.
pub struct AssetLibrary {
    config: AssetConfig,
    entries: RwLock<HashMap<String, LibraryEntry>>,
}

impl AssetLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new(config: AssetConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Number of loaded assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no assets are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Gets an asset by display name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<HitboxAsset>> {
        self.entries
            .read()
            .get(&name.to_ascii_lowercase())
            .map(|e| Arc::clone(&e.asset))
    }

    /// Display names of all loaded assets, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .values()
            .map(|e| e.asset.display_name.clone())
            .collect();
        names.sort();
        names
    }

    /// Adds an asset that is not backed by a file. Returns the asset it
    /// replaced, if any.
    pub fn insert(&self, asset: HitboxAsset) -> Option<Arc<HitboxAsset>> {
        self.insert_entry(LibraryEntry {
            asset: Arc::new(asset),
            path: None,
            modified: None,
        })
    }

    /// Removes an asset by display name.
    pub fn remove(&self, name: &str) -> Option<Arc<HitboxAsset>> {
        self.entries
            .write()
            .remove(&name.to_ascii_lowercase())
            .map(|e| e.asset)
    }

    fn insert_entry(&self, entry: LibraryEntry) -> Option<Arc<HitboxAsset>> {
        let key = entry.asset.display_name.to_ascii_lowercase();
        let mut entries = self.entries.write();

        // a file renamed its asset: drop the entry it used to back
        if let Some(path) = &entry.path {
            entries.retain(|k, e| *k == key || e.path.as_ref() != Some(path));
        }

        entries.insert(key, entry).map(|e| e.asset)
    }

    /// Loads one asset file into the library.
    pub fn load_file(&self, path: &Path) -> AssetResult<Arc<HitboxAsset>> {
        let modified = modified_time(path);
        let asset = Arc::new(load_asset(path)?);

        let replaced = self.insert_entry(LibraryEntry {
            asset: Arc::clone(&asset),
            path: Some(path.to_path_buf()),
            modified,
        });
        if replaced.is_some() {
            debug!("Replaced asset '{}' from {}", asset.display_name, path.display());
        }

        Ok(asset)
    }

    /// Loads every asset file in the configured directory, creating the
    /// directory when it does not exist. Files that fail to load are
    /// skipped. Returns the number of assets loaded.
    pub fn load_dir(&self) -> AssetResult<usize> {
        let dir = &self.config.asset_dir;
        if !dir.exists() {
            info!("Asset directory does not exist, creating: {}", dir.display());
            fs::create_dir_all(dir)?;
            return Ok(0);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_asset_file(p))
            .collect();
        paths.sort();

        let mut count = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(_) => count += 1,
                Err(e) => warn!("Failed to load asset file {}: {e}", path.display()),
            }
        }

        info!("Loaded {count} assets from {}", dir.display());
        Ok(count)
    }

    /// Reloads file-backed assets whose files changed since they were
    /// loaded and drops those whose files were deleted. Does nothing unless
    /// hot reload is enabled. Returns the number of assets reloaded.
    pub fn check_hot_reload(&self) -> usize {
        if !self.config.hot_reload {
            return 0;
        }

        self.entries.write().retain(|_, e| match &e.path {
            Some(path) if !path.exists() => {
                info!("Asset file {} was removed, dropping '{}'", path.display(), e.asset.display_name);
                false
            },
            _ => true,
        });

        let stale: Vec<PathBuf> = self
            .entries
            .read()
            .values()
            .filter_map(|e| {
                let path = e.path.as_ref()?;
                let now = modified_time(path)?;
                match e.modified {
                    Some(then) if now <= then => None,
                    _ => Some(path.clone()),
                }
            })
            .collect();

        let mut reloaded = 0;
        for path in stale {
            match self.load_file(&path) {
                Ok(asset) => {
                    info!("Reloaded asset '{}'", asset.display_name);
                    reloaded += 1;
                },
                Err(e) => warn!("Failed to reload asset file {}: {e}", path.display()),
            }
        }

        reloaded
    }
}

impl Default for AssetLibrary {
    fn default() -> Self {
        Self::new(AssetConfig::default())
    }
}
