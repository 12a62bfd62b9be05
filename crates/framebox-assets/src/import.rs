//! Hitbox JSON import.
//!
//! The hitbox editor has exported three layouts over time and all of them
//! are still accepted. Each root entry is classified on its own:
//!
//! ```text
//! nested:  { "Jab": { "sprite": "...", "frames": { "f0": { "hitboxes": [..] } } } }
//! grouped: { "Jab": { "f0": { "hitboxes": [..] }, "f1": { .. } } }
//! flat:    { "f0": { "hitboxes": [..] }, "f1": { .. } }
//! ```
//!
//! An explicit `frames` object wins, then grouped detection (some child has
//! `hitboxes` or `sockets`), then the entry itself is taken as a flat frame
//! of the synthesized `Default` animation. There is no version tag, so an
//! animation whose only frame is named `frames` is read as nested.
//!
//! Flat frames join an existing animation named `Default` in any letter
//! case. `Default` is only created once a flat frame is found: root objects
//! without frame data (metadata blocks and the like) are skipped and never
//! leave an empty `Default` animation behind.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use framebox_common::{FrameboxResult, ImportError, ImportResult};
use framebox_core::{Animation, Frame, Hitbox, HitboxType, Socket, SpriteRef};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::asset::HitboxAsset;
use crate::config::AssetConfig;
use crate::store;

/// Animation that collects frames from the flat layout.
pub const DEFAULT_ANIMATION: &str = "Default";

/// Options that change how records are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOptions {
    /// Fail on negative box sizes instead of clamping them to zero.
    pub strict: bool,
}

impl From<&AssetConfig> for ImportOptions {
    fn from(config: &AssetConfig) -> Self {
        Self {
            strict: config.strict_validation,
        }
    }
}

enum EntryShape<'a> {
    Nested(&'a Map<String, Value>),
    Grouped,
    Flat,
    Unrecognized,
}

fn is_frame_record(object: &Map<String, Value>) -> bool {
    object.contains_key("hitboxes") || object.contains_key("sockets")
}

fn classify(entry: &Map<String, Value>) -> EntryShape<'_> {
    if let Some(Value::Object(frames)) = entry.get("frames") {
        return EntryShape::Nested(frames);
    }

    let grouped = entry
        .values()
        .any(|child| child.as_object().is_some_and(is_frame_record));
    if grouped {
        return EntryShape::Grouped;
    }

    if is_frame_record(entry) {
        EntryShape::Flat
    } else {
        EntryShape::Unrecognized
    }
}

/// Parses hitbox JSON into animations, in document order.
pub fn parse_animations(json: &str, options: ImportOptions) -> ImportResult<Vec<Animation>> {
    let root: Value = serde_json::from_str(json)?;
    let Value::Object(root) = root else {
        return Err(ImportError::NotAnObject);
    };

    let mut animations: Vec<Animation> = Vec::new();

    for (key, value) in &root {
        let Some(entry) = value.as_object() else {
            debug!("Skipping non-object root entry '{key}'");
            continue;
        };

        match classify(entry) {
            EntryShape::Nested(frames) => {
                let mut animation = Animation::new(key.as_str());
                animation.sprite = sprite_hint(entry);
                animation.frames = parse_frames(key, frames, options)?;
                debug!("Animation '{key}': {} frames", animation.frame_count());
                animations.push(animation);
            },
            EntryShape::Grouped => {
                let mut animation = Animation::new(key.as_str());
                animation.frames = parse_frames(key, entry, options)?;
                if animation.frames.is_empty() {
                    continue;
                }
                debug!("Animation '{key}' (grouped): {} frames", animation.frame_count());
                animations.push(animation);
            },
            EntryShape::Flat => {
                let frame = parse_frame(DEFAULT_ANIMATION, key, entry, options)?;
                let index = match animations.iter().position(|a| a.is_named(DEFAULT_ANIMATION)) {
                    Some(index) => index,
                    None => {
                        animations.push(Animation::new(DEFAULT_ANIMATION));
                        animations.len() - 1
                    },
                };
                animations[index].frames.push(frame);
            },
            EntryShape::Unrecognized => {
                debug!("Skipping root entry '{key}': no frame data");
            },
        }
    }

    Ok(animations)
}

fn sprite_hint(entry: &Map<String, Value>) -> Option<SpriteRef> {
    ["sprite", "flipbook"]
        .iter()
        .filter_map(|field| entry.get(*field).and_then(Value::as_str))
        .find(|hint| !hint.is_empty())
        .map(SpriteRef::new)
}

fn parse_frames(
    animation: &str,
    frames: &Map<String, Value>,
    options: ImportOptions,
) -> ImportResult<Vec<Frame>> {
    frames
        .iter()
        .filter_map(|(name, value)| value.as_object().map(|object| (name, object)))
        .map(|(name, object)| parse_frame(animation, name, object, options))
        .collect()
}

fn parse_frame(
    animation: &str,
    name: &str,
    object: &Map<String, Value>,
    options: ImportOptions,
) -> ImportResult<Frame> {
    let mut frame = Frame::new(name);

    if let Some(records) = object.get("hitboxes").and_then(Value::as_array) {
        for (index, record) in records.iter().enumerate() {
            if let Some(record) = record.as_object() {
                let hitbox = parse_hitbox(record);
                frame
                    .hitboxes
                    .push(validate_hitbox(hitbox, animation, name, index, options)?);
            }
        }
    }

    if let Some(records) = object.get("sockets").and_then(Value::as_array) {
        frame
            .sockets
            .extend(records.iter().filter_map(Value::as_object).map(parse_socket));
    }

    Ok(frame)
}

/// Reads a JSON number and truncates it toward zero, 0 when absent.
fn number(value: Option<&Value>) -> i32 {
    value.and_then(Value::as_f64).map_or(0, |n| n as i32)
}

/// Reads the first `N` numbers of an array field, all zero when too short.
fn numbers<const N: usize>(object: &Map<String, Value>, field: &str) -> [i32; N] {
    let mut out = [0; N];
    if let Some(values) = object.get(field).and_then(Value::as_array) {
        if values.len() >= N {
            for (slot, value) in out.iter_mut().zip(values) {
                *slot = number(Some(value));
            }
        }
    }
    out
}

fn parse_hitbox(record: &Map<String, Value>) -> Hitbox {
    let hitbox_type = record
        .get("type")
        .and_then(Value::as_str)
        .map_or(HitboxType::Attack, HitboxType::parse);
    let [x, y, width, height] = numbers::<4>(record, "rect");

    Hitbox {
        hitbox_type,
        x,
        y,
        width,
        height,
        damage: number(record.get("damage")),
        knockback: number(record.get("knockback")),
    }
}

fn parse_socket(record: &Map<String, Value>) -> Socket {
    let name = record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let [x, y] = numbers::<2>(record, "pos");
    Socket::new(name, x, y)
}

fn validate_hitbox(
    mut hitbox: Hitbox,
    animation: &str,
    frame: &str,
    index: usize,
    options: ImportOptions,
) -> ImportResult<Hitbox> {
    if hitbox.width >= 0 && hitbox.height >= 0 {
        return Ok(hitbox);
    }

    if options.strict {
        return Err(ImportError::Validation(format!(
            "{animation}/{frame} hitbox {index} has negative size {}x{}",
            hitbox.width, hitbox.height
        )));
    }

    warn!(
        "{animation}/{frame} hitbox {index} has negative size {}x{}, clamping to zero",
        hitbox.width, hitbox.height
    );
    hitbox.width = hitbox.width.max(0);
    hitbox.height = hitbox.height.max(0);
    Ok(hitbox)
}

fn read_source(path: &Path) -> ImportResult<String> {
    fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds and refreshes [`HitboxAsset`]s from hitbox JSON files.
#[derive(Debug, Clone, Default)]
pub struct HitboxImporter {
    config: AssetConfig,
}

impl HitboxImporter {
    /// Creates an importer.
    #[must_use]
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Imports a JSON file into a new asset named `asset_name`.
    pub fn import_file(&self, json_path: &Path, asset_name: &str) -> ImportResult<HitboxAsset> {
        let json = read_source(json_path)?;
        let animations = parse_animations(&json, ImportOptions::from(&self.config))?;

        info!(
            "Imported {} animations from {}",
            animations.len(),
            json_path.display()
        );

        Ok(HitboxAsset {
            display_name: asset_name.to_string(),
            animations,
            source_path: Some(json_path.to_path_buf()),
            last_import: Some(Utc::now()),
        })
    }

    /// Imports a JSON file and saves the asset into the configured asset
    /// directory. The asset is named after the file stem unless a name is
    /// given, and a name with path separators is rejected. Returns the saved
    /// asset path.
    pub fn import_to_dir(&self, json_path: &Path, asset_name: Option<&str>) -> FrameboxResult<PathBuf> {
        let stem = json_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "hitboxes".to_string());
        let name = asset_name.unwrap_or(&stem);
        store::validate_asset_name(name)?;

        let asset = self.import_file(json_path, name)?;
        let out = self.config.asset_dir.join(store::asset_file_name(name));
        store::save_asset(&asset, &out, self.config.pretty_output)?;
        Ok(out)
    }

    /// Re-reads an asset's source file and replaces its animations.
    ///
    /// Sprite links survive by animation name (ignoring case) unless the
    /// new JSON carries its own hint. On error the asset is left untouched.
    pub fn reimport(&self, asset: &mut HitboxAsset) -> ImportResult<()> {
        let path = asset.source_path.clone().ok_or(ImportError::NoSourcePath)?;
        if !path.exists() {
            return Err(ImportError::SourceMissing(path));
        }

        let json = read_source(&path)?;
        let mut animations = parse_animations(&json, ImportOptions::from(&self.config))?;

        let existing: HashMap<String, SpriteRef> = asset
            .animations
            .iter()
            .filter_map(|a| a.sprite.clone().map(|s| (a.name.to_ascii_lowercase(), s)))
            .collect();

        for animation in &mut animations {
            if animation.sprite.is_none() {
                animation.sprite = existing.get(&animation.name.to_ascii_lowercase()).cloned();
            }
        }

        info!(
            "Reimported '{}': {} animations from {}",
            asset.display_name,
            animations.len(),
            path.display()
        );

        asset.animations = animations;
        asset.last_import = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use framebox_common::{AssetError, FrameboxError};

    use super::*;

    const NESTED: &str = r#"{
        "Jab": {
            "sprite": "/Game/Ryu/FB_Jab",
            "frames": {
                "startup": { "hitboxes": [ { "type": "hurtbox", "rect": [-10, -60, 20, 60] } ] },
                "active": {
                    "hitboxes": [
                        { "type": "hurtbox", "rect": [-10, -60, 20, 60] },
                        { "type": "attack", "rect": [10, -45, 25, 10], "damage": 4, "knockback": 2 }
                    ],
                    "sockets": [ { "name": "fist", "pos": [35, -40] } ]
                }
            }
        },
        "Taunt": { "frames": {} }
    }"#;

    fn parse(json: &str) -> Vec<Animation> {
        parse_animations(json, ImportOptions::default()).unwrap()
    }

    #[test]
    fn test_nested_layout() {
        let animations = parse(NESTED);
        assert_eq!(animations.len(), 2);

        let jab = &animations[0];
        assert_eq!(jab.name, "Jab");
        assert_eq!(jab.sprite, Some(SpriteRef::new("/Game/Ryu/FB_Jab")));
        assert_eq!(jab.frame_count(), 2);
        assert_eq!(jab.frames[0].name, "startup");

        let active = &jab.frames[1];
        assert_eq!(active.hitboxes[1], Hitbox::attack(10, -45, 25, 10, 4, 2));
        assert_eq!(active.sockets[0], Socket::new("fist", 35, -40));

        // nested animations are kept even without frames
        assert_eq!(animations[1].name, "Taunt");
        assert_eq!(animations[1].frame_count(), 0);
    }

    #[test]
    fn test_grouped_layout() {
        let json = r#"{
            "Walk": {
                "walk_0": { "hitboxes": [ { "type": "Hurtbox", "rect": [0, 0, 10, 10] } ] },
                "note": "ignored",
                "walk_1": { "sockets": [] }
            },
            "Empty": { "comment": "no frames here" }
        }"#;

        let animations = parse(json);
        assert_eq!(animations.len(), 1);
        let walk = &animations[0];
        assert_eq!(walk.name, "Walk");
        assert!(walk.sprite.is_none());
        let names: Vec<&str> = walk.frames.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["walk_0", "walk_1"]);
    }

    #[test]
    fn test_flat_layout_collects_into_default() {
        let json = r#"{
            "frame_b": { "hitboxes": [ { "type": "attack", "rect": [1, 2, 3, 4], "damage": 9 } ] },
            "frame_a": { "sockets": [ { "name": "eye", "pos": [5, 6] } ] }
        }"#;

        let animations = parse(json);
        assert_eq!(animations.len(), 1);
        let default = &animations[0];
        assert_eq!(default.name, DEFAULT_ANIMATION);
        assert_eq!(default.frames[0].name, "frame_b");
        assert_eq!(default.frames[0].hitboxes[0].damage, 9);
        assert_eq!(default.frames[1].name, "frame_a");
    }

    #[test]
    fn test_mixed_layouts_keep_document_order() {
        let json = r#"{
            "loose_0": { "hitboxes": [] },
            "Idle": { "frames": { "i0": { "hitboxes": [] } } },
            "Run": { "r0": { "hitboxes": [] } },
            "loose_1": { "sockets": [] }
        }"#;

        let animations = parse(json);
        let names: Vec<&str> = animations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Default", "Idle", "Run"]);
        assert_eq!(animations[0].frame_count(), 2);
    }

    #[test]
    fn test_flat_frames_join_existing_default_in_any_case() {
        let json = r#"{
            "DEFAULT": { "d0": { "hitboxes": [] } },
            "loose": { "sockets": [] },
            "meta": { "author": "me" }
        }"#;

        let animations = parse(json);
        assert_eq!(animations.len(), 1);
        assert_eq!(animations[0].name, "DEFAULT");
        let names: Vec<&str> = animations[0].frames.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["d0", "loose"]);

        // metadata alone never creates an empty Default
        assert!(parse(r#"{ "meta": { "author": "me" } }"#).is_empty());
    }

    #[test]
    fn test_frames_field_takes_precedence() {
        // "frames" is an object, so this is nested even though a sibling
        // looks like a grouped frame
        let json = r#"{
            "Odd": {
                "frames": { "f0": { "hitboxes": [] } },
                "stray": { "hitboxes": [] }
            }
        }"#;

        let animations = parse(json);
        assert_eq!(animations[0].frame_count(), 1);
        assert_eq!(animations[0].frames[0].name, "f0");
    }

    #[test]
    fn test_record_defaults() {
        let json = r#"{
            "f": {
                "hitboxes": [
                    { "rect": [1, 2, 3] },
                    { "type": "COLLISION", "rect": [1.9, -2.9, 3.5, 4.0, 99] },
                    { "type": "mystery", "rect": [0, 0, 1, 1] },
                    "not an object"
                ],
                "sockets": [ { "pos": [7] }, { "name": "tip" } ]
            }
        }"#;

        let frame = &parse(json)[0].frames[0];
        assert_eq!(frame.hitboxes.len(), 3);
        assert_eq!(frame.hitboxes[0], Hitbox::attack(0, 0, 0, 0, 0, 0));
        assert_eq!(frame.hitboxes[1], Hitbox::collision(1, -2, 3, 4));
        assert_eq!(frame.hitboxes[2].hitbox_type, HitboxType::Attack);
        assert_eq!(frame.sockets[0], Socket::new("", 0, 0));
        assert_eq!(frame.sockets[1], Socket::new("tip", 0, 0));
    }

    #[test]
    fn test_negative_size_clamped_or_rejected() {
        let json = r#"{ "f": { "hitboxes": [ { "type": "hurtbox", "rect": [0, 0, -5, 10] } ] } }"#;

        let lenient = parse(json);
        assert_eq!(lenient[0].frames[0].hitboxes[0].width, 0);
        assert_eq!(lenient[0].frames[0].hitboxes[0].height, 10);

        let strict = parse_animations(json, ImportOptions { strict: true });
        assert!(matches!(strict, Err(ImportError::Validation(_))));
    }

    #[test]
    fn test_bad_documents() {
        assert!(matches!(
            parse_animations("{ not json", ImportOptions::default()),
            Err(ImportError::Parse(_))
        ));
        assert!(matches!(
            parse_animations("[1, 2]", ImportOptions::default()),
            Err(ImportError::NotAnObject)
        ));
        assert!(parse("{}").is_empty());
        assert!(parse(r#"{ "version": 3, "meta": { "author": "me" } }"#).is_empty());
    }

    #[test]
    fn test_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ryu.json");
        fs::write(&path, NESTED).unwrap();

        let asset = HitboxImporter::default().import_file(&path, "Ryu").unwrap();
        assert_eq!(asset.display_name, "Ryu");
        assert_eq!(asset.animation_count(), 2);
        assert_eq!(asset.source_path.as_deref(), Some(path.as_path()));
        assert!(asset.last_import.is_some());
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = HitboxImporter::default().import_file(&dir.path().join("gone.json"), "Gone");
        assert!(matches!(result, Err(ImportError::Read { .. })));
    }

    #[test]
    fn test_import_to_dir_saves_asset() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("ken.json");
        fs::write(&source, NESTED).unwrap();

        let importer = HitboxImporter::new(AssetConfig {
            asset_dir: dir.path().join("out"),
            ..AssetConfig::default()
        });
        let saved = importer.import_to_dir(&source, None).unwrap();
        assert_eq!(saved, dir.path().join("out").join("ken.asset.json"));

        let asset = store::load_asset(&saved).unwrap();
        assert_eq!(asset.display_name, "ken");
        assert!(asset.has_animation("jab"));
    }

    #[test]
    fn test_import_to_dir_rejects_escaping_names() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("ken.json");
        fs::write(&source, NESTED).unwrap();

        let importer = HitboxImporter::new(AssetConfig {
            asset_dir: dir.path().join("out"),
            ..AssetConfig::default()
        });
        let result = importer.import_to_dir(&source, Some("../x"));
        assert!(matches!(
            result,
            Err(FrameboxError::Asset(AssetError::InvalidName(_)))
        ));
        assert!(!dir.path().join("x.asset.json").exists());
    }

    #[test]
    fn test_reimport_preserves_sprites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.json");
        fs::write(&path, r#"{ "Idle": { "i0": { "hitboxes": [] } } }"#).unwrap();

        let importer = HitboxImporter::default();
        let mut asset = importer.import_file(&path, "Hero").unwrap();
        asset.animations[0].sprite = Some(SpriteRef::new("/Game/Hero/FB_Idle"));

        fs::write(
            &path,
            r#"{
                "idle": { "i0": { "hitboxes": [] }, "i1": { "hitboxes": [] } },
                "Run": { "frames": {}, "sprite": "/Game/Hero/FB_Run" }
            }"#,
        )
        .unwrap();
        importer.reimport(&mut asset).unwrap();

        assert_eq!(asset.animation_count(), 2);
        assert_eq!(asset.frame_count("Idle"), 2);
        assert_eq!(asset.animations[0].sprite, Some(SpriteRef::new("/Game/Hero/FB_Idle")));
        assert_eq!(asset.animations[1].sprite, Some(SpriteRef::new("/Game/Hero/FB_Run")));
    }

    #[test]
    fn test_reimport_failures() {
        let importer = HitboxImporter::default();

        let mut no_source = HitboxAsset::new("NoSource");
        assert!(matches!(
            importer.reimport(&mut no_source),
            Err(ImportError::NoSourcePath)
        ));

        let dir = tempfile::tempdir().unwrap();
        let mut missing = HitboxAsset::new("Missing");
        missing.source_path = Some(dir.path().join("deleted.json"));
        assert!(matches!(
            importer.reimport(&mut missing),
            Err(ImportError::SourceMissing(_))
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();
        let mut asset = HitboxAsset::new("Broken").with_animation(Animation::new("Keep"));
        asset.source_path = Some(broken);
        assert!(importer.reimport(&mut asset).is_err());
        assert!(asset.has_animation("Keep"));
    }
}
