//! Subcommand implementations.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use framebox_assets::{load_asset, save_asset, AssetConfig, HitboxAsset, HitboxImporter};
use framebox_common::SchemaVersion;
use framebox_core::{
    detect_hits, max_knockback, total_damage, Animation, Frame, HitboxType, Placement, Vec2,
};
use tracing::info;

/// A frame reference of the form `ANIMATION:FRAME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSelector {
    pub animation: String,
    pub frame: String,
}

impl FrameSelector {
    /// Splits on the last `:` so animation names may contain colons.
    pub fn parse(selector: &str) -> Result<Self> {
        let (animation, frame) = selector
            .rsplit_once(':')
            .ok_or_else(|| anyhow!("frame '{selector}' must look like ANIMATION:FRAME"))?;
        if animation.is_empty() || frame.is_empty() {
            bail!("frame '{selector}' must look like ANIMATION:FRAME");
        }
        Ok(Self {
            animation: animation.to_string(),
            frame: frame.to_string(),
        })
    }

    /// Looks the frame up by name first, then by index.
    pub fn resolve<'a>(&self, asset: &'a HitboxAsset) -> Result<&'a Frame> {
        let animation = asset.animation(&self.animation).ok_or_else(|| {
            anyhow!(
                "animation '{}' not found in '{}' (have: {})",
                self.animation,
                asset.display_name,
                asset.animation_names().join(", ")
            )
        })?;

        animation
            .frame_by_name(&self.frame)
            .or_else(|| self.frame.parse().ok().and_then(|i| animation.frame(i)))
            .ok_or_else(|| {
                anyhow!(
                    "frame '{}' not found in animation '{}' ({} frames)",
                    self.frame,
                    animation.name,
                    animation.frame_count()
                )
            })
    }
}

/// Everything `hits` needs besides the assets.
#[derive(Debug, Clone)]
pub struct HitRequest {
    pub attacker: FrameSelector,
    pub defender: FrameSelector,
    pub attacker_at: Placement,
    pub defender_at: Placement,
}

pub fn placement(x: f32, y: f32, flip: bool, scale: f32) -> Placement {
    Placement::new(Vec2::new(x, y), flip, scale)
}

fn load(path: &Path) -> Result<HitboxAsset> {
    load_asset(path).with_context(|| format!("loading asset {}", path.display()))
}

pub fn import(config: AssetConfig, json: &Path, name: Option<&str>) -> Result<()> {
    let saved = HitboxImporter::new(config)
        .import_to_dir(json, name)
        .with_context(|| format!("importing {}", json.display()))?;

    let asset = load(&saved)?;
    println!(
        "Imported '{}' ({} animations) -> {}",
        asset.display_name,
        asset.animation_count(),
        saved.display()
    );
    Ok(())
}

pub fn reimport(config: AssetConfig, path: &Path) -> Result<()> {
    let mut asset = load(path)?;
    let pretty = config.pretty_output;

    HitboxImporter::new(config)
        .reimport(&mut asset)
        .with_context(|| format!("reimporting '{}'", asset.display_name))?;
    save_asset(&asset, path, pretty)?;

    info!("Reimported {}", path.display());
    println!(
        "Reimported '{}' ({} animations)",
        asset.display_name,
        asset.animation_count()
    );
    Ok(())
}

fn frame_summary(frame: &Frame) -> String {
    let count = |ty: HitboxType| frame.hitboxes_of_type(ty).count();
    format!(
        "{} attack, {} hurt, {} collision, {} sockets",
        count(HitboxType::Attack),
        count(HitboxType::Hurtbox),
        count(HitboxType::Collision),
        frame.sockets.len()
    )
}

fn print_animation(animation: &Animation, detailed: bool) {
    let sprite = animation
        .sprite
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    println!(
        "  {} ({} frames, sprite: {sprite})",
        animation.name,
        animation.frame_count()
    );

    for (index, frame) in animation.frames.iter().enumerate() {
        println!("    [{index}] {}: {}", frame.name, frame_summary(frame));
        if !detailed {
            continue;
        }
        for hitbox in &frame.hitboxes {
            println!(
                "        {:<9} x={} y={} w={} h={} damage={} knockback={}",
                hitbox.hitbox_type.as_str(),
                hitbox.x,
                hitbox.y,
                hitbox.width,
                hitbox.height,
                hitbox.damage,
                hitbox.knockback
            );
        }
        for socket in &frame.sockets {
            println!("        socket    {} at ({}, {})", socket.name, socket.x, socket.y);
        }
    }
}

pub fn inspect(path: &Path, animation: Option<&str>) -> Result<()> {
    let asset = load(path)?;

    println!("{} (format v{})", asset.asset_id(), SchemaVersion::HITBOX_ASSET);
    if let Some(source) = &asset.source_path {
        println!("  source: {}", source.display());
    }
    if let Some(when) = asset.last_import {
        println!("  imported: {}", when.to_rfc3339());
    }

    match animation {
        Some(name) => {
            let animation = asset
                .animation(name)
                .ok_or_else(|| anyhow!("animation '{name}' not found in '{}'", asset.display_name))?;
            print_animation(animation, true);
        },
        None => {
            println!("  {} animations", asset.animation_count());
            for animation in &asset.animations {
                print_animation(animation, false);
            }
        },
    }
    Ok(())
}

pub fn hits(path: &Path, defender_path: Option<&Path>, request: &HitRequest) -> Result<()> {
    let attacker_asset = load(path)?;
    let defender_asset = match defender_path {
        Some(p) => Some(load(p)?),
        None => None,
    };

    let attacker = request.attacker.resolve(&attacker_asset)?;
    let defender = request
        .defender
        .resolve(defender_asset.as_ref().unwrap_or(&attacker_asset))?;

    let results = detect_hits(attacker, request.attacker_at, defender, request.defender_at);
    if results.is_empty() {
        println!("No hits");
        return Ok(());
    }

    for (n, result) in results.iter().enumerate() {
        let attack = result.attack_hitbox;
        let hurt = result.hurt_hitbox;
        println!(
            "Hit {}: attack ({}, {}, {}x{}) on hurtbox ({}, {}, {}x{}) at ({:.1}, {:.1}) damage={} knockback={}",
            n + 1,
            attack.x,
            attack.y,
            attack.width,
            attack.height,
            hurt.x,
            hurt.y,
            hurt.width,
            hurt.height,
            result.hit_location.x,
            result.hit_location.y,
            result.damage,
            result.knockback
        );
    }
    println!(
        "{} hits, total damage {}, max knockback {}",
        results.len(),
        total_damage(&results),
        max_knockback(&results)
    );
    Ok(())
}
