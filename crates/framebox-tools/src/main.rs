//! # Framebox
//!
//! Command-line front end for hitbox assets: import editor JSON, reimport
//! from the recorded source, inspect asset contents and check two frames
//! against each other.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use framebox_assets::AssetConfig;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "framebox", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = framebox_assets::CONFIG_FILE)]
    config: PathBuf,

    /// Command to execute
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import hitbox JSON and save it as an asset
    Import {
        /// Hitbox JSON exported by the editor
        json: PathBuf,
        /// Asset name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        /// Output directory (defaults to the configured asset directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Re-read an asset's source JSON and save it in place
    Reimport {
        /// Saved asset file
        asset: PathBuf,
    },

    /// Print the animations and frames of an asset
    Inspect {
        /// Saved asset file
        asset: PathBuf,
        /// Only show this animation, with per-box detail
        #[arg(long)]
        animation: Option<String>,
    },

    /// Check an attacker frame against a defender frame
    Hits(HitsArgs),
}

#[derive(Args, Debug)]
struct HitsArgs {
    /// Saved asset file
    asset: PathBuf,
    /// Attacking frame as ANIMATION:FRAME (frame by index or name)
    #[arg(long)]
    attacker: String,
    /// Defending frame as ANIMATION:FRAME (frame by index or name)
    #[arg(long)]
    defender: String,
    /// Asset used for the defender (defaults to the attacker's asset)
    #[arg(long)]
    defender_asset: Option<PathBuf>,
    #[command(flatten)]
    attacker_at: AttackerPlacement,
    #[command(flatten)]
    defender_at: DefenderPlacement,
}

#[derive(Args, Debug, Clone, Copy)]
struct AttackerPlacement {
    /// Attacker world X
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    attacker_x: f32,
    /// Attacker world Y
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    attacker_y: f32,
    /// Attacker faces left
    #[arg(long)]
    attacker_flip: bool,
    /// Attacker scale
    #[arg(long, default_value_t = 1.0)]
    attacker_scale: f32,
}

#[derive(Args, Debug, Clone, Copy)]
struct DefenderPlacement {
    /// Defender world X
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    defender_x: f32,
    /// Defender world Y
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    defender_y: f32,
    /// Defender faces left
    #[arg(long)]
    defender_flip: bool,
    /// Defender scale
    #[arg(long, default_value_t = 1.0)]
    defender_scale: f32,
}

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("framebox=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = AssetConfig::load_from(&cli.config);
    debug!("Using config: {config:?}");

    match cli.cmd {
        Command::Import { json, name, out } => {
            let config = match out {
                Some(asset_dir) => AssetConfig { asset_dir, ..config },
                None => config,
            };
            commands::import(config, &json, name.as_deref())
        },
        Command::Reimport { asset } => commands::reimport(config, &asset),
        Command::Inspect { asset, animation } => commands::inspect(&asset, animation.as_deref()),
        Command::Hits(args) => {
            let request = commands::HitRequest {
                attacker: commands::FrameSelector::parse(&args.attacker)?,
                defender: commands::FrameSelector::parse(&args.defender)?,
                attacker_at: commands::placement(
                    args.attacker_at.attacker_x,
                    args.attacker_at.attacker_y,
                    args.attacker_at.attacker_flip,
                    args.attacker_at.attacker_scale,
                ),
                defender_at: commands::placement(
                    args.defender_at.defender_x,
                    args.defender_at.defender_y,
                    args.defender_at.defender_flip,
                    args.defender_at.defender_scale,
                ),
            };
            commands::hits(&args.asset, args.defender_asset.as_deref(), &request)
        },
    }
}
