//! CLI command definitions.
//!
//! This module defines the command structure for the VibeTrail CLI and the
//! shared context each command runs with.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use vibe_core::{GeoPoint, Trail, TrailError, TrailRequestFacade};
use vibe_remote::RemoteRecommender;
use vibe_store::FileTrailStore;

use crate::output::OutputFormat;
use crate::settings::Settings;

pub mod directions;
pub mod generate;
pub mod saved;
pub mod shuffle;
pub mod vibes;

/// VibeTrail - walkable trails that match your vibe
#[derive(Parser)]
#[command(name = "vibe")]
#[command(version, about = "VibeTrail - walkable trails that match your vibe")]
#[command(long_about = r#"
VibeTrail composes a short walking trail of 1-4 stops from the vibes you
pick, names it, and lets you swap out any single stop.

COMMANDS:
  vibes       → List the available vibes
  generate    → Build a trail around a location
  shuffle     → Replace one stop of a saved trail file
  directions  → Walking directions through a trail
  saved       → List, show or delete saved trails

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - No alternative stop found
  4 - Trail unavailable
  5 - Storage error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file (default: ./vibetrail.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Recommendation API root
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Place name used in trail titles
    #[arg(long, global = true)]
    pub location: Option<String>,

    /// Directory for saved trails
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// User whose saved trails are used
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available vibes
    Vibes,

    /// Generate a new trail
    Generate(generate::GenerateArgs),

    /// Replace one stop of a trail
    Shuffle(shuffle::ShuffleArgs),

    /// Walking directions through a trail
    Directions(directions::DirectionsArgs),

    /// Manage saved trails
    Saved(saved::SavedArgs),
}

/// Shared state for a command run.
pub struct Context {
    pub settings: Settings,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(settings: Settings, format: OutputFormat) -> Self {
        Self { settings, format }
    }

    /// Build the engine, with the remote provider unless `offline`.
    pub fn facade(&self, offline: bool) -> Result<TrailRequestFacade> {
        let facade = TrailRequestFacade::new(self.settings.engine.clone());
        if offline {
            return Ok(facade);
        }

        Ok(match RemoteRecommender::from_config(&self.settings.remote)? {
            Some(remote) => {
                debug!("Using recommendation API at {}", remote.base_url());
                facade.with_remote(Arc::new(remote))
            }
            None => facade,
        })
    }

    pub fn store(&self) -> FileTrailStore {
        FileTrailStore::new(&self.settings.store_dir)
    }
}

/// Validate a coordinate pair from the command line.
pub fn origin(lat: f64, lng: f64) -> Result<GeoPoint> {
    let point = GeoPoint::new(lat, lng);
    if !point.is_valid() {
        return Err(TrailError::Config(format!("coordinates out of range: {}, {}", lat, lng)).into());
    }
    Ok(point)
}

pub fn read_trail(path: &Path) -> Result<Trail> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trail file {}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| TrailError::InvalidTrail(format!("{}: {}", path.display(), e)).into())
}

pub fn write_trail(path: &Path, trail: &Trail) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(trail)?)
        .with_context(|| format!("Failed to write trail file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "vibe", "generate", "--vibes", "cozy,artsy", "--lat", "40.7128", "--lng", "-74.0060",
            "--offline", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.vibes, vec!["cozy", "artsy"]);
                assert_eq!(args.lng, -74.0060);
                assert!(args.offline);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_origin_bounds() {
        assert!(origin(40.7, -74.0).is_ok());
        assert!(origin(91.0, 0.0).is_err());
        assert!(origin(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_bad_trail_file_is_invalid_trail() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("trail.json");
        fs::write(&path, "{\"stops\": []}").unwrap();
        let err = read_trail(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrailError>(),
            Some(TrailError::InvalidTrail(_))
        ));
    }
}
