//! Shuffle command - Replace one stop of a trail file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use vibe_core::VibeSet;

use super::{origin, read_trail, write_trail, Context};
use crate::output::{render, trail_text, OutputFormat};

#[derive(Args)]
pub struct ShuffleArgs {
    /// Trail JSON file
    #[arg(long)]
    pub trail: PathBuf,

    /// Zero-based index of the stop to replace
    #[arg(long)]
    pub index: usize,

    /// Vibes for the replacement (default: the trail's own vibes)
    #[arg(long, value_delimiter = ',')]
    pub vibes: Option<Vec<String>>,

    /// Latitude of the starting point
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the starting point
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Skip the recommendation API and use local places only
    #[arg(long)]
    pub offline: bool,

    /// Write the result here instead of over the input file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// The input file is only rewritten after a successful replacement.
pub async fn execute(args: ShuffleArgs, ctx: &Context) -> Result<()> {
    let trail = read_trail(&args.trail)?;
    let vibes = match &args.vibes {
        Some(ids) => VibeSet::parse(ids)?,
        None => trail.vibes().clone(),
    };
    let origin = origin(args.lat, args.lng)?;

    let facade = ctx.facade(args.offline)?;
    let updated = facade
        .regenerate_stop(&trail, args.index, &vibes, origin)
        .await?;
    info!(
        "Stop {} is now {}",
        args.index,
        updated.stops()[args.index].name
    );

    let path = args.out.as_ref().unwrap_or(&args.trail);
    write_trail(path, &updated)?;
    if ctx.format == OutputFormat::Text {
        println!("💾 Trail written to {}", path.display());
    }

    println!("{}", render(&updated, ctx.format, trail_text)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use super::*;
    use crate::settings::{Settings, SettingsFile};
    use tempfile::tempdir;
    use vibe_core::{GeoPoint, TrailError, TrailRequest, VibeId};

    fn offline_context() -> Context {
        let settings = Settings::resolve(&SettingsFile::default(), &HashMap::new(), |_| None).unwrap();
        Context::new(settings, OutputFormat::Json)
    }

    fn args(trail: PathBuf, index: usize) -> ShuffleArgs {
        ShuffleArgs {
            trail,
            index,
            vibes: None,
            lat: 40.7128,
            lng: -74.0060,
            offline: true,
            out: None,
        }
    }

    async fn write_cozy_trail(path: &std::path::Path, ctx: &Context) {
        let request = TrailRequest::new(VibeSet::single(VibeId::Cozy), GeoPoint::new(40.7128, -74.0060));
        let trail = ctx.facade(true).unwrap().generate(&request).await.unwrap();
        write_trail(path, &trail).unwrap();
    }

    #[tokio::test]
    async fn test_failed_shuffle_leaves_file_untouched() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("trail.json");
        let ctx = offline_context();
        write_cozy_trail(&path, &ctx).await;
        let before = fs::read_to_string(&path).unwrap();

        let err = execute(args(path.clone(), 99), &ctx).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrailError>(),
            Some(TrailError::InvalidIndex { index: 99, .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_shuffle_rewrites_only_target() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("trail.json");
        let ctx = offline_context();
        write_cozy_trail(&path, &ctx).await;
        let before = read_trail(&path).unwrap();

        execute(args(path.clone(), 1), &ctx).await.unwrap();
        let after = read_trail(&path).unwrap();

        assert_eq!(after.len(), before.len());
        assert_eq!(after.stops()[0], before.stops()[0]);
        assert_ne!(after.stops()[1].name, before.stops()[1].name);
    }
}
