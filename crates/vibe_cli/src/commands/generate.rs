//! Generate command - Build a new trail.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use vibe_core::{TrailRequest, VibeSet};

use super::{origin, write_trail, Context};
use crate::output::{render, trail_text, OutputFormat};

#[derive(Args)]
pub struct GenerateArgs {
    /// Vibes to match, comma separated (e.g. cozy,artsy)
    #[arg(long, value_delimiter = ',', required = true)]
    pub vibes: Vec<String>,

    /// Latitude of the starting point
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the starting point
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Skip the recommendation API and use local places only
    #[arg(long)]
    pub offline: bool,

    /// Save the trail for the current user
    #[arg(long)]
    pub save: bool,

    /// Write the trail as JSON to this file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn execute(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let vibes = VibeSet::parse(&args.vibes)?;
    let request = TrailRequest::new(vibes, origin(args.lat, args.lng)?);

    let facade = ctx.facade(args.offline)?;
    let trail = facade.generate(&request).await?;
    info!("Generated \"{}\" with {} stops", trail.narrative().title, trail.len());

    if let Some(path) = &args.out {
        write_trail(path, &trail)?;
        if ctx.format == OutputFormat::Text {
            println!("💾 Trail written to {}", path.display());
        }
    }

    if args.save {
        let saved = ctx.store().save(&ctx.settings.user, &trail)?;
        if ctx.format == OutputFormat::Text {
            println!("⭐ Saved as {}", saved.id);
        }
    }

    println!("{}", render(&trail, ctx.format, trail_text)?);
    Ok(())
}
