//! Directions command - Walking directions through a trail.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use vibe_remote::DirectionsClient;

use super::{read_trail, Context};
use crate::output::{directions_text, render};

#[derive(Args)]
pub struct DirectionsArgs {
    /// Trail JSON file
    #[arg(long)]
    pub trail: PathBuf,
}

pub async fn execute(args: DirectionsArgs, ctx: &Context) -> Result<()> {
    let trail = read_trail(&args.trail)?;
    let client = DirectionsClient::from_config(&ctx.settings.remote)?;

    match client.walking_directions(&trail.waypoints()).await {
        Some(directions) => println!("{}", render(&directions, ctx.format, directions_text)?),
        None => println!("Single-stop trail, no walking needed."),
    }
    Ok(())
}
