//! Vibes command - List the vibe catalogue.

use anyhow::Result;

use vibe_core::VibeTaxonomy;

use super::Context;
use crate::output::{render, vibes_text};

pub fn execute(ctx: &Context) -> Result<()> {
    let taxonomy = VibeTaxonomy::new();
    let vibes = taxonomy.all();
    println!("{}", render(&vibes, ctx.format, vibes_text)?);
    Ok(())
}
