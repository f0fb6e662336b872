//! Output rendering.

use clap::ValueEnum;
use serde::Serialize;

use vibe_core::{Trail, Vibe};
use vibe_remote::WalkingDirections;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Render `value` in the requested format. `text` builds the human form.
pub fn render<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    Ok(match format {
        OutputFormat::Text => text(value),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

pub fn trail_text(trail: &Trail) -> String {
    let mut out = String::new();
    out.push_str(&format!("🗺️  {}\n", trail.narrative().title));
    out.push_str(&format!("   {}\n\n", trail.narrative().description));
    for (i, stop) in trail.stops().iter().enumerate() {
        out.push_str(&format!("{}. {}", i + 1, stop.name));
        if stop.rating > 0.0 {
            out.push_str(&format!("  ⭐ {:.1} ({})", stop.rating, stop.rating_count));
        }
        out.push('\n');
        if !stop.address.is_empty() {
            out.push_str(&format!("   📍 {}\n", stop.address));
        }
        let categories: Vec<&str> = stop.categories.iter().map(String::as_str).collect();
        out.push_str(&format!("   🏷️  {}\n", categories.join(", ")));
    }
    out
}

pub fn vibes_text(vibes: &Vec<&Vibe>) -> String {
    vibes
        .iter()
        .map(|v| format!("{} {:<10} {} - {}", v.emoji, v.id.as_str(), v.name, v.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn directions_text(directions: &WalkingDirections) -> String {
    let mut out = format!(
        "🚶 {} • {}{}\n",
        directions.formatted_distance(),
        directions.formatted_duration(),
        if directions.estimated { " (estimated)" } else { "" }
    );
    for (i, step) in directions.steps.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} ({})\n",
            i + 1,
            step.instruction,
            vibe_remote::format_distance(step.distance_m.round() as u64)
        ));
    }
    out
}
