//! Saved command - Manage saved trails.

use anyhow::Result;
use clap::{Args, Subcommand};
use uuid::Uuid;

use vibe_store::{SavedTrail, StoreError};

use super::Context;
use crate::output::{render, trail_text};

#[derive(Args)]
pub struct SavedArgs {
    #[command(subcommand)]
    pub action: SavedAction,
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// List saved trails, newest first
    List,

    /// Show one saved trail
    Show {
        /// Saved trail id
        id: Uuid,
    },

    /// Delete a saved trail
    Delete {
        /// Saved trail id
        id: Uuid,
    },
}

pub fn execute(args: SavedArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let user = &ctx.settings.user;

    match args.action {
        SavedAction::List => {
            let trails = store.list(user)?;
            println!("{}", render(&trails, ctx.format, |t| list_text(user, t))?);
        }
        SavedAction::Show { id } => {
            let saved = store.get(user, id)?;
            println!("{}", render(&saved, ctx.format, |s| trail_text(&s.trail))?);
        }
        SavedAction::Delete { id } => {
            if !store.delete(user, id)? {
                return Err(StoreError::NotFound(id).into());
            }
            println!("🗑️  Deleted {}", id);
        }
    }
    Ok(())
}

fn list_text(user: &str, trails: &[SavedTrail]) -> String {
    if trails.is_empty() {
        return format!("No saved trails for {}", user);
    }
    trails
        .iter()
        .map(|t| {
            format!(
                "{}  {}  {} ({} stops)",
                t.id,
                t.created_at.format("%Y-%m-%d %H:%M"),
                t.trail.narrative().title,
                t.trail.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibe_core::{EngineConfig, GeoPoint, TrailRequest, TrailRequestFacade, VibeId, VibeSet};

    #[test]
    fn test_list_text_empty() {
        assert_eq!(list_text("alice", &[]), "No saved trails for alice");
    }

    #[tokio::test]
    async fn test_list_text_rows() {
        let request = TrailRequest::new(VibeSet::single(VibeId::Cozy), GeoPoint::new(40.7128, -74.0060));
        let trail = TrailRequestFacade::new(EngineConfig::default())
            .generate(&request)
            .await
            .unwrap();
        let temp = tempfile::tempdir().unwrap();
        let store = vibe_store::FileTrailStore::new(temp.path());
        let saved = store.save("alice", &trail).unwrap();

        let text = list_text("alice", &store.list("alice").unwrap());
        assert!(text.starts_with(&saved.id.to_string()));
        assert!(text.contains("A Cozy Brooklyn Afternoon"));
        assert!(text.ends_with(&format!("({} stops)", trail.len())));
    }
}
