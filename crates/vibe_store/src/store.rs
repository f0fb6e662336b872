//! Saved trails on disk.
//!
//! Layout:
//! ```text
//! <root>/<user>/<uuid>.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;
use walkdir::WalkDir;

use vibe_core::{Trail, VibeSet};

use crate::error::{StoreError, StoreResult};

/// A trail saved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrail {
    pub id: Uuid,
    pub user_id: String,
    pub trail: Trail,
    pub vibes: VibeSet,
    pub created_at: DateTime<Utc>,
}

/// One JSON document per saved trail, grouped by user.
#[derive(Debug, Clone)]
pub struct FileTrailStore {
    root: PathBuf,
}

impl FileTrailStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user: &str) -> StoreResult<PathBuf> {
        let valid = !user.trim().is_empty()
            && user != "."
            && user != ".."
            && !user.contains(['/', '\\']);
        if !valid {
            return Err(StoreError::InvalidUser(user.to_string()));
        }
        Ok(self.root.join(user))
    }

    fn trail_path(&self, user: &str, id: Uuid) -> StoreResult<PathBuf> {
        Ok(self.user_dir(user)?.join(format!("{}.json", id)))
    }

    /// Persist a trail for `user`.
    pub fn save(&self, user: &str, trail: &Trail) -> StoreResult<SavedTrail> {
        let dir = self.user_dir(user)?;
        fs::create_dir_all(&dir)?;

        let saved = SavedTrail {
            id: Uuid::new_v4(),
            user_id: user.to_string(),
            trail: trail.clone(),
            vibes: trail.vibes().clone(),
            created_at: Utc::now(),
        };

        let path = dir.join(format!("{}.json", saved.id));
        fs::write(&path, serde_json::to_string_pretty(&saved)?)?;
        debug!("Saved trail {} for {}", saved.id, user);
        Ok(saved)
    }

    /// All trails of `user`, newest first. Unreadable documents are skipped.
    pub fn list(&self, user: &str) -> StoreResult<Vec<SavedTrail>> {
        let dir = self.user_dir(user)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut trails: Vec<SavedTrail> = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .filter_map(|e| match read_saved(e.path()) {
                Ok(saved) => Some(saved),
                Err(err) => {
                    warn!("Skipping {}", err);
                    None
                }
            })
            .collect();

        trails.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trails)
    }

    pub fn get(&self, user: &str, id: Uuid) -> StoreResult<SavedTrail> {
        let path = self.trail_path(user, id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }
        read_saved(&path)
    }

    /// Remove a saved trail. Returns whether it existed.
    pub fn delete(&self, user: &str, id: Uuid) -> StoreResult<bool> {
        let path = self.trail_path(user, id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        debug!("Deleted trail {} for {}", id, user);
        Ok(true)
    }
}

fn read_saved(path: &Path) -> StoreResult<SavedTrail> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_rejects_path_like_users() {
        let store = FileTrailStore::new("/tmp/unused");
        for user in ["", "  ", "..", "a/b", "a\\b"] {
            assert!(
                matches!(store.user_dir(user), Err(StoreError::InvalidUser(_))),
                "{:?} accepted",
                user
            );
        }
        assert!(store.user_dir("alice").is_ok());
    }

    #[test]
    fn test_unknown_user_has_no_trails() {
        let temp = tempdir().unwrap();
        let store = FileTrailStore::new(temp.path());
        assert!(store.list("nobody").unwrap().is_empty());
        assert!(!store.delete("nobody", Uuid::new_v4()).unwrap());
        assert!(matches!(
            store.get("nobody", Uuid::new_v4()),
            Err(StoreError::NotFound(_))
        ));
    }
}
