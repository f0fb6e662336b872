//! CLI settings.
//!
//! Every value is resolved in this order: command-line flag, environment
//! variable, `vibetrail.toml`, built-in default.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use vibe_core::{EngineConfig, TrailResult};
use vibe_remote::RemoteConfig;

use crate::commands::Cli;

pub const DEFAULT_SETTINGS_FILE: &str = "vibetrail.toml";
pub const DEFAULT_STORE_DIR: &str = ".vibetrail/saved";
pub const DEFAULT_USER: &str = "local";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `vibetrail.toml`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub api_url: Option<String>,
    pub location_name: Option<String>,
    pub provider_timeout_secs: Option<u64>,
    pub mapbox_token: Option<String>,
    pub store_dir: Option<PathBuf>,
    pub user: Option<String>,
}

impl SettingsFile {
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The file value for an environment key.
    fn value(&self, key: &str) -> Option<String> {
        match key {
            "VIBE_API_URL" => self.api_url.clone(),
            "VIBE_LOCATION_NAME" => self.location_name.clone(),
            "VIBE_PROVIDER_TIMEOUT_SECS" => self.provider_timeout_secs.map(|s| s.to_string()),
            "MAPBOX_TOKEN" => self.mapbox_token.clone(),
            "VIBE_STORE_DIR" => self.store_dir.as_ref().map(|p| p.display().to_string()),
            "VIBE_USER" => self.user.clone(),
            _ => None,
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: EngineConfig,
    pub remote: RemoteConfig,
    pub store_dir: PathBuf,
    pub user: String,
}

impl Settings {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => SettingsFile::read(path)?,
            None => {
                let default = Path::new(DEFAULT_SETTINGS_FILE);
                if default.exists() {
                    SettingsFile::read(default)?
                } else {
                    SettingsFile::default()
                }
            }
        };

        let mut flags = HashMap::new();
        if let Some(url) = &cli.api_url {
            flags.insert("VIBE_API_URL", url.clone());
        }
        if let Some(location) = &cli.location {
            flags.insert("VIBE_LOCATION_NAME", location.clone());
        }
        if let Some(dir) = &cli.store_dir {
            flags.insert("VIBE_STORE_DIR", dir.display().to_string());
        }
        if let Some(user) = &cli.user {
            flags.insert("VIBE_USER", user.clone());
        }

        Ok(Self::resolve(&file, &flags, |key| std::env::var(key).ok())?)
    }

    pub fn resolve<F>(
        file: &SettingsFile,
        flags: &HashMap<&'static str, String>,
        env: F,
    ) -> TrailResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            flags
                .get(key)
                .cloned()
                .or_else(|| env(key))
                .or_else(|| file.value(key))
        };

        Ok(Self {
            engine: EngineConfig::from_lookup(&lookup)?,
            remote: RemoteConfig::from_lookup(&lookup)?,
            store_dir: lookup("VIBE_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            user: lookup("VIBE_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&SettingsFile::default(), &HashMap::new(), no_env).unwrap();
        assert_eq!(settings.engine, EngineConfig::default());
        assert!(settings.remote.is_offline());
        assert_eq!(settings.store_dir, PathBuf::from(DEFAULT_STORE_DIR));
        assert_eq!(settings.user, DEFAULT_USER);
    }

    #[test]
    fn test_precedence() {
        let file = SettingsFile {
            api_url: Some("http://file".to_string()),
            location_name: Some("Queens".to_string()),
            provider_timeout_secs: Some(3),
            user: Some("file-user".to_string()),
            ..SettingsFile::default()
        };
        let env = |key: &str| match key {
            "VIBE_API_URL" => Some("http://env".to_string()),
            "VIBE_LOCATION_NAME" => Some("Harlem".to_string()),
            _ => None,
        };
        let mut flags = HashMap::new();
        flags.insert("VIBE_API_URL", "http://flag".to_string());

        let settings = Settings::resolve(&file, &flags, env).unwrap();
        assert_eq!(settings.remote.base_url.as_deref(), Some("http://flag"));
        assert_eq!(settings.engine.location_name, "Harlem");
        assert_eq!(settings.engine.provider_timeout, Duration::from_secs(3));
        assert_eq!(settings.user, "file-user");
    }

    #[test]
    fn test_read_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vibetrail.toml");
        fs::write(
            &path,
            "api_url = \"http://localhost:8000\"\nstore_dir = \"/tmp/trails\"\nuser = \"alice\"\n",
        )
        .unwrap();

        let file = SettingsFile::read(&path).unwrap();
        assert_eq!(file.api_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(file.store_dir, Some(PathBuf::from("/tmp/trails")));
        assert_eq!(file.user.as_deref(), Some("alice"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vibetrail.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(matches!(SettingsFile::read(&path), Err(SettingsError::Parse { .. })));

        let missing = temp.path().join("missing.toml");
        assert!(matches!(SettingsFile::read(&missing), Err(SettingsError::Read { .. })));
    }
}
