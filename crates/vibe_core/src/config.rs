//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{TrailError, TrailResult};
use crate::narrative::DEFAULT_LOCATION;

/// Default budget for one remote provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

/// Settings for the trail engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Place name used in narratives
    pub location_name: String,
    /// Timeout applied to the primary candidate source
    pub provider_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            location_name: DEFAULT_LOCATION.to_string(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location_name(mut self, name: impl Into<String>) -> Self {
        self.location_name = name.into();
        self
    }

    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Create a configuration from environment variables
    ///
    /// Reads:
    /// - VIBE_LOCATION_NAME
    /// - VIBE_PROVIDER_TIMEOUT_SECS
    pub fn from_env() -> TrailResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] but with an explicit lookup.
    pub fn from_lookup<F>(lookup: F) -> TrailResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("VIBE_LOCATION_NAME") {
            if !name.trim().is_empty() {
                config.location_name = name.trim().to_string();
            }
        }

        if let Some(secs) = lookup("VIBE_PROVIDER_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                TrailError::Config(format!("VIBE_PROVIDER_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            if secs == 0 {
                return Err(TrailError::Config(
                    "VIBE_PROVIDER_TIMEOUT_SECS must be positive".to_string(),
                ));
            }
            config.provider_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
