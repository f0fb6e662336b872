//! Remote provider configuration.

use std::time::Duration;

use vibe_core::{TrailError, TrailResult};

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Mapbox directions endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";

/// Where the remote services live.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    /// Recommendation API root. `None` means offline.
    pub base_url: Option<String>,
    /// Mapbox access token. `None` means locally estimated directions.
    pub directions_token: Option<String>,
    pub directions_url: String,
    pub request_timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            directions_token: None,
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RemoteConfig {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn directions_token(mut self, token: impl Into<String>) -> Self {
        self.directions_token = Some(token.into());
        self
    }

    pub fn directions_url(mut self, url: impl Into<String>) -> Self {
        self.directions_url = url.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.base_url.is_none()
    }

    /// Create a configuration from environment variables
    ///
    /// Reads:
    /// - VIBE_API_URL
    /// - MAPBOX_TOKEN
    /// - VIBE_REQUEST_TIMEOUT_SECS
    pub fn from_env() -> TrailResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> TrailResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self {
            base_url: non_empty("VIBE_API_URL"),
            directions_token: non_empty("MAPBOX_TOKEN"),
            ..Self::default()
        };

        if let Some(secs) = non_empty("VIBE_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                TrailError::Config(format!("VIBE_REQUEST_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            if secs == 0 {
                return Err(TrailError::Config(
                    "VIBE_REQUEST_TIMEOUT_SECS must be positive".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
