//! HTTP recommendation provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use vibe_core::{CandidateSource, GeoPoint, PlaceCandidate, Trail, TrailError, TrailResult, VibeSet};

use crate::config::RemoteConfig;
use crate::wire::{into_pool, GenerateRequest, GenerateResponse, RegenerateRequest, RegenerateResponse, WireTrail};

/// Candidate source backed by the VibeTrail recommendation API.
///
/// Any transport error or non-2xx status is `ProviderUnavailable`; a
/// request that exceeds the client timeout is `ProviderTimeout`. There are
/// no retries here: the fallback chain decides what happens next.
pub struct RemoteRecommender {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RemoteRecommender {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TrailResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrailError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    /// Build from config. Returns `None` in offline mode.
    pub fn from_config(config: &RemoteConfig) -> TrailResult<Option<Self>> {
        config
            .base_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.request_timeout))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> TrailResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrailError::ProviderUnavailable(format!(
                "{} returned {}: {}",
                path, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> TrailError {
        if e.is_timeout() {
            TrailError::ProviderTimeout(self.timeout)
        } else if e.is_decode() {
            TrailError::ProviderUnavailable(format!("Failed to parse response: {}", e))
        } else {
            TrailError::ProviderUnavailable(format!("Network error: {}", e))
        }
    }
}

#[async_trait]
impl CandidateSource for RemoteRecommender {
    fn name(&self) -> &'static str {
        "remote-recommender"
    }

    async fn fetch(&self, vibes: &VibeSet, origin: GeoPoint) -> TrailResult<Vec<PlaceCandidate>> {
        let request = GenerateRequest::new(vibes, origin);
        let response: GenerateResponse = self.post("/generate-trail", &request).await?;
        let pool = into_pool(response.stops)?;
        info!("Remote provider returned {} candidates", pool.len());
        Ok(pool)
    }

    async fn alternatives(
        &self,
        trail: &Trail,
        index: usize,
        vibes: &VibeSet,
        origin: GeoPoint,
    ) -> TrailResult<Vec<PlaceCandidate>> {
        let base = GenerateRequest::new(vibes, origin);
        let request = RegenerateRequest {
            vibes: base.vibes,
            latitude: base.latitude,
            longitude: base.longitude,
            current_trail: WireTrail::from(trail),
            stop_to_replace: index,
        };
        let response: RegenerateResponse = self.post("/regenerate-stop", &request).await?;
        into_pool(vec![response.new_stop])
    }
}
