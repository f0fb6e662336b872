//! Candidate sources and the fallback policy between them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{TrailError, TrailResult};
use crate::types::{GeoPoint, PlaceCandidate, Trail, VibeSet};

/// Where stops come from.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch an unordered pool of candidates for the vibes around `origin`.
    async fn fetch(&self, vibes: &VibeSet, origin: GeoPoint) -> TrailResult<Vec<PlaceCandidate>>;

    /// Fetch candidates to replace `trail.stops()[index]`.
    ///
    /// Sources with a dedicated replacement endpoint override this.
    async fn alternatives(
        &self,
        trail: &Trail,
        index: usize,
        vibes: &VibeSet,
        origin: GeoPoint,
    ) -> TrailResult<Vec<PlaceCandidate>> {
        let _ = (trail, index);
        self.fetch(vibes, origin).await
    }
}

/// Two-tier source: a primary provider and a local fallback.
///
/// The primary is tried under a timeout. Any recoverable failure, or an
/// empty pool, engages the fallback exactly once. A fallback failure is
/// reported as [`TrailError::TrailUnavailable`].
#[derive(Clone)]
pub struct FallbackSource {
    primary: Option<Arc<dyn CandidateSource>>,
    fallback: Arc<dyn CandidateSource>,
    timeout: Duration,
}

impl FallbackSource {
    pub fn new(fallback: Arc<dyn CandidateSource>, timeout: Duration) -> Self {
        Self {
            primary: None,
            fallback,
            timeout,
        }
    }

    pub fn with_primary(mut self, primary: Arc<dyn CandidateSource>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn primary(&self) -> Option<Arc<dyn CandidateSource>> {
        self.primary.clone()
    }

    async fn from_primary<F>(&self, primary: &dyn CandidateSource, call: F) -> Option<Vec<PlaceCandidate>>
    where
        F: std::future::Future<Output = TrailResult<Vec<PlaceCandidate>>> + Send,
    {
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TrailError::ProviderTimeout(self.timeout)),
        };

        match result {
            Ok(pool) if pool.is_empty() => {
                warn!("{} returned no candidates, falling back to {}", primary.name(), self.fallback.name());
                None
            }
            Ok(pool) => {
                debug!("{} returned {} candidates", primary.name(), pool.len());
                Some(pool)
            }
            Err(e) => {
                warn!("{} failed ({}), falling back to {}", primary.name(), e, self.fallback.name());
                None
            }
        }
    }

    fn fallback_failed(&self, e: TrailError) -> TrailError {
        match e {
            TrailError::TrailUnavailable(_) => e,
            other => TrailError::TrailUnavailable(format!("{}: {}", self.fallback.name(), other)),
        }
    }
}

#[async_trait]
impl CandidateSource for FallbackSource {
    fn name(&self) -> &'static str {
        "fallback-chain"
    }

    async fn fetch(&self, vibes: &VibeSet, origin: GeoPoint) -> TrailResult<Vec<PlaceCandidate>> {
        if let Some(primary) = &self.primary {
            if let Some(pool) = self
                .from_primary(primary.as_ref(), primary.fetch(vibes, origin))
                .await
            {
                return Ok(pool);
            }
        }

        self.fallback
            .fetch(vibes, origin)
            .await
            .map_err(|e| self.fallback_failed(e))
    }

    async fn alternatives(
        &self,
        trail: &Trail,
        index: usize,
        vibes: &VibeSet,
        origin: GeoPoint,
    ) -> TrailResult<Vec<PlaceCandidate>> {
        if let Some(primary) = &self.primary {
            if let Some(pool) = self
                .from_primary(primary.as_ref(), primary.alternatives(trail, index, vibes, origin))
                .await
            {
                return Ok(pool);
            }
        }

        self.fallback
            .alternatives(trail, index, vibes, origin)
            .await
            .map_err(|e| self.fallback_failed(e))
    }
}
