//! Mock candidate source for testing.
//!
//! Provides a scriptable implementation of [`CandidateSource`] so the
//! fallback policy, assembler and regeneration engine can be exercised
//! without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{TrailError, TrailResult};
use crate::source::CandidateSource;
use crate::taxonomy::VibeId;
use crate::types::{GeoPoint, PlaceCandidate, Trail, VibeSet};

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub method: String,
    pub vibes: Vec<VibeId>,
    pub origin: GeoPoint,
    pub index: Option<usize>,
}

/// Simulated failure mode.
#[derive(Debug, Clone)]
enum Failure {
    Unavailable(String),
    Timeout(Duration),
}

/// Mock candidate source.
///
/// Returns canned pools in sequence (cycling through them), or a simulated
/// failure, and records every call.
#[derive(Clone)]
pub struct MockSource {
    name: &'static str,
    pools: Arc<RwLock<Vec<Vec<PlaceCandidate>>>>,
    pool_index: Arc<AtomicUsize>,
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    failure: Arc<RwLock<Option<Failure>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockSource {
    /// Create a mock that returns an empty pool.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pools: Arc::new(RwLock::new(Vec::new())),
            pool_index: Arc::new(AtomicUsize::new(0)),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
            failure: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a pool for the next call.
    pub fn with_pool(self, pool: Vec<PlaceCandidate>) -> Self {
        self.pools.write().push(pool);
        self
    }

    /// Replace all pools.
    pub fn with_pools(self, pools: Vec<Vec<PlaceCandidate>>) -> Self {
        *self.pools.write() = pools;
        self
    }

    /// Fail every call with `ProviderUnavailable`.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.failure.write() = Some(Failure::Unavailable(message.into()));
        self
    }

    /// Fail every call with `ProviderTimeout`.
    pub fn simulate_timeout(self, after: Duration) -> Self {
        *self.failure.write() = Some(Failure::Timeout(after));
        self
    }

    /// Sleep before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write() = Some(delay);
        self
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    /// Check if a specific method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.captured_calls
            .read()
            .iter()
            .any(|c| c.method == method)
    }

    fn record_call(&self, method: &str, vibes: &VibeSet, origin: GeoPoint, index: Option<usize>) {
        self.captured_calls.write().push(CapturedCall {
            method: method.to_string(),
            vibes: vibes.as_slice().to_vec(),
            origin,
            index,
        });
    }

    async fn respond(&self) -> TrailResult<Vec<PlaceCandidate>> {
        let delay = *self.delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failure.read().clone();
        match failure {
            Some(Failure::Unavailable(msg)) => return Err(TrailError::ProviderUnavailable(msg)),
            Some(Failure::Timeout(after)) => return Err(TrailError::ProviderTimeout(after)),
            None => {}
        }

        let pools = self.pools.read();
        if pools.is_empty() {
            return Ok(Vec::new());
        }
        let index = self.pool_index.fetch_add(1, Ordering::SeqCst);
        Ok(pools
            .get(index % pools.len())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CandidateSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, vibes: &VibeSet, origin: GeoPoint) -> TrailResult<Vec<PlaceCandidate>> {
        self.record_call("fetch", vibes, origin, None);
        self.respond().await
    }

    async fn alternatives(
        &self,
        _trail: &Trail,
        index: usize,
        vibes: &VibeSet,
        origin: GeoPoint,
    ) -> TrailResult<Vec<PlaceCandidate>> {
        self.record_call("alternatives", vibes, origin, Some(index));
        self.respond().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> PlaceCandidate {
        PlaceCandidate::new(id, id, GeoPoint::new(0.0, 0.0))
    }

    #[tokio::test]
    async fn test_sequential_pools() {
        let source = MockSource::new("mock").with_pools(vec![vec![place("a")], vec![place("b")]]);
        let vibes = VibeSet::single(VibeId::Cozy);
        let origin = GeoPoint::new(1.0, 2.0);

        assert_eq!(source.fetch(&vibes, origin).await.unwrap()[0].id, "a");
        assert_eq!(source.fetch(&vibes, origin).await.unwrap()[0].id, "b");
        assert_eq!(source.fetch(&vibes, origin).await.unwrap()[0].id, "a");

        let calls = source.get_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].vibes, vec![VibeId::Cozy]);
        assert_eq!(calls[0].origin, origin);
    }

    #[tokio::test]
    async fn test_failure_modes() {
        let vibes = VibeSet::single(VibeId::Cozy);
        let origin = GeoPoint::new(0.0, 0.0);

        let down = MockSource::new("mock").simulate_failure("503");
        assert!(matches!(
            down.fetch(&vibes, origin).await,
            Err(TrailError::ProviderUnavailable(_))
        ));

        let slow = MockSource::new("mock").simulate_timeout(Duration::from_secs(3));
        assert!(matches!(
            slow.fetch(&vibes, origin).await,
            Err(TrailError::ProviderTimeout(_))
        ));
        assert!(slow.was_called("fetch"));
    }
}
