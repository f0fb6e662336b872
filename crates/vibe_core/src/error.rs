//! Error types for trail composition.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for trail operations.
pub type TrailResult<T> = Result<T, TrailError>;

/// Errors that can occur while building or editing a trail.
#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Unknown vibe: {0}")]
    UnknownVibe(String),

    #[error("At least one vibe must be selected")]
    EmptyVibeSet,

    #[error("Recommendation provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Recommendation provider timed out after {}ms", .0.as_millis())]
    ProviderTimeout(Duration),

    #[error("No usable candidates to build a trail from")]
    InsufficientCandidates,

    #[error("Trail unavailable: {0}")]
    TrailUnavailable(String),

    #[error("Stop index {index} out of range for a trail of {len} stops")]
    InvalidIndex { index: usize, len: usize },

    #[error("No alternative found for stop {index}")]
    NoAlternative { index: usize },

    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),

    #[error("Invalid trail: {0}")]
    InvalidTrail(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrailError {
    /// Whether a provider failure may be recovered by the local synthesizer.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::ProviderTimeout(_)
        )
    }
}
