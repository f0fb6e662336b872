//! # vibe_remote
//!
//! Remote services consumed by VibeTrail:
//!
//! - [`RemoteRecommender`]: the HTTP recommendation API, exposed as a
//!   [`vibe_core::CandidateSource`] so the engine can fall back from it
//! - [`DirectionsClient`]: walking directions with a local estimate when
//!   the directions provider is missing or failing

pub mod config;
pub mod directions;
pub mod recommendation;
pub mod wire;

pub use config::{RemoteConfig, DEFAULT_REQUEST_TIMEOUT};
pub use directions::{format_distance, format_duration, DirectionStep, DirectionsClient, WalkingDirections};
pub use recommendation::RemoteRecommender;
