//! # vibe_core
//!
//! Trail composition and regeneration engine for VibeTrail.
//!
//! Given a set of vibes and a location, the engine picks a short walkable
//! sequence of stops, names it, and can later swap out a single stop without
//! disturbing the others.
//!
//! # Architecture
//!
//! - **Taxonomy**: the eight vibes and their on-vibe place categories
//! - **Sources**: where candidates come from (remote provider, local synthesizer)
//! - **Fallback**: a remote failure or timeout silently engages the synthesizer
//! - **Assembler**: dedup, on-vibe selection, size cap
//! - **Narrative**: title and description for the final stop list
//! - **Regeneration**: replace one stop, keep the rest in place
//! - **Facade**: the single entry point for callers
//!
//! # Example
//!
//! ```rust,no_run
//! use vibe_core::{EngineConfig, GeoPoint, TrailRequest, TrailRequestFacade, VibeSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let facade = TrailRequestFacade::new(EngineConfig::default());
//!
//!     let vibes = VibeSet::parse(&["cozy", "artsy"])?;
//!     let request = TrailRequest::new(vibes.clone(), GeoPoint::new(40.7128, -74.0060));
//!     let trail = facade.generate(&request).await?;
//!     println!("{}", trail.narrative().title);
//!
//!     let shuffled = facade.regenerate_stop(&trail, 1, &vibes, request.origin).await?;
//!     println!("{}", shuffled.stops()[1].name);
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod facade;
pub mod mock;
pub mod narrative;
pub mod regeneration;
pub mod source;
pub mod synthesizer;
pub mod taxonomy;
pub mod types;

pub use assembler::TrailAssembler;
pub use config::{EngineConfig, DEFAULT_PROVIDER_TIMEOUT};
pub use error::{TrailError, TrailResult};
pub use facade::TrailRequestFacade;
pub use mock::{CapturedCall, MockSource};
pub use narrative::{NarrativeGenerator, DEFAULT_LOCATION};
pub use regeneration::RegenerationEngine;
pub use source::{CandidateSource, FallbackSource};
pub use synthesizer::{LocalSynthesizer, PlaceTemplate};
pub use taxonomy::{Vibe, VibeId, VibeTaxonomy};
pub use types::{GeoPoint, Narrative, PlaceCandidate, Trail, TrailRequest, TrailStop, VibeSet, MAX_STOPS};
