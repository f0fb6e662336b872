//! Entry point for presentation layers.

use std::sync::Arc;

use tracing::info;

use crate::assembler::TrailAssembler;
use crate::config::EngineConfig;
use crate::error::TrailResult;
use crate::narrative::NarrativeGenerator;
use crate::regeneration::RegenerationEngine;
use crate::source::{CandidateSource, FallbackSource};
use crate::synthesizer::LocalSynthesizer;
use crate::taxonomy::VibeTaxonomy;
use crate::types::{GeoPoint, Trail, TrailRequest, VibeSet};

/// Orchestrates candidate fetching, assembly and narration.
///
/// Callers never see which source answered: a call returns a complete,
/// valid trail or an error, never a partial trail. The facade holds no
/// mutable state, so concurrent calls are independent.
#[derive(Clone)]
pub struct TrailRequestFacade {
    config: EngineConfig,
    taxonomy: Arc<VibeTaxonomy>,
    source: FallbackSource,
    assembler: TrailAssembler,
    regenerator: RegenerationEngine,
}

impl TrailRequestFacade {
    /// Create an offline facade backed by the local synthesizer only.
    pub fn new(config: EngineConfig) -> Self {
        let taxonomy = Arc::new(VibeTaxonomy::new());
        let narrator = NarrativeGenerator::new(taxonomy.clone()).location(&config.location_name);
        let source = FallbackSource::new(Arc::new(LocalSynthesizer::new()), config.provider_timeout);

        Self {
            assembler: TrailAssembler::new(taxonomy.clone(), narrator.clone()),
            regenerator: RegenerationEngine::new(taxonomy.clone(), narrator),
            taxonomy,
            source,
            config,
        }
    }

    /// Use a remote provider as the primary source.
    pub fn with_remote(mut self, primary: Arc<dyn CandidateSource>) -> Self {
        self.source = self.source.with_primary(primary);
        self
    }

    /// Replace the fallback tier. The synthesizer is the default.
    pub fn with_fallback(mut self, fallback: Arc<dyn CandidateSource>) -> Self {
        let mut source = FallbackSource::new(fallback, self.config.provider_timeout);
        if let Some(primary) = self.source.primary() {
            source = source.with_primary(primary);
        }
        self.source = source;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &VibeTaxonomy {
        &self.taxonomy
    }

    pub fn is_offline(&self) -> bool {
        !self.source.has_primary()
    }

    /// Build a new trail.
    pub async fn generate(&self, request: &TrailRequest) -> TrailResult<Trail> {
        info!(
            "Generating trail for {:?} at {:.4},{:.4}",
            request.vibes.as_slice(),
            request.origin.lat,
            request.origin.lng
        );
        let pool = self.source.fetch(&request.vibes, request.origin).await?;
        self.assembler.assemble(pool, &request.vibes)
    }

    /// Replace `trail.stops()[index]`, returning the updated trail.
    pub async fn regenerate_stop(
        &self,
        trail: &Trail,
        index: usize,
        vibes: &VibeSet,
        origin: GeoPoint,
    ) -> TrailResult<Trail> {
        self.regenerator
            .regenerate(&self.source, trail, index, vibes, origin)
            .await
    }
}
