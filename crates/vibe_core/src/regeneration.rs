//! Single-stop replacement ("shuffle").

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{TrailError, TrailResult};
use crate::narrative::NarrativeGenerator;
use crate::source::CandidateSource;
use crate::taxonomy::VibeTaxonomy;
use crate::types::{GeoPoint, PlaceCandidate, Trail, TrailStop, VibeSet};

/// Replaces exactly one stop of a trail.
///
/// Regeneration is all-or-nothing: on any error the caller's trail is
/// untouched, and on success every other stop keeps its place.
#[derive(Debug, Clone)]
pub struct RegenerationEngine {
    taxonomy: Arc<VibeTaxonomy>,
    narrator: NarrativeGenerator,
}

impl RegenerationEngine {
    pub fn new(taxonomy: Arc<VibeTaxonomy>, narrator: NarrativeGenerator) -> Self {
        Self { taxonomy, narrator }
    }

    pub async fn regenerate(
        &self,
        source: &dyn CandidateSource,
        trail: &Trail,
        index: usize,
        vibes: &VibeSet,
        origin: GeoPoint,
    ) -> TrailResult<Trail> {
        check_index(trail, index)?;
        let pool = source.alternatives(trail, index, vibes, origin).await?;
        debug!("{} offered {} alternatives for stop {}", source.name(), pool.len(), index);
        self.replace_stop(trail, index, vibes, pool)
    }

    /// Swap in the first non-colliding candidate from `pool`.
    ///
    /// A candidate collides when its name (case-insensitive) or id matches
    /// any stop currently in the trail, the replaced one included.
    pub fn replace_stop(
        &self,
        trail: &Trail,
        index: usize,
        vibes: &VibeSet,
        pool: Vec<PlaceCandidate>,
    ) -> TrailResult<Trail> {
        check_index(trail, index)?;

        let taken_names: HashSet<String> = trail.stops().iter().map(|s| s.name_key()).collect();
        let taken_ids: HashSet<&str> = trail.stops().iter().map(|s| s.id.as_str()).collect();

        let fresh: Vec<PlaceCandidate> = pool
            .into_iter()
            .filter(|c| !taken_names.contains(&c.name_key()) && !taken_ids.contains(c.id.as_str()))
            .collect();

        let pick = fresh
            .iter()
            .position(|c| self.taxonomy.is_on_vibe(c, vibes))
            .unwrap_or(0);
        let replacement = fresh
            .into_iter()
            .nth(pick)
            .ok_or(TrailError::NoAlternative { index })?;

        info!(
            "Replacing stop {} ({}) with {}",
            index,
            trail.stops()[index].name,
            replacement.name
        );

        let mut stops: Vec<TrailStop> = trail.stops().to_vec();
        stops[index] = TrailStop::from(replacement);
        let narrative = self.narrator.narrate(vibes, stops.len());
        Trail::new(vibes.clone(), stops, narrative)
    }
}

fn check_index(trail: &Trail, index: usize) -> TrailResult<()> {
    if index >= trail.len() {
        return Err(TrailError::InvalidIndex {
            index,
            len: trail.len(),
        });
    }
    Ok(())
}
