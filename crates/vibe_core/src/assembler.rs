//! Turns a candidate pool into a trail.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{TrailError, TrailResult};
use crate::narrative::NarrativeGenerator;
use crate::taxonomy::VibeTaxonomy;
use crate::types::{PlaceCandidate, Trail, TrailStop, VibeSet, MAX_STOPS};

/// Selects and orders the final stops.
///
/// Provider order is kept; nothing is re-ranked or re-routed here. On-vibe
/// candidates are taken first and off-vibe ones only when the pool holds no
/// on-vibe candidate at all.
#[derive(Debug, Clone)]
pub struct TrailAssembler {
    taxonomy: Arc<VibeTaxonomy>,
    narrator: NarrativeGenerator,
}

impl TrailAssembler {
    pub fn new(taxonomy: Arc<VibeTaxonomy>, narrator: NarrativeGenerator) -> Self {
        Self { taxonomy, narrator }
    }

    pub fn narrator(&self) -> &NarrativeGenerator {
        &self.narrator
    }

    pub fn assemble(&self, candidates: Vec<PlaceCandidate>, vibes: &VibeSet) -> TrailResult<Trail> {
        let unique = dedup(candidates);
        if unique.is_empty() {
            return Err(TrailError::InsufficientCandidates);
        }

        let (on_vibe, off_vibe): (Vec<_>, Vec<_>) = unique
            .into_iter()
            .partition(|c| self.taxonomy.is_on_vibe(c, vibes));

        let selected = if on_vibe.is_empty() {
            warn!(
                "No on-vibe candidates for {:?}, using {} off-vibe candidates",
                vibes.as_slice(),
                off_vibe.len()
            );
            off_vibe
        } else {
            on_vibe
        };

        let stops: Vec<TrailStop> = selected
            .into_iter()
            .take(MAX_STOPS)
            .map(TrailStop::from)
            .collect();

        debug!("Assembled trail with {} stops", stops.len());
        let narrative = self.narrator.narrate(vibes, stops.len());
        Trail::new(vibes.clone(), stops, narrative)
    }
}

/// Drop candidates whose name (case-insensitive) or id was already seen.
fn dedup(candidates: Vec<PlaceCandidate>) -> Vec<PlaceCandidate> {
    let mut names = HashSet::new();
    let mut ids = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| {
            let fresh_name = !names.contains(&c.name_key());
            let fresh_id = !ids.contains(&c.id);
            if fresh_name && fresh_id {
                names.insert(c.name_key());
                ids.insert(c.id.clone());
                true
            } else {
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::VibeId;
    use crate::types::GeoPoint;

    fn assembler() -> TrailAssembler {
        let taxonomy = Arc::new(VibeTaxonomy::new());
        TrailAssembler::new(taxonomy.clone(), NarrativeGenerator::new(taxonomy))
    }

    fn place(id: &str, name: &str, categories: &[&str]) -> PlaceCandidate {
        PlaceCandidate::new(id, name, GeoPoint::new(40.0, -74.0))
            .categories(categories.iter().copied())
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let pool = vec![
            place("1", "Blue Bottle", &["cafe"]),
            place("2", "blue bottle", &["cafe"]),
            place("1", "Other Name", &["cafe"]),
            place("3", "Tea Room", &["tea_house"]),
        ];
        let trail = assembler()
            .assemble(pool, &VibeSet::single(VibeId::Cozy))
            .unwrap();
        let ids: Vec<_> = trail.stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(trail.stops()[0].name, "Blue Bottle");
    }

    #[test]
    fn test_truncates_to_max_stops_in_provider_order() {
        let pool: Vec<_> = (0..7)
            .map(|i| place(&i.to_string(), &format!("Cafe {}", i), &["cafe"]))
            .collect();
        let trail = assembler()
            .assemble(pool, &VibeSet::single(VibeId::Cozy))
            .unwrap();
        assert_eq!(trail.len(), MAX_STOPS);
        assert_eq!(trail.stops()[3].name, "Cafe 3");
    }

    #[test]
    fn test_short_pool_is_not_an_error() {
        let trail = assembler()
            .assemble(vec![place("1", "Cafe", &["cafe"])], &VibeSet::single(VibeId::Cozy))
            .unwrap();
        assert_eq!(trail.len(), 1);
        assert!(trail.narrative().description.ends_with("One stop to savor."));
    }

    #[test]
    fn test_empty_pool_fails() {
        let err = assembler()
            .assemble(vec![], &VibeSet::single(VibeId::Cozy))
            .unwrap_err();
        assert!(matches!(err, TrailError::InsufficientCandidates));
    }

    #[test]
    fn test_on_vibe_candidates_first() {
        let pool = vec![
            place("1", "Gas Station", &["gas_station"]),
            place("2", "Gallery", &["art_gallery"]),
            place("3", "Laundromat", &["laundry"]),
            place("4", "Museum", &["museum"]),
        ];
        let trail = assembler()
            .assemble(pool, &VibeSet::single(VibeId::Artsy))
            .unwrap();
        let names: Vec<_> = trail.stops().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Gallery", "Museum"]);
    }

    #[test]
    fn test_degraded_match_rather_than_empty() {
        let pool = vec![
            place("1", "Gas Station", &["gas_station"]),
            place("2", "Laundromat", &["laundry"]),
        ];
        let trail = assembler()
            .assemble(pool, &VibeSet::single(VibeId::Artsy))
            .unwrap();
        assert_eq!(trail.len(), 2);
    }
}
