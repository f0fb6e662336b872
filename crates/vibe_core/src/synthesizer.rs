//! Deterministic local candidate synthesizer.
//!
//! Used when the recommendation provider cannot be reached. Candidates come
//! from a fixed template table, each placed at its own small offset from
//! the origin so stops are distinct on a map. They are not geocoded.

use async_trait::async_trait;
use tracing::debug;

use crate::error::TrailResult;
use crate::source::CandidateSource;
use crate::taxonomy::VibeId;
use crate::types::{GeoPoint, PlaceCandidate, VibeSet};

/// Degrees added to both coordinates per template slot.
const SLOT_DELTA: f64 = 0.001;

/// One synthesized place.
#[derive(Debug, Clone, Copy)]
pub struct PlaceTemplate {
    pub slot: u32,
    pub name: &'static str,
    pub address: &'static str,
    pub rating: f64,
    pub rating_count: u32,
    pub categories: &'static [&'static str],
}

impl PlaceTemplate {
    fn realize(&self, origin: GeoPoint) -> PlaceCandidate {
        let delta = SLOT_DELTA * f64::from(self.slot);
        PlaceCandidate::new(
            format!("local_place_{}", self.slot),
            self.name,
            origin.offset(delta, delta),
        )
        .address(self.address)
        .rating(self.rating, self.rating_count)
        .categories(self.categories.iter().copied())
    }
}

const TEMPLATES: &[PlaceTemplate] = &[
    PlaceTemplate {
        slot: 1,
        name: "The Daily Press",
        address: "123 Main St, Brooklyn, NY",
        rating: 4.8,
        rating_count: 150,
        categories: &["cafe", "restaurant", "food"],
    },
    PlaceTemplate {
        slot: 2,
        name: "Better Read Than Dead",
        address: "456 Oak Ave, Brooklyn, NY",
        rating: 4.9,
        rating_count: 80,
        categories: &["book_store", "store"],
    },
    PlaceTemplate {
        slot: 3,
        name: "Prospect Park",
        address: "789 Park Rd, Brooklyn, NY",
        rating: 4.7,
        rating_count: 2000,
        categories: &["park", "natural_feature"],
    },
    PlaceTemplate {
        slot: 4,
        name: "Modern Art Collective",
        address: "321 Gallery Way, Brooklyn, NY",
        rating: 4.6,
        rating_count: 120,
        categories: &["art_gallery", "museum"],
    },
    PlaceTemplate {
        slot: 5,
        name: "Farm-to-Table Bistro",
        address: "654 Fresh St, Brooklyn, NY",
        rating: 4.9,
        rating_count: 95,
        categories: &["restaurant", "food", "farm_to_table"],
    },
    PlaceTemplate {
        slot: 6,
        name: "Cozy Corner Cafe",
        address: "111 Peaceful Lane, Brooklyn, NY",
        rating: 4.7,
        rating_count: 85,
        categories: &["cafe", "restaurant"],
    },
    PlaceTemplate {
        slot: 7,
        name: "Urban Garden Oasis",
        address: "222 Green Street, Brooklyn, NY",
        rating: 4.5,
        rating_count: 65,
        categories: &["park", "garden"],
    },
    PlaceTemplate {
        slot: 8,
        name: "Vintage Book Nook",
        address: "333 Literary Lane, Brooklyn, NY",
        rating: 4.8,
        rating_count: 45,
        categories: &["book_store", "antique_shop", "neighborhood_spot"],
    },
    PlaceTemplate {
        slot: 9,
        name: "Old Stone House",
        address: "336 3rd St, Brooklyn, NY",
        rating: 4.6,
        rating_count: 310,
        categories: &["historic_site", "museum", "landmark"],
    },
    PlaceTemplate {
        slot: 10,
        name: "Threadline Boutique",
        address: "88 Wythe Ave, Brooklyn, NY",
        rating: 4.4,
        rating_count: 140,
        categories: &["boutique", "designer_store"],
    },
    PlaceTemplate {
        slot: 11,
        name: "The Low Lantern",
        address: "47 Night Owl Row, Brooklyn, NY",
        rating: 4.5,
        rating_count: 220,
        categories: &["bar", "live_music"],
    },
    PlaceTemplate {
        slot: 12,
        name: "Backyard Dumpling Counter",
        address: "9 Hidden Alley, Brooklyn, NY",
        rating: 4.9,
        rating_count: 60,
        categories: &["local_favorite", "restaurant", "food"],
    },
    PlaceTemplate {
        slot: 13,
        name: "Bell House Stage",
        address: "149 7th St, Brooklyn, NY",
        rating: 4.6,
        rating_count: 540,
        categories: &["theater", "live_music", "bar"],
    },
    PlaceTemplate {
        slot: 14,
        name: "Green-Wood Chapel",
        address: "500 25th St, Brooklyn, NY",
        rating: 4.8,
        rating_count: 900,
        categories: &["church", "historic_building", "garden"],
    },
];

/// Template slot guaranteeing coverage for a vibe.
fn anchor_slot(vibe: VibeId) -> u32 {
    match vibe {
        VibeId::Cozy => 1,
        VibeId::Artsy => 4,
        VibeId::Historic => 9,
        VibeId::Trendy => 10,
        VibeId::Nature => 3,
        VibeId::Foodie => 5,
        VibeId::Nightlife => 11,
        VibeId::Hidden => 12,
    }
}

/// Local fallback source.
///
/// The pool lists one anchor per requested vibe (in selection order)
/// followed by every other template in table order, so it always holds
/// every template and covers every requested vibe.
#[derive(Debug, Clone, Default)]
pub struct LocalSynthesizer;

impl LocalSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn templates() -> &'static [PlaceTemplate] {
        TEMPLATES
    }

    /// Build the pool synchronously.
    pub fn synthesize(&self, vibes: &VibeSet, origin: GeoPoint) -> Vec<PlaceCandidate> {
        let mut slots: Vec<u32> = Vec::with_capacity(TEMPLATES.len());
        for vibe in vibes.iter() {
            let slot = anchor_slot(vibe);
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        for template in TEMPLATES {
            if !slots.contains(&template.slot) {
                slots.push(template.slot);
            }
        }

        slots
            .iter()
            .filter_map(|slot| TEMPLATES.iter().find(|t| t.slot == *slot))
            .map(|t| t.realize(origin))
            .collect()
    }
}

#[async_trait]
impl CandidateSource for LocalSynthesizer {
    fn name(&self) -> &'static str {
        "local-synthesizer"
    }

    async fn fetch(&self, vibes: &VibeSet, origin: GeoPoint) -> TrailResult<Vec<PlaceCandidate>> {
        let pool = self.synthesize(vibes, origin);
        debug!("Synthesized {} local candidates for {:?}", pool.len(), vibes.as_slice());
        Ok(pool)
    }
}
