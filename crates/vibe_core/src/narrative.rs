//! Title and description generation.

use std::sync::Arc;

use crate::taxonomy::{VibeId, VibeTaxonomy};
use crate::types::{Narrative, VibeSet};

/// Location used when the caller does not supply one.
pub const DEFAULT_LOCATION: &str = "Brooklyn";

/// Derives a [`Narrative`] from the vibes and stop count. Pure and total.
#[derive(Debug, Clone)]
pub struct NarrativeGenerator {
    taxonomy: Arc<VibeTaxonomy>,
    location: String,
}

impl NarrativeGenerator {
    pub fn new(taxonomy: Arc<VibeTaxonomy>) -> Self {
        Self {
            taxonomy,
            location: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn location_name(&self) -> &str {
        &self.location
    }

    pub fn narrate(&self, vibes: &VibeSet, stop_count: usize) -> Narrative {
        let loc = &self.location;
        let named: Vec<VibeId> = vibes.iter().take(2).collect();

        let (title, description) = match named.as_slice() {
            [VibeId::Cozy] => (
                format!("A Cozy {} Afternoon", loc),
                format!(
                    "Unwind with the perfect peaceful experience in {}. This trail takes you through quiet, comfortable spaces perfect for reflection and relaxation.",
                    loc
                ),
            ),
            [VibeId::Artsy] => (
                format!("Creative {} Adventure", loc),
                format!(
                    "Immerse yourself in {}'s artistic spirit with this curated trail of creative spaces that will inspire your imagination.",
                    loc
                ),
            ),
            [VibeId::Historic] => (
                format!("Historic {} Journey", loc),
                format!(
                    "Step back in time and discover {}'s rich heritage through this carefully selected trail of timeless landmarks and stories.",
                    loc
                ),
            ),
            [first, second] => {
                let (a, b) = (self.adjective(*first), self.adjective(*second));
                (
                    format!("{} & {} {} Trail", a, b, loc),
                    format!(
                        "Experience the best of both worlds with this unique trail that combines {} and {} vibes in {}.",
                        a, b, loc
                    ),
                )
            }
            [only] => self.experience(*only),
            // VibeSet is never empty; keep the generator total regardless.
            _ => (
                format!("Your Perfect {} Experience", loc),
                format!(
                    "Discover amazing local spots in {} that perfectly match your vibe.",
                    loc
                ),
            ),
        };

        Narrative {
            title,
            description: format!("{} {}", description, stop_summary(stop_count)),
        }
    }

    fn experience(&self, vibe: VibeId) -> (String, String) {
        let loc = &self.location;
        (
            format!("{} {} Experience", self.adjective(vibe), loc),
            format!(
                "Discover the perfect {} experience in {} with this thoughtfully curated trail of local favorites.",
                vibe, loc
            ),
        )
    }

    fn adjective(&self, vibe: VibeId) -> &str {
        self.taxonomy
            .get(vibe)
            .map(|v| v.adjective)
            .unwrap_or_else(|| vibe.as_str())
    }
}

fn stop_summary(stop_count: usize) -> String {
    match stop_count {
        1 => "One stop to savor.".to_string(),
        n => format!("{} stops to explore on foot.", n),
    }
}
