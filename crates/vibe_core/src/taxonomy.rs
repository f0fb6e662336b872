//! Vibe catalogue.
//!
//! The taxonomy is the single mapping from a vibe to the place categories
//! considered on-vibe. Anything that needs to decide whether a place fits a
//! vibe goes through [`VibeTaxonomy::is_on_vibe`].

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TrailError, TrailResult};
use crate::types::{PlaceCandidate, VibeSet};

/// Recognized vibe identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibeId {
    Cozy,
    Artsy,
    Historic,
    Trendy,
    Nature,
    Foodie,
    Nightlife,
    Hidden,
}

impl VibeId {
    /// Get all vibe variants in catalogue order.
    pub fn all() -> &'static [VibeId] {
        &[
            VibeId::Cozy,
            VibeId::Artsy,
            VibeId::Historic,
            VibeId::Trendy,
            VibeId::Nature,
            VibeId::Foodie,
            VibeId::Nightlife,
            VibeId::Hidden,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VibeId::Cozy => "cozy",
            VibeId::Artsy => "artsy",
            VibeId::Historic => "historic",
            VibeId::Trendy => "trendy",
            VibeId::Nature => "nature",
            VibeId::Foodie => "foodie",
            VibeId::Nightlife => "nightlife",
            VibeId::Hidden => "hidden",
        }
    }
}

impl fmt::Display for VibeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VibeId {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        VibeId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| TrailError::UnknownVibe(s.to_string()))
    }
}

/// Display metadata and on-vibe categories for one vibe.
#[derive(Debug, Clone, Serialize)]
pub struct Vibe {
    pub id: VibeId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub long_description: &'static str,
    /// Word used when the vibe is named in a trail title.
    pub adjective: &'static str,
    pub categories: &'static [&'static str],
}

impl Vibe {
    /// Whether any of the given tags is on-vibe.
    pub fn matches_any<'a>(&self, tags: impl IntoIterator<Item = &'a String>) -> bool {
        tags.into_iter()
            .any(|tag| self.categories.contains(&tag.as_str()))
    }
}

/// Registry of every recognized vibe.
#[derive(Debug, Clone)]
pub struct VibeTaxonomy {
    vibes: HashMap<VibeId, Vibe>,
}

impl Default for VibeTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl VibeTaxonomy {
    /// Create the standard catalogue.
    pub fn new() -> Self {
        let mut vibes = HashMap::new();

        vibes.insert(
            VibeId::Cozy,
            Vibe {
                id: VibeId::Cozy,
                name: "Cozy & Quiet",
                emoji: "☕",
                description: "Peaceful spots for reflection and comfort",
                long_description: "A peaceful afternoon perfect for quiet reflection and comfort",
                adjective: "Cozy",
                categories: &["cafe", "book_store", "library", "tea_house", "quiet_restaurant", "park"],
            },
        );

        vibes.insert(
            VibeId::Artsy,
            Vibe {
                id: VibeId::Artsy,
                name: "Artsy & Creative",
                emoji: "🎨",
                description: "Creative spaces that inspire imagination",
                long_description: "A creative journey through artistic spaces that inspire imagination",
                adjective: "Artsy",
                categories: &["art_gallery", "museum", "creative_space", "design_studio", "artisan_shop", "theater"],
            },
        );

        vibes.insert(
            VibeId::Historic,
            Vibe {
                id: VibeId::Historic,
                name: "Historic & Classic",
                emoji: "🏛️",
                description: "Timeless places with rich stories",
                long_description: "A timeless adventure through places with rich stories and heritage",
                adjective: "Historic",
                categories: &["historic_site", "landmark", "museum", "historic_building", "monument", "church"],
            },
        );

        vibes.insert(
            VibeId::Trendy,
            Vibe {
                id: VibeId::Trendy,
                name: "Trendy & Modern",
                emoji: "✨",
                description: "Contemporary spots with cutting-edge vibes",
                long_description: "A modern exploration of cutting-edge contemporary spots",
                adjective: "Trendy",
                categories: &["modern_restaurant", "boutique", "designer_store", "hip_cafe", "contemporary_art", "bar"],
            },
        );

        vibes.insert(
            VibeId::Nature,
            Vibe {
                id: VibeId::Nature,
                name: "Nature & Outdoors",
                emoji: "🌳",
                description: "Green spaces and outdoor adventures",
                long_description: "An outdoor adventure connecting you with natural beauty",
                adjective: "Nature-filled",
                categories: &["park", "garden", "nature_reserve", "hiking_trail", "botanical_garden", "beach"],
            },
        );

        vibes.insert(
            VibeId::Foodie,
            Vibe {
                id: VibeId::Foodie,
                name: "Foodie Paradise",
                emoji: "🍽️",
                description: "Culinary delights and unique dining experiences",
                long_description: "A culinary journey through unique dining experiences",
                adjective: "Foodie",
                categories: &["restaurant", "food", "food_market", "bakery", "farm_to_table", "gourmet", "wine_bar"],
            },
        );

        vibes.insert(
            VibeId::Nightlife,
            Vibe {
                id: VibeId::Nightlife,
                name: "Nightlife & Energy",
                emoji: "🌙",
                description: "Vibrant evening spots with great energy",
                long_description: "A vibrant evening filled with energy and excitement",
                adjective: "Vibrant",
                categories: &["bar", "nightclub", "live_music", "entertainment", "dance_club", "theater"],
            },
        );

        vibes.insert(
            VibeId::Hidden,
            Vibe {
                id: VibeId::Hidden,
                name: "Hidden Gems",
                emoji: "💎",
                description: "Off-the-beaten-path discoveries",
                long_description: "An off-the-beaten-path discovery of secret local gems",
                adjective: "Hidden Gem",
                categories: &["local_favorite", "hidden_gem", "off_the_beaten_path", "local_secret", "neighborhood_spot"],
            },
        );

        Self { vibes }
    }

    /// Resolve a vibe identifier string.
    pub fn resolve(&self, id: &str) -> TrailResult<&Vibe> {
        let id: VibeId = id.parse()?;
        self.get(id)
            .ok_or_else(|| TrailError::UnknownVibe(id.to_string()))
    }

    /// Get the vibe for an identifier.
    pub fn get(&self, id: VibeId) -> Option<&Vibe> {
        self.vibes.get(&id)
    }

    /// All vibes in catalogue order.
    pub fn all(&self) -> Vec<&Vibe> {
        VibeId::all()
            .iter()
            .filter_map(|id| self.vibes.get(id))
            .collect()
    }

    /// Union of on-vibe categories across the set.
    pub fn categories_for(&self, vibes: &VibeSet) -> BTreeSet<&'static str> {
        vibes
            .iter()
            .filter_map(|id| self.get(id))
            .flat_map(|vibe| vibe.categories.iter().copied())
            .collect()
    }

    /// Whether a candidate carries at least one category implied by the set.
    pub fn is_on_vibe(&self, candidate: &PlaceCandidate, vibes: &VibeSet) -> bool {
        vibes
            .iter()
            .filter_map(|id| self.get(id))
            .any(|vibe| vibe.matches_any(&candidate.categories))
    }
}
