//! Wire records exchanged with the recommendation API.
//!
//! Responses are decoded strictly: unknown or missing fields fail the whole
//! response, and each stop is validated before it reaches the engine. The
//! places provider's `viewport` and photo objects are accepted and ignored.

use serde::{Deserialize, Serialize};
use tracing::warn;

use vibe_core::{GeoPoint, PlaceCandidate, Trail, TrailError, TrailResult, VibeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireGeometry {
    pub location: WireLocation,
    /// Recommended map bounds, passed through from the places provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<serde_json::Value>,
}

/// A stop as the API sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireStop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub user_ratings_total: u32,
    pub types: Vec<String>,
    /// Photo references; either plain strings or provider photo objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<serde_json::Value>>,
    pub place_id: String,
    pub geometry: WireGeometry,
}

impl From<&PlaceCandidate> for WireStop {
    fn from(place: &PlaceCandidate) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            address: place.address.clone(),
            rating: place.rating,
            user_ratings_total: place.rating_count,
            types: place.categories.iter().cloned().collect(),
            photos: None,
            place_id: place.id.clone(),
            geometry: WireGeometry {
                location: WireLocation {
                    lat: place.position.lat,
                    lng: place.position.lng,
                },
                viewport: None,
            },
        }
    }
}

impl TryFrom<WireStop> for PlaceCandidate {
    type Error = TrailError;

    fn try_from(stop: WireStop) -> Result<Self, Self::Error> {
        let position = GeoPoint::new(stop.geometry.location.lat, stop.geometry.location.lng);
        let candidate = PlaceCandidate::new(stop.id, stop.name, position)
            .address(stop.address)
            .rating(stop.rating, stop.user_ratings_total)
            .categories(stop.types);
        candidate.validate()?;
        Ok(candidate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireNarrative {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireTrail {
    pub narrative: WireNarrative,
    pub stops: Vec<WireStop>,
}

impl From<&Trail> for WireTrail {
    fn from(trail: &Trail) -> Self {
        Self {
            narrative: WireNarrative {
                title: trail.narrative().title.clone(),
                description: trail.narrative().description.clone(),
            },
            stops: trail.stops().iter().map(|s| WireStop::from(&**s)).collect(),
        }
    }
}

/// Body of `POST /generate-trail`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub vibes: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl GenerateRequest {
    pub fn new(vibes: &VibeSet, origin: GeoPoint) -> Self {
        Self {
            vibes: vibes.iter().map(|v| v.to_string()).collect(),
            latitude: origin.lat,
            longitude: origin.lng,
        }
    }
}

/// Body of `POST /regenerate-stop`.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerateRequest {
    pub vibes: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub current_trail: WireTrail,
    pub stop_to_replace: usize,
}

/// Response of `POST /generate-trail`. The narrative is re-derived locally.
pub type GenerateResponse = WireTrail;

/// Response of `POST /regenerate-stop`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegenerateResponse {
    pub new_stop: WireStop,
    pub updated_trail: WireTrail,
}

/// Convert wire stops, dropping invalid ones.
///
/// A non-empty response where every stop is invalid is a provider failure.
pub fn into_pool(stops: Vec<WireStop>) -> TrailResult<Vec<PlaceCandidate>> {
    let total = stops.len();
    let pool: Vec<PlaceCandidate> = stops
        .into_iter()
        .filter_map(|stop| match PlaceCandidate::try_from(stop) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                warn!("Dropping provider record: {}", e);
                None
            }
        })
        .collect();

    if total > 0 && pool.is_empty() {
        return Err(TrailError::ProviderUnavailable(format!(
            "all {} records in the response were invalid",
            total
        )));
    }
    Ok(pool)
}
