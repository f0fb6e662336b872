//! Trail data model.

use std::collections::{BTreeSet, HashSet};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{TrailError, TrailResult};
use crate::taxonomy::VibeId;

/// Upper bound on the number of stops in a trail.
pub const MAX_STOPS: usize = 4;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check the coordinate is finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Shift by a fixed delta in degrees.
    pub fn offset(&self, dlat: f64, dlng: f64) -> Self {
        Self::new(self.lat + dlat, self.lng + dlng)
    }

    /// Great-circle distance in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlng = (other.lng - self.lng).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

/// Ordered, duplicate-free, non-empty selection of vibes.
///
/// Order is the user's selection order; the narrative names the first two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VibeId>", into = "Vec<VibeId>")]
pub struct VibeSet(Vec<VibeId>);

impl VibeSet {
    /// Build a set, dropping repeats and keeping first-selection order.
    pub fn new(ids: Vec<VibeId>) -> TrailResult<Self> {
        let mut seen = HashSet::new();
        let ids: Vec<VibeId> = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        if ids.is_empty() {
            return Err(TrailError::EmptyVibeSet);
        }
        Ok(Self(ids))
    }

    pub fn single(id: VibeId) -> Self {
        Self(vec![id])
    }

    /// Parse identifier strings, failing on the first unknown one.
    pub fn parse<S: AsRef<str>>(ids: &[S]) -> TrailResult<Self> {
        let ids = ids
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<TrailResult<Vec<VibeId>>>()?;
        Self::new(ids)
    }

    pub fn iter(&self) -> impl Iterator<Item = VibeId> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, id: VibeId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[VibeId] {
        &self.0
    }
}

impl TryFrom<Vec<VibeId>> for VibeSet {
    type Error = TrailError;

    fn try_from(ids: Vec<VibeId>) -> Result<Self, Self::Error> {
        Self::new(ids)
    }
}

impl From<VibeSet> for Vec<VibeId> {
    fn from(set: VibeSet) -> Self {
        set.0
    }
}

/// A place a source proposes as a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub rating_count: u32,
    pub categories: BTreeSet<String>,
    pub position: GeoPoint,
}

impl PlaceCandidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            rating: 0.0,
            rating_count: 0,
            categories: BTreeSet::new(),
            position,
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn rating(mut self, rating: f64, count: u32) -> Self {
        self.rating = rating;
        self.rating_count = count;
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    /// Case-insensitive key used for name collisions.
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Reject records that cannot become a stop.
    pub fn validate(&self) -> TrailResult<()> {
        if self.id.trim().is_empty() {
            return Err(TrailError::InvalidCandidate("missing id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(TrailError::InvalidCandidate(format!(
                "missing name for {}",
                self.id
            )));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(TrailError::InvalidCandidate(format!(
                "rating {} out of range for {}",
                self.rating, self.name
            )));
        }
        if !self.position.is_valid() {
            return Err(TrailError::InvalidCandidate(format!(
                "invalid position for {}",
                self.name
            )));
        }
        Ok(())
    }
}

/// A candidate placed in a trail. Its position in the trail is its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrailStop(PlaceCandidate);

impl TrailStop {
    pub fn into_place(self) -> PlaceCandidate {
        self.0
    }
}

impl From<PlaceCandidate> for TrailStop {
    fn from(place: PlaceCandidate) -> Self {
        Self(place)
    }
}

impl Deref for TrailStop {
    type Target = PlaceCandidate;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Generated title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub title: String,
    pub description: String,
}

/// An ordered, duplicate-free stop sequence plus its narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrailRecord")]
pub struct Trail {
    vibes: VibeSet,
    narrative: Narrative,
    stops: Vec<TrailStop>,
}

#[derive(Deserialize)]
struct TrailRecord {
    vibes: VibeSet,
    narrative: Narrative,
    stops: Vec<TrailStop>,
}

impl TryFrom<TrailRecord> for Trail {
    type Error = TrailError;

    fn try_from(record: TrailRecord) -> Result<Self, Self::Error> {
        Trail::new(record.vibes, record.stops, record.narrative)
    }
}

impl Trail {
    /// Build a trail, checking size and uniqueness.
    pub(crate) fn new(vibes: VibeSet, stops: Vec<TrailStop>, narrative: Narrative) -> TrailResult<Self> {
        validate_stops(&stops)?;
        Ok(Self {
            vibes,
            narrative,
            stops,
        })
    }

    pub fn vibes(&self) -> &VibeSet {
        &self.vibes
    }

    pub fn narrative(&self) -> &Narrative {
        &self.narrative
    }

    pub fn stops(&self) -> &[TrailStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stop positions in trail order.
    pub fn waypoints(&self) -> Vec<GeoPoint> {
        self.stops.iter().map(|s| s.position).collect()
    }
}

fn validate_stops(stops: &[TrailStop]) -> TrailResult<()> {
    if stops.is_empty() {
        return Err(TrailError::InvalidTrail("trail has no stops".to_string()));
    }
    if stops.len() > MAX_STOPS {
        return Err(TrailError::InvalidTrail(format!(
            "trail has {} stops, at most {} allowed",
            stops.len(),
            MAX_STOPS
        )));
    }

    let mut names = HashSet::new();
    let mut ids = HashSet::new();
    for stop in stops {
        if !names.insert(stop.name_key()) {
            return Err(TrailError::InvalidTrail(format!(
                "duplicate stop name: {}",
                stop.name
            )));
        }
        if !ids.insert(stop.id.as_str()) {
            return Err(TrailError::InvalidTrail(format!(
                "duplicate stop id: {}",
                stop.id
            )));
        }
    }
    Ok(())
}

/// Input to trail generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailRequest {
    pub vibes: VibeSet,
    pub origin: GeoPoint,
}

impl TrailRequest {
    pub fn new(vibes: VibeSet, origin: GeoPoint) -> Self {
        Self { vibes, origin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str) -> TrailStop {
        PlaceCandidate::new(id, name, GeoPoint::new(40.0, -74.0)).into()
    }

    fn narrative() -> Narrative {
        Narrative {
            title: "t".to_string(),
            description: "d".to_string(),
        }
    }

    #[test]
    fn test_vibe_set_dedup_keeps_order() {
        let set = VibeSet::new(vec![VibeId::Artsy, VibeId::Cozy, VibeId::Artsy]).unwrap();
        assert_eq!(set.as_slice(), &[VibeId::Artsy, VibeId::Cozy]);
    }

    #[test]
    fn test_vibe_set_rejects_empty_and_unknown() {
        assert!(matches!(VibeSet::new(vec![]), Err(TrailError::EmptyVibeSet)));
        assert!(matches!(
            VibeSet::parse(&["cozy", "moody"]),
            Err(TrailError::UnknownVibe(v)) if v == "moody"
        ));
        assert!(serde_json::from_str::<VibeSet>("[]").is_err());
    }

    #[test]
    fn test_candidate_validation() {
        let ok = PlaceCandidate::new("a", "A", GeoPoint::new(1.0, 2.0)).rating(4.5, 10);
        assert!(ok.validate().is_ok());

        let bad_rating = ok.clone().rating(5.5, 1);
        assert!(matches!(bad_rating.validate(), Err(TrailError::InvalidCandidate(_))));

        let bad_pos = PlaceCandidate::new("a", "A", GeoPoint::new(91.0, 0.0));
        assert!(bad_pos.validate().is_err());

        let no_name = PlaceCandidate::new("a", "  ", GeoPoint::new(0.0, 0.0));
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_trail_rejects_duplicates() {
        let vibes = VibeSet::single(VibeId::Cozy);
        let dup_name = vec![stop("1", "Cafe"), stop("2", "CAFE")];
        assert!(Trail::new(vibes.clone(), dup_name, narrative()).is_err());

        let dup_id = vec![stop("1", "Cafe"), stop("1", "Park")];
        assert!(Trail::new(vibes.clone(), dup_id, narrative()).is_err());

        assert!(Trail::new(vibes.clone(), vec![], narrative()).is_err());

        let too_many = (0..5).map(|i| stop(&i.to_string(), &format!("S{}", i))).collect();
        assert!(Trail::new(vibes, too_many, narrative()).is_err());
    }

    #[test]
    fn test_trail_deserialization_validates() {
        let json = r#"{
            "vibes": ["cozy"],
            "narrative": {"title": "t", "description": "d"},
            "stops": [
                {"id": "1", "name": "Cafe", "address": "", "rating": 4.0, "rating_count": 1,
                 "categories": ["cafe"], "position": {"lat": 40.0, "lng": -74.0}},
                {"id": "2", "name": "cafe", "address": "", "rating": 4.0, "rating_count": 1,
                 "categories": ["cafe"], "position": {"lat": 40.0, "lng": -74.0}}
            ]
        }"#;
        assert!(serde_json::from_str::<Trail>(json).is_err());

        let trail = Trail::new(
            VibeSet::single(VibeId::Cozy),
            vec![stop("1", "Cafe"), stop("2", "Park")],
            narrative(),
        )
        .unwrap();
        let back: Trail = serde_json::from_str(&serde_json::to_string(&trail).unwrap()).unwrap();
        assert_eq!(back, trail);
    }

    #[test]
    fn test_distance() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = a.offset(0.001, 0.0);
        let d = a.distance_to(&b);
        assert!((d - 111.2).abs() < 1.0, "got {}", d);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
