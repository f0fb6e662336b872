//! Walking directions between trail stops.
//!
//! Directions are advisory. Provider failures are logged and replaced by a
//! local estimate; they never fail the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vibe_core::{GeoPoint, TrailError, TrailResult};

use crate::config::{RemoteConfig, DEFAULT_DIRECTIONS_URL};

/// Assumed walking speed for local estimates, in m/s.
pub const WALKING_SPEED_MPS: f64 = 1.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionStep {
    pub instruction: String,
    pub distance_m: f64,
    pub duration_secs: f64,
    pub kind: String,
}

/// Route summary for an ordered list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkingDirections {
    pub distance_m: f64,
    pub duration_secs: f64,
    /// `[lng, lat]` pairs, GeoJSON order.
    pub geometry: Vec<[f64; 2]>,
    pub steps: Vec<DirectionStep>,
    /// True when computed locally rather than by the provider.
    pub estimated: bool,
}

impl WalkingDirections {
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_secs.round() as u64)
    }

    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance_m.round() as u64)
    }
}

/// "45 sec", "12 min" or "1h 5m".
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{} sec", secs)
    } else if secs < 3600 {
        format!("{} min", secs / 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// "850 m" or "1.2 km".
pub fn format_distance(meters: u64) -> String {
    if meters < 1000 {
        format!("{} m", meters)
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}

#[derive(Debug, Deserialize)]
struct MapboxResponse {
    #[serde(default)]
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    distance: f64,
    duration: f64,
    geometry: MapboxGeometry,
    #[serde(default)]
    legs: Vec<MapboxLeg>,
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct MapboxLeg {
    #[serde(default)]
    steps: Vec<MapboxStep>,
}

#[derive(Debug, Deserialize)]
struct MapboxStep {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    maneuver: MapboxManeuver,
}

#[derive(Debug, Default, Deserialize)]
struct MapboxManeuver {
    instruction: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl From<MapboxRoute> for WalkingDirections {
    fn from(route: MapboxRoute) -> Self {
        let steps = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| DirectionStep {
                instruction: step.maneuver.instruction.unwrap_or_else(|| "Continue".to_string()),
                distance_m: step.distance,
                duration_secs: step.duration,
                kind: step.maneuver.kind.unwrap_or_else(|| "continue".to_string()),
            })
            .collect();

        Self {
            distance_m: route.distance,
            duration_secs: route.duration,
            geometry: route.geometry.coordinates,
            steps,
            estimated: false,
        }
    }
}

/// Directions client. Uses Mapbox when a token is configured.
pub struct DirectionsClient {
    token: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl DirectionsClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            base_url: DEFAULT_DIRECTIONS_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &RemoteConfig) -> TrailResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TrailError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            token: config.directions_token.clone(),
            base_url: config.directions_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Directions through `points` in order. `None` for fewer than two points.
    pub async fn walking_directions(&self, points: &[GeoPoint]) -> Option<WalkingDirections> {
        if points.len() < 2 {
            return None;
        }

        let Some(token) = &self.token else {
            return Some(estimate(points));
        };

        match self.fetch_mapbox(token, points).await {
            Ok(Some(directions)) => Some(directions),
            Ok(None) => {
                warn!("No routes in directions response, using local estimate");
                Some(estimate(points))
            }
            Err(e) => {
                warn!("Directions provider failed ({}), using local estimate", e);
                Some(estimate(points))
            }
        }
    }

    async fn fetch_mapbox(
        &self,
        token: &str,
        points: &[GeoPoint],
    ) -> Result<Option<WalkingDirections>, reqwest::Error> {
        let coords = points
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        let url = format!("{}/walking/{}", self.base_url, coords);
        debug!("GET {}", url);

        let response: MapboxResponse = self
            .client
            .get(&url)
            .query(&[
                ("access_token", token),
                ("geometries", "geojson"),
                ("steps", "true"),
                ("overview", "full"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.routes.into_iter().next().map(WalkingDirections::from))
    }
}

/// Straight-line estimate with one step per leg.
pub fn estimate(points: &[GeoPoint]) -> WalkingDirections {
    let steps: Vec<DirectionStep> = points
        .windows(2)
        .enumerate()
        .map(|(i, leg)| {
            let distance = leg[0].distance_to(&leg[1]);
            DirectionStep {
                instruction: format!("Walk to Stop {}", i + 2),
                distance_m: distance,
                duration_secs: distance / WALKING_SPEED_MPS,
                kind: "continue".to_string(),
            }
        })
        .collect();

    WalkingDirections {
        distance_m: steps.iter().map(|s| s.distance_m).sum(),
        duration_secs: steps.iter().map(|s| s.duration_secs).sum(),
        geometry: points.iter().map(|p| [p.lng, p.lat]).collect(),
        steps,
        estimated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45 sec");
        assert_eq!(format_duration(60), "1 min");
        assert_eq!(format_duration(754), "12 min");
        assert_eq!(format_duration(3900), "1h 5m");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(850), "850 m");
        assert_eq!(format_distance(1000), "1.0 km");
        assert_eq!(format_distance(1340), "1.3 km");
    }

    #[test]
    fn test_estimate_per_leg() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let points = vec![a, a.offset(0.001, 0.0), a.offset(0.002, 0.0)];
        let directions = estimate(&points);

        assert!(directions.estimated);
        assert_eq!(directions.steps.len(), 2);
        assert_eq!(directions.steps[0].instruction, "Walk to Stop 2");
        assert_eq!(directions.steps[1].instruction, "Walk to Stop 3");
        assert!((directions.distance_m - 222.4).abs() < 2.0);
        assert!((directions.duration_secs - directions.distance_m / 1.4).abs() < 1e-6);
        assert_eq!(directions.geometry[0], [-74.0060, 40.7128]);
    }

    #[tokio::test]
    async fn test_too_few_points() {
        let client = DirectionsClient::new(None);
        assert!(client.walking_directions(&[]).await.is_none());
        assert!(client
            .walking_directions(&[GeoPoint::new(1.0, 1.0)])
            .await
            .is_none());
    }

    #[test]
    fn test_from_config_carries_token_and_url() {
        let config = RemoteConfig::default()
            .directions_token("pk.test")
            .directions_url("http://localhost:9000/directions/");
        let client = DirectionsClient::from_config(&config).unwrap();
        assert!(client.has_token());
        assert_eq!(client.base_url, "http://localhost:9000/directions");

        let offline = DirectionsClient::from_config(&RemoteConfig::default()).unwrap();
        assert!(!offline.has_token());
    }

    #[tokio::test]
    async fn test_no_token_estimates() {
        let client = DirectionsClient::new(None);
        let a = GeoPoint::new(40.0, -74.0);
        let directions = client
            .walking_directions(&[a, a.offset(0.01, 0.0)])
            .await
            .unwrap();
        assert!(directions.estimated);
    }

    #[test]
    fn test_parse_mapbox_route() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 1234.5,
                "duration": 900.0,
                "weight": 900.0,
                "geometry": {"type": "LineString", "coordinates": [[-74.0, 40.0], [-74.01, 40.01]]},
                "legs": [{"steps": [
                    {"distance": 600.0, "duration": 450.0, "maneuver": {"instruction": "Head north", "type": "depart"}},
                    {"distance": 634.5, "duration": 450.0, "maneuver": {"type": "arrive"}}
                ]}]
            }]
        }"#;
        let response: MapboxResponse = serde_json::from_str(json).unwrap();
        let directions = WalkingDirections::from(response.routes.into_iter().next().unwrap());

        assert!(!directions.estimated);
        assert_eq!(directions.steps.len(), 2);
        assert_eq!(directions.steps[0].instruction, "Head north");
        assert_eq!(directions.steps[1].instruction, "Continue");
        assert_eq!(directions.steps[1].kind, "arrive");
        assert_eq!(directions.formatted_distance(), "1.2 km");
        assert_eq!(directions.formatted_duration(), "15 min");
    }
}
