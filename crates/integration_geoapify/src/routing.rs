//! Geoapify routing client
//!
//! Fetches a driving route between two waypoints via the `/routing`
//! endpoint and normalizes the response geometry into a flat, ordered
//! polyline. The provider returns one or more line segments of
//! `[lon, lat]` pairs; segment boundaries carry no meaning for rendering
//! and are discarded, duplicate boundary points included as-is.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoLocation, RouteMetrics, RoutePath};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeoapifyConfig;
use crate::error::GeoapifyError;

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch a driving route between two waypoints
    ///
    /// Fails with [`GeoapifyError::RouteNotFound`] when the provider
    /// returns zero route features; transport and parse failures
    /// propagate as their own variants.
    async fn fetch_route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<RoutePath, GeoapifyError>;

    /// Check if the routing service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Geoapify-backed routing client
#[derive(Debug)]
pub struct GeoapifyRoutingClient {
    client: Client,
    config: GeoapifyConfig,
}

impl GeoapifyRoutingClient {
    /// Create a new routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client cannot be initialized.
    pub fn new(config: &GeoapifyConfig) -> Result<Self, GeoapifyError> {
        config.validate().map_err(GeoapifyError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeoapifyError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Format the waypoints query parameter as `lat1,lon1|lat2,lon2`
    fn format_waypoints(origin: GeoLocation, destination: GeoLocation) -> String {
        format!(
            "{},{}|{},{}",
            origin.latitude(),
            origin.longitude(),
            destination.latitude(),
            destination.longitude()
        )
    }

    /// Parse a routing response into a normalized path
    ///
    /// Flattens all geometry segments into one ordered sequence, swapping
    /// each `[lon, lat]` pair into latitude/longitude. Distance and
    /// duration pass through unconverted when present.
    fn parse_route(body: &str, from: &str, to: &str) -> Result<RoutePath, GeoapifyError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| GeoapifyError::ParseError(e.to_string()))?;

        let feature =
            raw.features
                .into_iter()
                .next()
                .ok_or_else(|| GeoapifyError::RouteNotFound {
                    from: from.to_string(),
                    to: to.to_string(),
                })?;

        let mut points =
            Vec::with_capacity(feature.geometry.coordinates.iter().map(Vec::len).sum());
        for segment in feature.geometry.coordinates {
            for pair in segment {
                points.push(
                    GeoLocation::from_lon_lat(pair)
                        .map_err(|e| GeoapifyError::ParseError(e.to_string()))?,
                );
            }
        }

        let mut path = RoutePath::new(points);
        if let (Some(distance), Some(time)) =
            (feature.properties.distance, feature.properties.time)
        {
            path = path.with_metrics(RouteMetrics {
                distance_meters: distance,
                duration_seconds: time,
            });
        }

        Ok(path)
    }
}

#[async_trait]
impl RoutingClient for GeoapifyRoutingClient {
    #[instrument(skip(self), fields(from = %origin, to = %destination))]
    async fn fetch_route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<RoutePath, GeoapifyError> {
        let url = format!("{}/routing", self.config.base_url);

        let params = [
            ("waypoints", Self::format_waypoints(origin, destination)),
            ("mode", "drive".to_string()),
            (
                "apiKey",
                self.config.api_key().unwrap_or_default().to_string(),
            ),
        ];

        debug!(%url, "Fetching route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeoapifyError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeoapifyError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeoapifyError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(GeoapifyError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoapifyError::ParseError(e.to_string()))?;

        let path = Self::parse_route(&body, &origin.to_string(), &destination.to_string())?;
        debug!(points = path.len(), "Route received");
        Ok(path)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/routing", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    #[serde(default)]
    features: Vec<RawRouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RawRouteFeature {
    geometry: RawRouteGeometry,
    #[serde(default)]
    properties: RawRouteProperties,
}

#[derive(Debug, Deserialize)]
struct RawRouteGeometry {
    coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRouteProperties {
    distance: Option<f64>,
    time: Option<f64>,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_format_waypoints() {
        let origin = GeoLocation::new_unchecked(40.4167, -3.7038);
        let destination = GeoLocation::new_unchecked(40.453, -3.6883);
        assert_eq!(
            GeoapifyRoutingClient::format_waypoints(origin, destination),
            "40.4167,-3.7038|40.453,-3.6883"
        );
    }

    #[test]
    fn test_parse_route_flattens_segments() {
        // Two segments sharing a boundary point; the duplicate survives
        let json = r#"{
            "features": [{
                "geometry": {
                    "coordinates": [
                        [[10.0, 20.0], [11.0, 21.0]],
                        [[11.0, 21.0], [12.0, 22.0]]
                    ]
                },
                "properties": { "distance": 4500.0, "time": 720.0 }
            }]
        }"#;

        let path = GeoapifyRoutingClient::parse_route(json, "a", "b").unwrap();
        assert_eq!(path.len(), 4);

        let expected = [
            GeoLocation::new_unchecked(20.0, 10.0),
            GeoLocation::new_unchecked(21.0, 11.0),
            GeoLocation::new_unchecked(21.0, 11.0),
            GeoLocation::new_unchecked(22.0, 12.0),
        ];
        assert_eq!(path.points(), expected.as_slice());

        let metrics = path.metrics().expect("metrics present");
        assert!((metrics.distance_meters - 4500.0).abs() < f64::EPSILON);
        assert!((metrics.duration_seconds - 720.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_route_single_segment() {
        let json = r#"{
            "features": [{
                "geometry": { "coordinates": [[[10.0, 20.0], [11.0, 21.0]]] },
                "properties": {}
            }]
        }"#;

        let path = GeoapifyRoutingClient::parse_route(json, "a", "b").unwrap();
        assert_eq!(path.len(), 2);
        assert!(path.metrics().is_none());
    }

    #[test]
    fn test_parse_route_empty_features_is_route_not_found() {
        let result = GeoapifyRoutingClient::parse_route(r#"{ "features": [] }"#, "a", "b");
        match result {
            Err(GeoapifyError::RouteNotFound { from, to }) => {
                assert_eq!(from, "a");
                assert_eq!(to, "b");
            },
            other => unreachable!("expected RouteNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_route_missing_features_is_route_not_found() {
        let result = GeoapifyRoutingClient::parse_route("{}", "a", "b");
        assert!(matches!(result, Err(GeoapifyError::RouteNotFound { .. })));
    }

    #[test]
    fn test_parse_route_invalid_json() {
        let result = GeoapifyRoutingClient::parse_route("not json", "a", "b");
        assert!(matches!(result, Err(GeoapifyError::ParseError(_))));
    }

    #[test]
    fn test_parse_route_out_of_range_coordinates() {
        let json = r#"{
            "features": [{
                "geometry": { "coordinates": [[[200.0, 20.0]]] },
                "properties": {}
            }]
        }"#;

        let result = GeoapifyRoutingClient::parse_route(json, "a", "b");
        assert!(matches!(result, Err(GeoapifyError::ParseError(_))));
    }

    proptest! {
        /// Flattened path length equals the sum of segment lengths, with
        /// provider order preserved and every (lon, lat) pair swapped.
        #[test]
        fn parse_route_flatten_preserves_order_and_swap(
            segments in prop::collection::vec(
                prop::collection::vec(
                    (-180.0f64..=180.0f64, -90.0f64..=90.0f64),
                    1..8
                ),
                1..6
            )
        ) {
            let coordinates: Vec<Vec<[f64; 2]>> = segments
                .iter()
                .map(|seg| seg.iter().map(|&(lon, lat)| [lon, lat]).collect())
                .collect();
            let body = serde_json::json!({
                "features": [{
                    "geometry": { "coordinates": coordinates },
                    "properties": {}
                }]
            })
            .to_string();

            let path = GeoapifyRoutingClient::parse_route(&body, "a", "b").unwrap();

            let flat: Vec<(f64, f64)> = segments.into_iter().flatten().collect();
            prop_assert_eq!(path.len(), flat.len());
            for (point, (lon, lat)) in path.points().iter().zip(flat) {
                prop_assert!((point.latitude() - lat).abs() < f64::EPSILON);
                prop_assert!((point.longitude() - lon).abs() < f64::EPSILON);
            }
        }
    }
}
