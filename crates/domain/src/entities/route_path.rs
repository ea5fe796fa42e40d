//! Route path entity
//!
//! The normalized result of a route fetch: an ordered polyline of
//! coordinates in travel order, optionally paired with the provider's
//! distance and duration figures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Provider-reported route metrics, passed through unconverted
///
/// Distance is in meters and duration in seconds, exactly as the routing
/// endpoint reports them. Converting to display units (km, minutes) is a
/// presentation concern; the helpers below exist for that layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RouteMetrics {
    /// Route length in meters
    pub distance_meters: f64,
    /// Travel time in seconds
    pub duration_seconds: f64,
}

impl RouteMetrics {
    /// Distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Duration in minutes
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }
}

/// A driving route as an ordered sequence of coordinates
///
/// Insertion order is travel order. Segment boundaries from the provider
/// are not represented; duplicate boundary points between segments are
/// preserved as-is. A path is replaced wholesale on every new fetch,
/// never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePath {
    points: Vec<GeoLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<RouteMetrics>,
}

impl RoutePath {
    /// Create a path from points in travel order
    #[must_use]
    pub fn new(points: Vec<GeoLocation>) -> Self {
        Self {
            points,
            metrics: None,
        }
    }

    /// Attach provider metrics to this path
    #[must_use]
    pub fn with_metrics(mut self, metrics: RouteMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The coordinates in travel order
    #[must_use]
    pub fn points(&self) -> &[GeoLocation] {
        &self.points
    }

    /// Number of points on the path
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point of the path, if any
    #[must_use]
    pub fn start(&self) -> Option<GeoLocation> {
        self.points.first().copied()
    }

    /// Last point of the path, if any
    #[must_use]
    pub fn end(&self) -> Option<GeoLocation> {
        self.points.last().copied()
    }

    /// Provider metrics, when the provider supplied them
    #[must_use]
    pub const fn metrics(&self) -> Option<RouteMetrics> {
        self.metrics
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        self.metrics.map_or_else(
            || format!("{} points", self.points.len()),
            |m| {
                format!(
                    "{} points, {:.2} km, {:.0} min",
                    self.points.len(),
                    m.distance_km(),
                    m.duration_minutes().round()
                )
            },
        )
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}
