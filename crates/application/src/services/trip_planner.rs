//! Origin/destination coordinator
//!
//! Holds the waypoint pair and the route fetched for it. A route is only
//! ever valid for the exact pair it was requested with: changing either
//! waypoint clears the stored path immediately, and a fetch that
//! completes after its pair was replaced is discarded rather than stored.
//! Fetching is always an explicit call; the planner never re-fetches on
//! its own.

use std::fmt;
use std::sync::Arc;

use domain::{GeoLocation, RoutePath};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::RoutingPort;

/// Where the planner is in the route-finding flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerPhase {
    /// Origin and/or destination unset
    Incomplete,
    /// Both waypoints set, no route fetched for this pair yet
    Ready,
    /// A route is stored for the current pair
    Routed,
}

/// Snapshot handed to the external map renderer
///
/// The renderer owns all drawing (tiles, markers, polyline); this is the
/// complete set of inputs it needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapScene {
    /// Device location, used as the map center
    pub center: Option<GeoLocation>,
    /// Committed origin marker
    pub origin: Option<GeoLocation>,
    /// Committed destination marker
    pub destination: Option<GeoLocation>,
    /// Polyline coordinates in travel order; empty when no route is held
    pub route: Vec<GeoLocation>,
}

#[derive(Debug, Default)]
struct PlannerState {
    device_location: Option<GeoLocation>,
    origin: Option<GeoLocation>,
    destination: Option<GeoLocation>,
    route: Option<RoutePath>,
    /// Bumped on every waypoint change; a route fetched under an older
    /// epoch is stale and must not be stored
    epoch: u64,
}

/// Coordinates the origin/destination pair and its route
pub struct TripPlanner {
    routing: Arc<dyn RoutingPort>,
    state: Mutex<PlannerState>,
}

impl TripPlanner {
    /// Create a planner over a routing port
    #[must_use]
    pub fn new(routing: Arc<dyn RoutingPort>) -> Self {
        Self {
            routing,
            state: Mutex::new(PlannerState::default()),
        }
    }

    /// Record the device location (map center)
    pub async fn set_device_location(&self, location: Option<GeoLocation>) {
        self.state.lock().await.device_location = location;
    }

    /// Set or clear the origin, invalidating any stored route
    pub async fn set_origin(&self, origin: Option<GeoLocation>) {
        let mut state = self.state.lock().await;
        state.origin = origin;
        state.route = None;
        state.epoch += 1;
    }

    /// Set or clear the destination, invalidating any stored route
    pub async fn set_destination(&self, destination: Option<GeoLocation>) {
        let mut state = self.state.lock().await;
        state.destination = destination;
        state.route = None;
        state.epoch += 1;
    }

    /// The current phase of the flow
    pub async fn phase(&self) -> PlannerPhase {
        let state = self.state.lock().await;
        match (state.origin, state.destination) {
            (Some(_), Some(_)) if state.route.is_some() => PlannerPhase::Routed,
            (Some(_), Some(_)) => PlannerPhase::Ready,
            _ => PlannerPhase::Incomplete,
        }
    }

    /// The stored route, if one is held for the current pair
    pub async fn route(&self) -> Option<RoutePath> {
        self.state.lock().await.route.clone()
    }

    /// Fetch and store the route for the current waypoint pair
    ///
    /// Rejects with a validation error before any network call when a
    /// waypoint is missing. Transport failures and `RouteNotFound`
    /// propagate so the caller can report them distinctly. If a waypoint
    /// changes while the fetch is in flight the result is discarded and
    /// [`ApplicationError::RouteSuperseded`] is returned.
    #[instrument(skip(self))]
    pub async fn find_route(&self) -> Result<RoutePath, ApplicationError> {
        let (origin, destination, epoch) = {
            let state = self.state.lock().await;
            let origin = state.origin.ok_or(ApplicationError::MissingOrigin)?;
            let destination = state
                .destination
                .ok_or(ApplicationError::MissingDestination)?;
            (origin, destination, state.epoch)
        };

        let route = self.routing.fetch_route(origin, destination).await?;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            debug!("Discarding route fetched for a superseded waypoint pair");
            return Err(ApplicationError::RouteSuperseded);
        }

        debug!(points = route.len(), "Route stored");
        state.route = Some(route.clone());
        Ok(route)
    }

    /// Snapshot for the external map renderer
    pub async fn scene(&self) -> MapScene {
        let state = self.state.lock().await;
        MapScene {
            center: state.device_location,
            origin: state.origin,
            destination: state.destination,
            route: state
                .route
                .as_ref()
                .map(|r| r.points().to_vec())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Debug for TripPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripPlanner").finish_non_exhaustive()
    }
}
