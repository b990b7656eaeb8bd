//! The `DailyPlanner` trait: where the simulator gets each day's routes.

use dn_core::{PointId, RouteId};
use dn_routing::Optimizer;

use crate::{SimError, SimResult};

/// A route ready to drive: stops in visiting order plus the length of every
/// leg (`legs_km[k]` is the leg ending at `stops[k]`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedRoute {
    pub id:      RouteId,
    pub stops:   Vec<PointId>,
    pub legs_km: Vec<f64>,
}

impl PlannedRoute {
    pub fn total_km(&self) -> f64 {
        self.legs_km.iter().sum()
    }

    /// Reject a route whose leg list does not pair up one leg per stop.
    pub fn check(&self) -> SimResult<()> {
        if self.legs_km.len() != self.stops.len() {
            return Err(SimError::Config(format!(
                "{} has {} stops but {} leg distances",
                self.id,
                self.stops.len(),
                self.legs_km.len()
            )));
        }
        Ok(())
    }
}

/// Source of the routing plan for a simulated day.
///
/// # Thread safety
///
/// Replications may run in parallel with the `parallel` feature, sharing one
/// planner by reference, so implementations must be `Send + Sync`.
pub trait DailyPlanner: Send + Sync {
    fn plan_day(&self, day: u32) -> SimResult<Vec<PlannedRoute>>;
}

/// The optimizer re-plans from its cached distance matrix every day:
/// savings clustering, then stop sequencing.
impl DailyPlanner for Optimizer {
    fn plan_day(&self, _day: u32) -> SimResult<Vec<PlannedRoute>> {
        let routes = self.current_routes()?;
        routes
            .into_iter()
            .map(|route| -> SimResult<PlannedRoute> {
                let legs_km = self.leg_distances(&route)?;
                Ok(PlannedRoute { id: route.id, stops: route.stops, legs_km })
            })
            .collect()
    }
}
