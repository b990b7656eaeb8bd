//! A single vehicle route.

use dn_core::{DepotId, PointId, RouteId};

/// An ordered sequence of demand-point stops served from one depot.
///
/// Routes are ephemeral: the planner produces a fresh set every day and the
/// `id` is only the route's position within that day's plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id:    RouteId,
    pub depot: DepotId,
    pub stops: Vec<PointId>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
