//! Intra-route stop ordering.
//!
//! Two phases, both over the open path `depot → s₁ → … → sₖ` (the delivery
//! vehicle does not drive back inside the simulated day):
//!
//! 1. **Nearest neighbour** from the depot: always drive to the closest stop
//!    not yet visited (ties: earlier position in the input route).
//! 2. **Pairwise swap** local search: exchange two stops whenever that
//!    strictly shortens the path, first improvement, for at most
//!    `max_iterations` passes.
//!
//! Routes of one or two stops are returned unchanged.

use dn_core::{DnError, DnResult};
use dn_network::DistanceMatrix;

use crate::Route;

/// Minimum length reduction (km) for a swap to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-9;

/// Tuning for [`RouteSequencer`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencerConfig {
    /// Upper bound on full swap passes.  `0` disables local search.
    pub max_iterations: usize,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self { max_iterations: 100 }
    }
}

/// Orders the stops of a route into a short path from its depot.
#[derive(Clone, Debug, Default)]
pub struct RouteSequencer {
    config: SequencerConfig,
}

impl RouteSequencer {
    pub fn new(config: SequencerConfig) -> Self {
        Self { config }
    }

    /// Return `route` with its stops reordered.  The result is a permutation
    /// of the input stop set.
    ///
    /// # Errors
    ///
    /// `Validation` if the route's depot or one of its stops is unknown to
    /// `matrix`.
    pub fn sequence(&self, matrix: &DistanceMatrix, route: &Route) -> DnResult<Route> {
        if route.len() <= 2 {
            return Ok(route.clone());
        }

        let depot = matrix
            .depot_index(route.depot)
            .ok_or_else(|| DnError::Validation(format!("unknown depot {}", route.depot)))?;
        let stops = route
            .stops
            .iter()
            .map(|&id| {
                matrix
                    .point_index(id)
                    .ok_or_else(|| DnError::Validation(format!("unknown demand point {id}")))
            })
            .collect::<DnResult<Vec<usize>>>()?;

        let mut order = nearest_neighbour(matrix, depot, &stops);
        let passes = self.swap_search(matrix, depot, &mut order);

        tracing::trace!(route = %route.id, stops = order.len(), passes, "route sequenced");

        Ok(Route {
            id:    route.id,
            depot: route.depot,
            stops: order.into_iter().map(|j| matrix.point_id(j)).collect(),
        })
    }

    /// First-improvement pairwise swaps.  Returns the number of passes run.
    fn swap_search(&self, matrix: &DistanceMatrix, depot: usize, order: &mut [usize]) -> usize {
        let mut best = path_length(matrix, depot, order);
        let mut passes = 0;

        while passes < self.config.max_iterations {
            passes += 1;
            let mut improved = false;
            for a in 0..order.len() {
                for b in (a + 1)..order.len() {
                    order.swap(a, b);
                    let candidate = path_length(matrix, depot, order);
                    if candidate < best - IMPROVEMENT_EPS {
                        best = candidate;
                        improved = true;
                    } else {
                        order.swap(a, b);
                    }
                }
            }
            if !improved {
                break;
            }
        }
        passes
    }
}

/// Greedy nearest-unvisited ordering starting at `depot`.
pub(crate) fn nearest_neighbour(matrix: &DistanceMatrix, depot: usize, stops: &[usize]) -> Vec<usize> {
    let mut remaining = stops.to_vec();
    let mut order = Vec::with_capacity(stops.len());

    let mut current: Option<usize> = None;
    while !remaining.is_empty() {
        let dist = |j: usize| match current {
            None => matrix.depot_to_point(depot, j),
            Some(c) => matrix.between_points(c, j),
        };
        let mut best = 0;
        for k in 1..remaining.len() {
            if dist(remaining[k]) < dist(remaining[best]) {
                best = k;
            }
        }
        let next = remaining.remove(best);
        order.push(next);
        current = Some(next);
    }
    order
}

/// Length (km) of `depot → order[0] → … → order[k-1]`.
pub(crate) fn path_length(matrix: &DistanceMatrix, depot: usize, order: &[usize]) -> f64 {
    let Some(&first) = order.first() else {
        return 0.0;
    };
    matrix.depot_to_point(depot, first)
        + order.windows(2).map(|w| matrix.between_points(w[0], w[1])).sum::<f64>()
}
