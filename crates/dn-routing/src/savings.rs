//! Clarke–Wright savings heuristic.
//!
//! # Algorithm
//!
//! Start with one route per demand point (depot → point → depot).  Serving
//! `i` and `j` on one route instead of two saves
//!
//! ```text
//! s(i, j) = d(depot, i) + d(depot, j) − d(i, j)
//! ```
//!
//! Pairs are visited in decreasing order of saving (ties: ascending `(i, j)`
//! by input position).  When `i` and `j` sit on different routes and the
//! merged route stays within `max_stops`, route(i) is extended by route(j)
//! and route(j) is discarded.  Great-circle distance obeys the triangle
//! inequality, so every saving is non-negative and no pair is filtered out.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of demand points (dominated by sorting).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use dn_core::{DepotId, DnError, DnResult, PointId, RouteId};
use dn_network::DistanceMatrix;

use crate::Route;

/// Default maximum number of stops on one route.
pub const DEFAULT_MAX_STOPS: usize = 10;

/// The saving for serving points `i` and `j` (input positions) together.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Saving {
    pub i:     usize,
    pub j:     usize,
    pub value: f64,
}

/// Clusters demand points into size-bounded routes.
#[derive(Clone, Debug)]
pub struct RouteBuilder {
    max_stops: usize,
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self { max_stops: DEFAULT_MAX_STOPS }
    }
}

impl RouteBuilder {
    /// Fails with `Configuration` if `max_stops` is zero.
    pub fn new(max_stops: usize) -> DnResult<Self> {
        if max_stops < 1 {
            return Err(DnError::Configuration("max_stops_per_route must be at least 1".into()));
        }
        Ok(Self { max_stops })
    }

    pub fn max_stops(&self) -> usize {
        self.max_stops
    }

    /// All pairwise savings for `points` relative to `depot`, in merge order.
    ///
    /// `i`/`j` in the result are positions within `points`, with `i < j`.
    pub fn savings(
        &self,
        matrix: &DistanceMatrix,
        depot:  usize,
        points: &[usize],
    ) -> Vec<Saving> {
        let n = points.len();
        let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (points[i], points[j]);
                let value = matrix.depot_to_point(depot, a) + matrix.depot_to_point(depot, b)
                    - matrix.between_points(a, b);
                savings.push(Saving { i, j, value });
            }
        }

        savings.sort_by(|x, y| y.value.total_cmp(&x.value).then((x.i, x.j).cmp(&(y.i, y.j))));
        savings
    }

    /// Cluster `points` into routes served from `depot`.
    ///
    /// Every point appears in exactly one returned route and no route exceeds
    /// `max_stops`.  Route ids are assigned in output order.
    ///
    /// # Errors
    ///
    /// `Validation` if `depot` or any point id is unknown to `matrix`, or a
    /// point id is repeated.
    pub fn build(
        &self,
        matrix: &DistanceMatrix,
        depot:  DepotId,
        points: &[PointId],
    ) -> DnResult<Vec<Route>> {
        let depot_idx = matrix
            .depot_index(depot)
            .ok_or_else(|| DnError::Validation(format!("unknown depot {depot}")))?;
        let indices = points
            .iter()
            .map(|&id| {
                matrix
                    .point_index(id)
                    .ok_or_else(|| DnError::Validation(format!("unknown demand point {id}")))
            })
            .collect::<DnResult<Vec<usize>>>()?;

        let mut sorted = indices.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(DnError::Validation("demand-point list contains duplicates".into()));
        }

        let clusters = self.cluster(matrix, depot_idx, &indices);
        tracing::debug!(
            points = indices.len(),
            routes = clusters.len(),
            max_stops = self.max_stops,
            "savings clustering complete"
        );

        Ok(clusters
            .into_iter()
            .enumerate()
            .map(|(r, members)| Route {
                id:    RouteId(r as u32),
                depot,
                stops: members.into_iter().map(|k| matrix.point_id(indices[k])).collect(),
            })
            .collect())
    }

    /// Core merge loop over input positions.  Surviving routes are returned
    /// in the order of the slot that absorbed them.
    fn cluster(&self, matrix: &DistanceMatrix, depot: usize, points: &[usize]) -> Vec<Vec<usize>> {
        let n = points.len();
        let mut route_of: Vec<usize> = (0..n).collect();
        let mut members: Vec<Vec<usize>> = (0..n).map(|k| vec![k]).collect();

        for saving in self.savings(matrix, depot, points) {
            let ri = route_of[saving.i];
            let rj = route_of[saving.j];
            if ri == rj || members[ri].len() + members[rj].len() > self.max_stops {
                continue;
            }

            let absorbed = std::mem::take(&mut members[rj]);
            for &k in &absorbed {
                route_of[k] = ri;
            }
            members[ri].extend(absorbed);
        }

        members.into_iter().filter(|m| !m.is_empty()).collect()
    }
}
