//! The `Optimizer` facade.
//!
//! Owns the validated network and the distance matrix computed once at
//! construction.  Transportation flow, daily routes, rendering
//! coordinates and leg distances all read the same cached tables.

use dn_core::{DemandPoint, Depot, DepotId, DnError, DnResult, GeoPoint, PointId, validate_network};
use dn_network::{DistanceMatrix, NetworkModel, TransportPlan, TransportationSolver};

use crate::savings::DEFAULT_MAX_STOPS;
use crate::sequencer::path_length;
use crate::{Route, RouteBuilder, RouteSequencer, SequencerConfig};

/// Construction-time routing configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    /// Upper bound on stops per route.  Must be ≥ 1.  Default: 10.
    pub max_stops_per_route: usize,
    /// Depot every route starts from.  `None` selects the first depot.
    pub reference_depot:     Option<DepotId>,
    /// Local-search bound for stop sequencing.
    pub sequencer:           SequencerConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_stops_per_route: DEFAULT_MAX_STOPS,
            reference_depot:     None,
            sequencer:           SequencerConfig::default(),
        }
    }
}

/// Distribution-network optimizer: transportation flow plus vehicle routes.
pub struct Optimizer {
    depots:    Vec<Depot>,
    points:    Vec<DemandPoint>,
    matrix:    DistanceMatrix,
    network:   NetworkModel,
    depot_idx: usize,
    builder:   RouteBuilder,
    sequencer: RouteSequencer,
    solver:    TransportationSolver,
}

impl Optimizer {
    /// Validate inputs eagerly, then compute the distance matrix and network.
    ///
    /// # Errors
    ///
    /// - `Configuration`: empty depot/point list, `max_stops_per_route < 1`,
    ///   unknown `reference_depot`.
    /// - `Validation`: bad coordinates, negative quantities, duplicate ids.
    pub fn new(depots: Vec<Depot>, points: Vec<DemandPoint>, config: OptimizerConfig) -> DnResult<Self> {
        validate_network(&depots, &points)?;
        let builder = RouteBuilder::new(config.max_stops_per_route)?;

        let depot_idx = match config.reference_depot {
            None => 0,
            Some(id) => depots.iter().position(|d| d.id == id).ok_or_else(|| {
                DnError::Configuration(format!("reference depot {id} is not in the depot list"))
            })?,
        };

        let matrix = DistanceMatrix::compute(&depots, &points)?;
        let network = NetworkModel::build(&depots, &points, &matrix);

        tracing::info!(
            depots = depots.len(),
            points = points.len(),
            reference_depot = %depots[depot_idx].id,
            max_stops = config.max_stops_per_route,
            "optimizer ready"
        );

        Ok(Self {
            depots,
            points,
            matrix,
            network,
            depot_idx,
            builder,
            sequencer: RouteSequencer::new(config.sequencer),
            solver: TransportationSolver::default(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn points(&self) -> &[DemandPoint] {
        &self.points
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn network(&self) -> &NetworkModel {
        &self.network
    }

    pub fn reference_depot(&self) -> &Depot {
        &self.depots[self.depot_idx]
    }

    pub fn max_stops(&self) -> usize {
        self.builder.max_stops()
    }

    // ── Transportation ────────────────────────────────────────────────────

    /// Minimum-cost flow from depots to demand points.
    pub fn solve_transportation(&self) -> DnResult<TransportPlan> {
        self.solver.solve(&self.depots, &self.points, &self.matrix)
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Savings clusters over every demand point, unsequenced.
    pub fn build_routes(&self) -> DnResult<Vec<Route>> {
        let ids: Vec<PointId> = self.points.iter().map(|p| p.id).collect();
        self.builder.build(&self.matrix, self.reference_depot().id, &ids)
    }

    /// The current routing plan: savings clusters with sequenced stops.
    pub fn current_routes(&self) -> DnResult<Vec<Route>> {
        self.build_routes()?
            .iter()
            .map(|r| self.sequencer.sequence(&self.matrix, r))
            .collect()
    }

    /// Stop coordinates of each route, for rendering.
    pub fn route_coordinates(&self, routes: &[Route]) -> DnResult<Vec<Vec<GeoPoint>>> {
        routes
            .iter()
            .map(|r| {
                r.stops
                    .iter()
                    .map(|&id| self.point_idx(id).map(|j| self.matrix.point_location(j)))
                    .collect::<DnResult<Vec<GeoPoint>>>()
            })
            .collect()
    }

    /// `current_routes` as coordinate sequences.
    pub fn current_route_coordinates(&self) -> DnResult<Vec<Vec<GeoPoint>>> {
        self.route_coordinates(&self.current_routes()?)
    }

    /// Distance (km) of each leg: depot → stop₁, then stop → stop.
    pub fn leg_distances(&self, route: &Route) -> DnResult<Vec<f64>> {
        let depot = self
            .matrix
            .depot_index(route.depot)
            .ok_or_else(|| DnError::Validation(format!("unknown depot {}", route.depot)))?;

        let mut legs = Vec::with_capacity(route.len());
        let mut prev: Option<usize> = None;
        for &id in &route.stops {
            let j = self.point_idx(id)?;
            legs.push(match prev {
                None => self.matrix.depot_to_point(depot, j),
                Some(p) => self.matrix.between_points(p, j),
            });
            prev = Some(j);
        }
        Ok(legs)
    }

    /// Total open-path length of `route` in km.
    pub fn route_length(&self, route: &Route) -> DnResult<f64> {
        let depot = self
            .matrix
            .depot_index(route.depot)
            .ok_or_else(|| DnError::Validation(format!("unknown depot {}", route.depot)))?;
        let order = route
            .stops
            .iter()
            .map(|&id| self.point_idx(id))
            .collect::<DnResult<Vec<usize>>>()?;
        Ok(path_length(&self.matrix, depot, &order))
    }

    fn point_idx(&self, id: PointId) -> DnResult<usize> {
        self.matrix
            .point_index(id)
            .ok_or_else(|| DnError::Validation(format!("unknown demand point {id}")))
    }
}
