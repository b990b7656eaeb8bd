//! Cached great-circle distance tables.
//!
//! # Data layout
//!
//! Two dense row-major tables, both computed once at construction:
//!
//! ```text
//! depot_km[i * n + j]   depot i  → point j
//! point_km[a * n + b]   point a  → point b   (symmetric, zero diagonal)
//! ```
//!
//! Everything downstream (transportation costs, savings, sequencing, leg
//! distances) reads from these tables, so a route's length and the simulator's
//! travelled distance are always computed from identical numbers.

use rustc_hash::FxHashMap;

use dn_core::{DemandPoint, Depot, DepotId, DnResult, GeoPoint, PointId};

/// Depot×point and point×point distances in kilometres.  Read-only after
/// [`compute`](Self::compute).
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    depot_ids:  Vec<DepotId>,
    point_ids:  Vec<PointId>,
    depot_pos:  Vec<GeoPoint>,
    point_pos:  Vec<GeoPoint>,
    depot_km:   Vec<f64>,
    point_km:   Vec<f64>,
    depot_idx:  FxHashMap<DepotId, usize>,
    point_idx:  FxHashMap<PointId, usize>,
}

impl DistanceMatrix {
    /// Build both tables.
    ///
    /// Fails with `Validation` if any coordinate is out of range; no other
    /// failure modes.  Quantities and id uniqueness are checked by
    /// [`dn_core::validate_network`], not here.
    pub fn compute(depots: &[Depot], points: &[DemandPoint]) -> DnResult<Self> {
        for d in depots {
            d.location.validate()?;
        }
        for p in points {
            p.location.validate()?;
        }

        let m = depots.len();
        let n = points.len();

        let mut depot_km = Vec::with_capacity(m * n);
        for d in depots {
            for p in points {
                depot_km.push(d.location.distance_km(p.location));
            }
        }

        let mut point_km = vec![0.0; n * n];
        for a in 0..n {
            for b in (a + 1)..n {
                let km = points[a].location.distance_km(points[b].location);
                point_km[a * n + b] = km;
                point_km[b * n + a] = km;
            }
        }

        tracing::debug!(depots = m, points = n, "distance matrix computed");

        Ok(Self {
            depot_ids: depots.iter().map(|d| d.id).collect(),
            point_ids: points.iter().map(|p| p.id).collect(),
            depot_pos: depots.iter().map(|d| d.location).collect(),
            point_pos: points.iter().map(|p| p.location).collect(),
            depot_km,
            point_km,
            depot_idx: depots.iter().enumerate().map(|(i, d)| (d.id, i)).collect(),
            point_idx: points.iter().enumerate().map(|(j, p)| (p.id, j)).collect(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn depot_count(&self) -> usize {
        self.depot_ids.len()
    }

    pub fn point_count(&self) -> usize {
        self.point_ids.len()
    }

    // ── Lookups by index ──────────────────────────────────────────────────

    /// Distance from depot `i` to point `j`.
    #[inline]
    pub fn depot_to_point(&self, i: usize, j: usize) -> f64 {
        self.depot_km[i * self.point_count() + j]
    }

    /// Distance between points `a` and `b`.
    #[inline]
    pub fn between_points(&self, a: usize, b: usize) -> f64 {
        self.point_km[a * self.point_count() + b]
    }

    /// Row `i` of the depot×point table.
    pub fn depot_row(&self, i: usize) -> &[f64] {
        let n = self.point_count();
        &self.depot_km[i * n..(i + 1) * n]
    }

    pub fn depot_location(&self, i: usize) -> GeoPoint {
        self.depot_pos[i]
    }

    pub fn point_location(&self, j: usize) -> GeoPoint {
        self.point_pos[j]
    }

    // ── Id ↔ index mapping ────────────────────────────────────────────────

    pub fn depot_index(&self, id: DepotId) -> Option<usize> {
        self.depot_idx.get(&id).copied()
    }

    pub fn point_index(&self, id: PointId) -> Option<usize> {
        self.point_idx.get(&id).copied()
    }

    pub fn depot_id(&self, i: usize) -> DepotId {
        self.depot_ids[i]
    }

    pub fn point_id(&self, j: usize) -> PointId {
        self.point_ids[j]
    }
}
