//! Minimum-cost transportation solver.
//!
//! # Method
//!
//! The LP
//!
//! ```text
//! minimise   Σ km[i][j] · x[i][j]
//! subject to Σ_j x[i][j] ≤ capacity[i]     every depot i
//!            Σ_i x[i][j] ≥ demand[j]       every point j
//!            x ≥ 0
//! ```
//!
//! is balanced by a zero-cost slack column that absorbs
//! `Σ capacity − Σ demand`, then solved with the transportation simplex:
//!
//! 1. **North-west corner** start.  Degenerate zero cells are kept so the
//!    basis is always a spanning tree over the `m + n + 1` row/column nodes.
//! 2. **MODI** iterations: potentials `u[i] + v[j] = cost[i][j]` on basic
//!    cells, reduced cost `cost − u − v` on the rest.
//! 3. **Bland's rule**: the first non-basic cell in row-major order with a
//!    negative reduced cost enters; among the "−" cells on its cycle holding
//!    the minimum flow, the first in row-major order leaves.  Pivoting is
//!    therefore deterministic and cannot cycle on degenerate bases.
//!
//! Each iteration is O(m·n); the number of iterations is small in practice.

use std::collections::VecDeque;

use dn_core::{DemandPoint, Depot, DepotId, DnError, DnResult, PointId, validate_network};

use crate::DistanceMatrix;

/// Units shipped from one depot to one demand point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowAssignment {
    pub depot: DepotId,
    pub point: PointId,
    pub units: f64,
}

/// Optimal flow plus its cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportPlan {
    /// Non-zero flows in depot-major, point-minor order.
    pub flows:      Vec<FlowAssignment>,
    /// `Σ km · units` over all flows.
    pub objective:  f64,
    /// Simplex pivots performed after the initial basis.
    pub iterations: usize,
}

impl TransportPlan {
    /// Units on the `depot → point` pair (0 if unused).
    pub fn flow(&self, depot: DepotId, point: PointId) -> f64 {
        self.flows
            .iter()
            .find(|f| f.depot == depot && f.point == point)
            .map_or(0.0, |f| f.units)
    }

    pub fn shipped_from(&self, depot: DepotId) -> f64 {
        self.flows.iter().filter(|f| f.depot == depot).map(|f| f.units).sum()
    }

    pub fn received_by(&self, point: PointId) -> f64 {
        self.flows.iter().filter(|f| f.point == point).map(|f| f.units).sum()
    }
}

/// Transportation simplex with deterministic tie-breaking.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportationSolver {
    /// Pivot limit; Bland's rule terminates well before this on any
    /// realistically sized network.
    pub max_iterations: usize,
    /// Reduced costs above `-tolerance` count as non-negative; flows below
    /// `tolerance` are reported as zero.
    pub tolerance:      f64,
}

impl Default for TransportationSolver {
    fn default() -> Self {
        Self { max_iterations: 100_000, tolerance: 1e-9 }
    }
}

impl TransportationSolver {
    /// Solve for the minimum-cost flow.
    ///
    /// # Errors
    ///
    /// - `Configuration` / `Validation` for malformed input (see
    ///   [`validate_network`]), or a matrix whose shape does not match.
    /// - `Infeasible` if total capacity is below total demand.
    pub fn solve(
        &self,
        depots: &[Depot],
        points: &[DemandPoint],
        matrix: &DistanceMatrix,
    ) -> DnResult<TransportPlan> {
        validate_network(depots, points)?;
        if matrix.depot_count() != depots.len() || matrix.point_count() != points.len() {
            return Err(DnError::Validation(format!(
                "distance matrix is {}x{} but network is {}x{}",
                matrix.depot_count(),
                matrix.point_count(),
                depots.len(),
                points.len()
            )));
        }

        let capacity: f64 = depots.iter().map(|d| d.capacity).sum();
        let demand: f64 = points.iter().map(|p| p.demand).sum();
        if capacity < demand {
            return Err(DnError::Infeasible { capacity, demand });
        }

        let mut supply: Vec<f64> = depots.iter().map(|d| d.capacity).collect();
        let mut need: Vec<f64> = points.iter().map(|p| p.demand).collect();
        need.push(capacity - demand);

        let mut tableau = Tableau::north_west(&mut supply, &mut need, matrix);
        let iterations = tableau.optimise(self.max_iterations, self.tolerance);

        let n = points.len();
        let mut flows = Vec::new();
        let mut objective = 0.0;
        for i in 0..depots.len() {
            for j in 0..n {
                let units = tableau.flow[tableau.cell(i, j)];
                if units > self.tolerance {
                    objective += matrix.depot_to_point(i, j) * units;
                    flows.push(FlowAssignment { depot: depots[i].id, point: points[j].id, units });
                }
            }
        }

        tracing::debug!(iterations, objective, flows = flows.len(), "transportation problem solved");
        Ok(TransportPlan { flows, objective, iterations })
    }
}

// ── Tableau ───────────────────────────────────────────────────────────────────

/// Dense `m × (n + 1)` working state; the last column is slack.
struct Tableau {
    rows:  usize,
    cols:  usize,
    cost:  Vec<f64>,
    flow:  Vec<f64>,
    basic: Vec<bool>,
}

impl Tableau {
    #[inline]
    fn cell(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// North-west corner basis: exactly `rows + cols − 1` basic cells forming
    /// a staircase, hence a spanning tree.
    fn north_west(supply: &mut [f64], need: &mut [f64], matrix: &DistanceMatrix) -> Self {
        let rows = supply.len();
        let cols = need.len();
        let n = cols - 1;

        let mut cost = vec![0.0; rows * cols];
        for i in 0..rows {
            cost[i * cols..i * cols + n].copy_from_slice(matrix.depot_row(i));
        }

        let mut t = Self {
            rows,
            cols,
            cost,
            flow:  vec![0.0; rows * cols],
            basic: vec![false; rows * cols],
        };

        let (mut i, mut j) = (0, 0);
        loop {
            let q = supply[i].min(need[j]).max(0.0);
            let c = t.cell(i, j);
            t.flow[c] = q;
            t.basic[c] = true;

            let row_done = supply[i] <= need[j];
            supply[i] -= q;
            need[j] -= q;

            if i == rows - 1 && j == cols - 1 {
                break;
            }
            if i == rows - 1 {
                j += 1;
            } else if j == cols - 1 || row_done {
                i += 1;
            } else {
                j += 1;
            }
        }
        t
    }

    /// Run MODI pivots until no reduced cost is negative.  Returns the number
    /// of pivots.
    fn optimise(&mut self, max_iterations: usize, tol: f64) -> usize {
        for iteration in 0..max_iterations {
            let (u, v) = self.potentials();
            let Some(entering) = self.entering_cell(&u, &v, tol) else {
                return iteration;
            };
            self.pivot(entering);
        }
        tracing::warn!(max_iterations, "transportation simplex hit its pivot limit");
        max_iterations
    }

    /// Adjacency of the basis tree: `row_basic[i]` lists basic columns,
    /// `col_basic[j]` lists basic rows, each in ascending order.
    fn basis_adjacency(&self) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let mut row_basic = vec![Vec::new(); self.rows];
        let mut col_basic = vec![Vec::new(); self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.basic[self.cell(i, j)] {
                    row_basic[i].push(j);
                    col_basic[j].push(i);
                }
            }
        }
        (row_basic, col_basic)
    }

    /// Solve `u[i] + v[j] = cost[i][j]` over the basis tree with `u[0] = 0`.
    fn potentials(&self) -> (Vec<f64>, Vec<f64>) {
        let (row_basic, col_basic) = self.basis_adjacency();
        let mut u = vec![f64::NAN; self.rows];
        let mut v = vec![f64::NAN; self.cols];
        u[0] = 0.0;

        let mut queue = VecDeque::from([Line::Row(0)]);
        while let Some(line) = queue.pop_front() {
            match line {
                Line::Row(i) => {
                    for &j in &row_basic[i] {
                        if v[j].is_nan() {
                            v[j] = self.cost[self.cell(i, j)] - u[i];
                            queue.push_back(Line::Col(j));
                        }
                    }
                }
                Line::Col(j) => {
                    for &i in &col_basic[j] {
                        if u[i].is_nan() {
                            u[i] = self.cost[self.cell(i, j)] - v[j];
                            queue.push_back(Line::Row(i));
                        }
                    }
                }
            }
        }
        (u, v)
    }

    /// First non-basic cell (row-major) with reduced cost below `-tol`.
    fn entering_cell(&self, u: &[f64], v: &[f64], tol: f64) -> Option<(usize, usize)> {
        for i in 0..self.rows {
            for j in 0..self.cols {
                let c = self.cell(i, j);
                if !self.basic[c] && self.cost[c] - u[i] - v[j] < -tol {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Shift flow around the cycle closed by `(p, q)` and swap it into the
    /// basis.
    fn pivot(&mut self, (p, q): (usize, usize)) {
        let cycle = self.tree_path(q, p);

        // cycle[0] shares column q with the entering cell and takes "−";
        // signs alternate from there, ending on a "−" cell in row p.
        let mut theta = f64::INFINITY;
        let mut leaving = usize::MAX;
        for &c in cycle.iter().step_by(2) {
            let f = self.flow[c];
            if f < theta || (f == theta && c < leaving) {
                theta = f;
                leaving = c;
            }
        }

        for (k, &c) in cycle.iter().enumerate() {
            if k % 2 == 0 {
                self.flow[c] = (self.flow[c] - theta).max(0.0);
            } else {
                self.flow[c] += theta;
            }
        }

        let entering = self.cell(p, q);
        self.flow[entering] = theta;
        self.basic[entering] = true;
        self.flow[leaving] = 0.0;
        self.basic[leaving] = false;
    }

    /// Basic cells on the unique tree path from column `q` to row `p`, in
    /// path order.
    fn tree_path(&self, q: usize, p: usize) -> Vec<usize> {
        let (row_basic, col_basic) = self.basis_adjacency();

        // Parent links: (previous line, cell used to reach this line).
        let mut row_parent: Vec<Option<(Line, usize)>> = vec![None; self.rows];
        let mut col_parent: Vec<Option<(Line, usize)>> = vec![None; self.cols];
        let mut col_seen = vec![false; self.cols];
        let mut row_seen = vec![false; self.rows];
        col_seen[q] = true;

        let mut queue = VecDeque::from([Line::Col(q)]);
        while let Some(line) = queue.pop_front() {
            match line {
                Line::Col(j) => {
                    for &i in &col_basic[j] {
                        if !row_seen[i] {
                            row_seen[i] = true;
                            row_parent[i] = Some((line, self.cell(i, j)));
                            queue.push_back(Line::Row(i));
                        }
                    }
                }
                Line::Row(i) => {
                    if i == p {
                        break;
                    }
                    for &j in &row_basic[i] {
                        if !col_seen[j] {
                            col_seen[j] = true;
                            col_parent[j] = Some((line, self.cell(i, j)));
                            queue.push_back(Line::Col(j));
                        }
                    }
                }
            }
        }

        // Walk back from row p to column q, then reverse into q → p order.
        let mut path = Vec::new();
        let mut at = Line::Row(p);
        loop {
            let parent = match at {
                Line::Row(i) => row_parent[i],
                Line::Col(j) => col_parent[j],
            };
            let Some((prev, cell)) = parent else { break };
            path.push(cell);
            at = prev;
        }
        path.reverse();
        path
    }
}

/// A row (depot) or column (point / slack) node of the basis tree.
#[derive(Copy, Clone, Debug)]
enum Line {
    Row(usize),
    Col(usize),
}
