//! Weighted bipartite network view.
//!
//! # Data layout
//!
//! Nodes are numbered depots first, then demand points:
//!
//! ```text
//! NodeIndex 0 .. m          depots      (input order)
//! NodeIndex m .. m + n      demand points (input order)
//! ```
//!
//! Every depot–point pair is joined by one undirected edge weighted by the
//! cached great-circle distance.  Edges are stored in both directions in
//! **Compressed Sparse Row (CSR)** format: the outgoing edges of node `v`
//! occupy
//!
//! ```text
//! edge_to[ node_out_start[v] .. node_out_start[v+1] ]
//! ```
//!
//! so neighbour iteration is a contiguous scan.  The model is an inspection
//! and extension surface; the solvers read `DistanceMatrix` directly.

use std::fmt;

use dn_core::{DemandPoint, Depot, DepotId, PointId};

use crate::DistanceMatrix;

/// Index of a node in the bipartite graph.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which side of the bipartition a node sits on.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Depot { id: DepotId, capacity: f64 },
    Point { id: PointId, demand: f64 },
}

/// A node and its label (`WH_i` for depot `i`, `STORE_j` for point `j`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NetworkNode {
    pub kind:     NodeKind,
    /// Position within its own side (depot index or point index).
    pub position: usize,
}

impl fmt::Display for NetworkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Depot { .. } => write!(f, "WH_{}", self.position),
            NodeKind::Point { .. } => write!(f, "STORE_{}", self.position),
        }
    }
}

/// Depot/demand-point bipartite graph in CSR form.
///
/// All fields are `pub` for direct indexed access.  Build with
/// [`NetworkModel::build`].
pub struct NetworkModel {
    /// One entry per node, depots first.
    pub nodes: Vec<NetworkNode>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination node of each directed half-edge.
    pub edge_to: Vec<NodeIndex>,

    /// Weight (km) of each directed half-edge.
    pub edge_km: Vec<f64>,

    depot_count: usize,
}

impl NetworkModel {
    /// Build the complete bipartite graph from validated inputs and their
    /// distance matrix.
    pub fn build(depots: &[Depot], points: &[DemandPoint], matrix: &DistanceMatrix) -> Self {
        let m = depots.len();
        let n = points.len();

        let mut nodes = Vec::with_capacity(m + n);
        nodes.extend(depots.iter().enumerate().map(|(i, d)| NetworkNode {
            kind:     NodeKind::Depot { id: d.id, capacity: d.capacity },
            position: i,
        }));
        nodes.extend(points.iter().enumerate().map(|(j, p)| NetworkNode {
            kind:     NodeKind::Point { id: p.id, demand: p.demand },
            position: j,
        }));

        // Depot rows list every point; point rows list every depot.  Both are
        // already sorted by source, so CSR falls out of two nested loops.
        let mut node_out_start = Vec::with_capacity(m + n + 1);
        let mut edge_to = Vec::with_capacity(2 * m * n);
        let mut edge_km = Vec::with_capacity(2 * m * n);

        for i in 0..m {
            node_out_start.push(edge_to.len() as u32);
            for j in 0..n {
                edge_to.push(NodeIndex((m + j) as u32));
                edge_km.push(matrix.depot_to_point(i, j));
            }
        }
        for j in 0..n {
            node_out_start.push(edge_to.len() as u32);
            for i in 0..m {
                edge_to.push(NodeIndex(i as u32));
                edge_km.push(matrix.depot_to_point(i, j));
            }
        }
        node_out_start.push(edge_to.len() as u32);

        Self { nodes, node_out_start, edge_to, edge_km, depot_count: m }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected depot–point edges.
    pub fn edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    pub fn depot_node(&self, i: usize) -> NodeIndex {
        NodeIndex(i as u32)
    }

    pub fn point_node(&self, j: usize) -> NodeIndex {
        NodeIndex((self.depot_count + j) as u32)
    }

    pub fn node(&self, v: NodeIndex) -> &NetworkNode {
        &self.nodes[v.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// `(neighbour, km)` pairs adjacent to `v`.
    pub fn neighbors(&self, v: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        let start = self.node_out_start[v.index()] as usize;
        let end   = self.node_out_start[v.index() + 1] as usize;
        (start..end).map(|e| (self.edge_to[e], self.edge_km[e]))
    }

    /// Weight of the edge between depot `i` and point `j`.
    pub fn edge_weight(&self, i: usize, j: usize) -> f64 {
        let start = self.node_out_start[i] as usize;
        self.edge_km[start + j]
    }

    /// `WH_i` for the i-th depot, `STORE_j` for the j-th demand point.
    pub fn node_label(&self, v: NodeIndex) -> String {
        self.node(v).to_string()
    }

    /// Find a node by its `WH_i` / `STORE_j` label.
    pub fn find_label(&self, label: &str) -> Option<NodeIndex> {
        if let Some(i) = label.strip_prefix("WH_").and_then(|s| s.parse::<usize>().ok()) {
            return (i < self.depot_count).then(|| self.depot_node(i));
        }
        let j = label.strip_prefix("STORE_")?.parse::<usize>().ok()?;
        (j < self.node_count() - self.depot_count).then(|| self.point_node(j))
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    pub fn total_capacity(&self) -> f64 {
        self.nodes
            .iter()
            .filter_map(|n| match n.kind {
                NodeKind::Depot { capacity, .. } => Some(capacity),
                NodeKind::Point { .. } => None,
            })
            .sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.nodes
            .iter()
            .filter_map(|n| match n.kind {
                NodeKind::Point { demand, .. } => Some(demand),
                NodeKind::Depot { .. } => None,
            })
            .sum()
    }
}
