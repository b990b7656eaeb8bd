//! `dn-network`: distances, network graph, and minimum-cost flow.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`matrix`]    | `DistanceMatrix` (depot×point and point×point km)         |
//! | [`network`]   | `NetworkModel` (bipartite CSR graph), `NetworkNode`       |
//! | [`transport`] | `TransportationSolver`, `TransportPlan`, `FlowAssignment` |
//!
//! Errors are reported as [`dn_core::DnError`].

pub mod matrix;
pub mod network;
pub mod transport;


pub use matrix::DistanceMatrix;
pub use network::{NetworkModel, NetworkNode, NodeIndex, NodeKind};
pub use transport::{FlowAssignment, TransportPlan, TransportationSolver};
