//! `dn-routing`: turn a demand-point set into ordered vehicle routes.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`route`]     | `Route`                                                  |
//! | [`savings`]   | `RouteBuilder` (Clarke–Wright), `Saving`                 |
//! | [`sequencer`] | `RouteSequencer`, `SequencerConfig`                      |
//! | [`optimizer`] | `Optimizer`, `OptimizerConfig`; owns the cached matrix   |
//!
//! # Pipeline
//!
//! ```text
//! DistanceMatrix ──► RouteBuilder (cluster, ≤ max_stops)
//!                        │
//!                        ▼
//!                   RouteSequencer (nearest neighbour + swap search)
//!                        │
//!                        ▼
//!                   Vec<Route> ──► coordinates / leg distances
//! ```

pub mod optimizer;
pub mod route;
pub mod savings;
pub mod sequencer;

#[cfg(test)]
mod tests;

pub use optimizer::{Optimizer, OptimizerConfig};
pub use route::Route;
pub use savings::{RouteBuilder, Saving};
pub use sequencer::{RouteSequencer, SequencerConfig};
