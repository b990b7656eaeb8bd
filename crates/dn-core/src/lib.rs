//! `dn-core`: foundational types for the `distnet` planning toolkit.
//!
//! This crate is a dependency of every other `dn-*` crate.  It has no `dn-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `DepotId`, `PointId`, `RouteId`, `ProcessId`          |
//! | [`geo`]         | `GeoPoint`, great-circle distance in km               |
//! | [`model`]       | `Depot`, `DemandPoint`, batch validation              |
//! | [`time`]        | `SimTime`, `SimClock`                                 |
//! | [`rng`]         | `SimRng` (seeded, injectable)                         |
//! | [`error`]       | `DnError`, `DnResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod model;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DnError, DnResult};
pub use geo::GeoPoint;
pub use ids::{DepotId, PointId, ProcessId, RouteId};
pub use model::{DemandPoint, Depot, validate_network};
pub use rng::SimRng;
pub use time::{MINUTES_PER_DAY, SimClock, SimTime};
