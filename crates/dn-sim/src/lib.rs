//! `dn-sim`: discrete-event simulation of daily delivery routes.
//!
//! # Event loop
//!
//! ```text
//! queue ← { t = 0: DayBoundary }
//! while next wake-up t < days × day_length:
//!   drain every wake-up at t, in scheduling order:
//!     DayBoundary   → plan the day (RouteBuilder → RouteSequencer),
//!                     spawn one delivery process per route,
//!                     schedule the next DayBoundary at t + day_length
//!     Delivery(pid) → advance that process's state machine:
//!                       Traveling(k) → leg k done, sample unloading
//!                       Unloading(k) → sample travel for leg k+1, or Done
//! ```
//!
//! Processes are plain state machines resumed by the loop, not threads.  All
//! metric updates happen inside the single loop, so simultaneous completions
//! are serialised by construction.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `replicate` runs independent seeds on Rayon.           |
//! | `serde`    | `Serialize`/`Deserialize` on config and metrics.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dn_routing::{Optimizer, OptimizerConfig};
//! use dn_sim::{NoopObserver, SimBuilder};
//!
//! let optimizer = Optimizer::new(depots, points, OptimizerConfig::default())?;
//! let sim = SimBuilder::new(optimizer).days(7).seed(42).build()?;
//! let metrics = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod delivery;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod planner;
pub mod queue;
pub mod sim;
pub mod timing;


pub use builder::SimBuilder;
pub use config::{SimConfig, TravelTimeParams};
pub use delivery::{DeliveryProcess, DeliveryState, Transition};
pub use error::{SimError, SimResult};
pub use metrics::{DeliveryRecord, PerformanceMetrics};
pub use observer::{NoopObserver, SimObserver};
pub use planner::{DailyPlanner, PlannedRoute};
pub use queue::{EventQueue, Wake};
pub use sim::DeliverySimulator;
pub use timing::DurationModel;
