//! Simulation observer trait for progress reporting and data collection.

use dn_core::{ProcessId, RouteId, SimTime};

use crate::{DeliveryRecord, PerformanceMetrics, PlannedRoute};

/// Callbacks invoked by the event loop at key points of a run.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct DayPrinter;
///
/// impl SimObserver for DayPrinter {
///     fn on_day_start(&mut self, day: u32, _now: SimTime, routes: &[PlannedRoute]) {
///         println!("day {day}: {} routes", routes.len());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at each day boundary after the plan is fetched and before any
    /// delivery process starts.
    fn on_day_start(&mut self, _day: u32, _now: SimTime, _routes: &[PlannedRoute]) {}

    /// Called when a process finishes driving leg `leg`.
    fn on_leg_complete(
        &mut self,
        _process: ProcessId,
        _route:   RouteId,
        _leg:     usize,
        _km:      f64,
        _now:     SimTime,
    ) {}

    /// Called after a completed delivery has been added to the metrics.
    fn on_delivery_complete(&mut self, _record: &DeliveryRecord, _metrics: &PerformanceMetrics) {}

    /// Called once when the run halts at the horizon.
    fn on_sim_end(&mut self, _now: SimTime, _metrics: &PerformanceMetrics) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
