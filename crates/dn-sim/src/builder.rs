//! Fluent builder for constructing a [`DeliverySimulator`].

use crate::{DailyPlanner, DeliverySimulator, DurationModel, SimConfig, SimResult, TravelTimeParams};

/// Fluent builder for [`DeliverySimulator<P>`].
///
/// # Required inputs
///
/// - `P: DailyPlanner`, usually a [`dn_routing::Optimizer`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                       |
/// |----------------------|-------------------------------|
/// | `.config(c)`         | `SimConfig::default()`        |
/// | `.days(n)`           | 30                            |
/// | `.seed(s)`           | 42                            |
/// | `.travel(mean, sd)`  | 60, 10 minutes                |
/// | `.unload_rate(λ)`    | 1/30 per minute               |
/// | `.day_length(min)`   | 1440 minutes                  |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(optimizer)
///     .days(7)
///     .seed(7)
///     .build()?;
/// let metrics = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: DailyPlanner> {
    planner: P,
    config:  SimConfig,
}

impl<P: DailyPlanner> SimBuilder<P> {
    pub fn new(planner: P) -> Self {
        Self { planner, config: SimConfig::default() }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        self.config.days = days;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn travel(mut self, mean: f64, std_dev: f64) -> Self {
        self.config.travel = TravelTimeParams { mean, std_dev };
        self
    }

    pub fn unload_rate(mut self, rate: f64) -> Self {
        self.config.unload_rate = rate;
        self
    }

    pub fn day_length(mut self, minutes: f64) -> Self {
        self.config.day_length_minutes = minutes;
        self
    }

    /// Validate the configuration and build the duration samplers.
    pub fn build(self) -> SimResult<DeliverySimulator<P>> {
        let durations = DurationModel::new(&self.config)?;
        Ok(DeliverySimulator::new(self.config, durations, self.planner))
    }
}
