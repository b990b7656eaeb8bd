//! Stochastic leg and unloading durations.

use rand_distr::{Exp, Normal};

use dn_core::SimRng;

use crate::{SimConfig, SimError, SimResult};

/// Samplers for the two suspending waits of a delivery process.
#[derive(Clone, Debug)]
pub struct DurationModel {
    travel: Normal<f64>,
    unload: Exp<f64>,
}

impl DurationModel {
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let travel = Normal::new(config.travel.mean, config.travel.std_dev)
            .map_err(|e| SimError::Config(format!("travel-time distribution: {e}")))?;
        let unload = Exp::new(config.unload_rate)
            .map_err(|e| SimError::Config(format!("unloading distribution: {e}")))?;
        Ok(Self { travel, unload })
    }

    /// Minutes to drive one leg, never negative.
    #[inline]
    pub fn sample_travel(&self, rng: &mut SimRng) -> f64 {
        rng.sample(&self.travel).max(0.0)
    }

    /// Minutes to unload at one stop.
    #[inline]
    pub fn sample_unload(&self, rng: &mut SimRng) -> f64 {
        rng.sample(&self.unload)
    }
}
