//! Simulator configuration.

use dn_core::{MINUTES_PER_DAY, SimTime};

use crate::{SimError, SimResult};

/// Parameters of the per-leg travel-time distribution (minutes).
///
/// Samples are drawn from `Normal(mean, std_dev)` and clamped at zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelTimeParams {
    pub mean:    f64,
    pub std_dev: f64,
}

impl Default for TravelTimeParams {
    fn default() -> Self {
        Self { mean: 60.0, std_dev: 10.0 }
    }
}

/// Top-level simulation configuration.
///
/// Typically embedded in a JSON scenario by the application crate and passed
/// to [`SimBuilder`](crate::SimBuilder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulation horizon in days.
    pub days: u32,

    /// Minutes per simulated day.  Default: 1440.
    pub day_length_minutes: f64,

    /// Travel time per leg.
    pub travel: TravelTimeParams,

    /// Rate λ of the exponential unloading time (mean `1/λ` minutes).
    /// Default: 1/30.
    pub unload_rate: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days:               30,
            day_length_minutes: MINUTES_PER_DAY,
            travel:             TravelTimeParams::default(),
            unload_rate:        1.0 / 30.0,
            seed:               42,
        }
    }
}

impl SimConfig {
    /// The time at which a `days`-day run halts (exclusive upper bound).
    #[inline]
    pub fn horizon(&self, days: u32) -> SimTime {
        SimTime(days as f64 * self.day_length_minutes)
    }

    /// Reject parameters that would make a run meaningless or unbounded.
    pub fn validate(&self) -> SimResult<()> {
        if !self.day_length_minutes.is_finite() || self.day_length_minutes <= 0.0 {
            return Err(SimError::Config(format!(
                "day length must be finite and positive, got {}",
                self.day_length_minutes
            )));
        }
        if !self.travel.mean.is_finite() {
            return Err(SimError::Config(format!("travel mean must be finite, got {}", self.travel.mean)));
        }
        if !self.travel.std_dev.is_finite() || self.travel.std_dev < 0.0 {
            return Err(SimError::Config(format!(
                "travel std_dev must be finite and >= 0, got {}",
                self.travel.std_dev
            )));
        }
        if !self.unload_rate.is_finite() || self.unload_rate <= 0.0 {
            return Err(SimError::Config(format!(
                "unload rate must be finite and positive, got {}",
                self.unload_rate
            )));
        }
        Ok(())
    }
}
