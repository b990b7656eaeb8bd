//! Simulation time model.
//!
//! # Design
//!
//! Delivery durations are sampled from continuous distributions, so simulated
//! time is a real number of **minutes** since the start of the run rather
//! than an integer tick.  `SimTime` wraps that `f64` and gives it a total
//! order (via [`f64::total_cmp`]) so it can key a `BTreeMap` event queue.
//!
//! One simulated day is [`MINUTES_PER_DAY`] minutes unless a run overrides
//! its day length.

use std::cmp::Ordering;
use std::fmt;

/// Length of one simulated day in minutes.
pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp in minutes.
///
/// Constructed only from finite, non-negative values by the simulator; the
/// total order treats `-0.0 < 0.0`, which never arises in practice.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Minutes elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}min", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single logical timeline of one simulation run.
///
/// Only moves forward: [`advance_to`](Self::advance_to) ignores timestamps
/// earlier than the current time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Minutes in one simulated day.
    pub day_length: f64,
    /// Current simulated time.
    pub now: SimTime,
}

impl SimClock {
    pub fn new(day_length: f64) -> Self {
        Self { day_length, now: SimTime::ZERO }
    }

    /// Move the clock to `t` if it lies in the future.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) {
        if t > self.now {
            self.now = t;
        }
    }

    /// Zero-based index of the day containing `now`.
    #[inline]
    pub fn day(&self) -> u32 {
        (self.now.0 / self.day_length).floor() as u32
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_dhm(&self) -> (u32, u32, u32) {
        let minutes_into_day = self.now.0 - self.day() as f64 * self.day_length;
        let total = minutes_into_day.max(0.0) as u64;
        (self.day(), (total / 60) as u32, (total % 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.now, d, h, m)
    }
}
