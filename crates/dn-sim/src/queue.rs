//! `EventQueue`: time-ordered queue of pending wake-ups.
//!
//! `BTreeMap` keyed by [`SimTime`] gives the strict timestamp order; each key
//! holds its wake-ups in push order, so simultaneous events resume in the
//! order they were scheduled.  Together with a seeded RNG this makes every
//! run reproducible.
//!
//! A wake-up pushed for the timestamp currently being drained lands in a
//! fresh entry and is drained right after the current batch, again in
//! scheduling order.

use std::collections::BTreeMap;

use dn_core::{ProcessId, SimTime};

/// What to resume when a wake-up fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wake {
    /// The day-boundary timeout of the operating loop.
    DayBoundary,
    /// A travel or unloading timeout of one delivery process.
    Delivery(ProcessId),
}

/// A priority queue mapping simulated timestamps → wake-ups due at that time.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, Vec<Wake>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `wake` at `time`.
    pub fn push(&mut self, time: SimTime, wake: Wake) {
        self.inner.entry(time).or_default().push(wake);
        self.total += 1;
    }

    /// Remove and return all wake-ups scheduled for exactly `time`.
    pub fn drain_time(&mut self, time: SimTime) -> Option<Vec<Wake>> {
        let wakes = self.inner.remove(&time)?;
        self.total -= wakes.len();
        Some(wakes)
    }

    /// The earliest time with at least one pending wake-up.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
