//! Per-route delivery process.
//!
//! ```text
//!             travel sampled                unload sampled
//!   spawn ──────────────────► Traveling(k) ───────────────► Unloading(k)
//!                                  ▲                              │
//!                                  │  k+1 < stops: travel sampled │
//!                                  └──────────────────────────────┤
//!                                                                 │ last stop
//!                                                                 ▼
//!                                                               Done
//! ```
//!
//! A process never fails and cannot be cancelled; it only suspends on the
//! two sampled timeouts.

use dn_core::{ProcessId, SimRng, SimTime};

use crate::{DeliveryRecord, DurationModel, PlannedRoute};

/// Where a process is in its route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeliveryState {
    /// Driving leg `leg` (towards stop `leg`).
    Traveling { leg: usize },
    /// Unloading at stop `leg`.
    Unloading { leg: usize },
    /// All stops served.  Terminal.
    Done,
}

/// The effect of resuming a process at one of its wake-ups.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Leg `leg` finished after `km` kilometres; unloading takes `wait` minutes.
    LegCompleted { leg: usize, km: f64, wait: f64 },
    /// Unloading finished; the next leg takes `wait` minutes.
    Departed { leg: usize, wait: f64 },
    /// The route is complete.
    Finished(DeliveryRecord),
    /// Resumed while already `Done`; nothing happens.
    Idle,
}

/// One route being driven.
#[derive(Clone, Debug)]
pub struct DeliveryProcess {
    pub id:    ProcessId,
    pub day:   u32,
    pub route: PlannedRoute,
    pub start: SimTime,
    pub state: DeliveryState,
}

impl DeliveryProcess {
    /// Spawn a process at `now`.  Returns the process and the travel time of
    /// its first leg, or `None` if the route has no stops.
    ///
    /// `route` must pass [`PlannedRoute::check`]; the simulator checks every
    /// route before spawning it.
    pub fn spawn(
        id:        ProcessId,
        day:       u32,
        route:     PlannedRoute,
        now:       SimTime,
        durations: &DurationModel,
        rng:       &mut SimRng,
    ) -> (Self, Option<f64>) {
        let (state, wait) = if route.stops.is_empty() {
            (DeliveryState::Done, None)
        } else {
            (DeliveryState::Traveling { leg: 0 }, Some(durations.sample_travel(rng)))
        };
        (Self { id, day, route, start: now, state }, wait)
    }

    /// Advance the state machine at wake-up time `now`.
    pub fn resume(&mut self, now: SimTime, durations: &DurationModel, rng: &mut SimRng) -> Transition {
        match self.state {
            DeliveryState::Traveling { leg } => {
                let km = self.route.legs_km[leg];
                self.state = DeliveryState::Unloading { leg };
                Transition::LegCompleted { leg, km, wait: durations.sample_unload(rng) }
            }
            DeliveryState::Unloading { leg } if leg + 1 < self.route.stops.len() => {
                self.state = DeliveryState::Traveling { leg: leg + 1 };
                Transition::Departed { leg: leg + 1, wait: durations.sample_travel(rng) }
            }
            DeliveryState::Unloading { .. } => {
                self.state = DeliveryState::Done;
                Transition::Finished(self.record(now))
            }
            DeliveryState::Done => Transition::Idle,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == DeliveryState::Done
    }

    /// Timing record for a process that finishes at `end`.
    pub fn record(&self, end: SimTime) -> DeliveryRecord {
        DeliveryRecord {
            route_id:   self.route.id,
            day:        self.day,
            stops:      self.route.stops.len(),
            start_time: self.start.minutes(),
            end_time:   end.minutes(),
            duration:   end.since(self.start),
        }
    }
}
