//! The `DeliverySimulator` and its event loop.

use dn_core::{ProcessId, SimClock, SimRng, SimTime};

use crate::{
    DailyPlanner, DeliveryProcess, DurationModel, EventQueue, PerformanceMetrics, SimConfig,
    SimObserver, SimResult, Transition, Wake,
};

// ── Run context ───────────────────────────────────────────────────────────────

/// Everything mutable in one run.  Created when a run starts and dropped when
/// it ends; never shared between runs.
struct RunContext {
    clock:     SimClock,
    queue:     EventQueue,
    rng:       SimRng,
    processes: Vec<DeliveryProcess>,
    metrics:   PerformanceMetrics,
    /// Index of the next day to plan.
    next_day:  u32,
}

impl RunContext {
    fn new(day_length: f64, rng: SimRng) -> Self {
        Self {
            clock:     SimClock::new(day_length),
            queue:     EventQueue::new(),
            rng,
            processes: Vec::new(),
            metrics:   PerformanceMetrics::default(),
            next_day:  0,
        }
    }
}

// ── DeliverySimulator ─────────────────────────────────────────────────────────

/// Executes a day-by-day routing plan in simulated time.
///
/// Holds only immutable inputs (configuration, samplers, planner); every call
/// to [`operate`](Self::operate) builds a fresh run context, so one simulator
/// can serve many independent runs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct DeliverySimulator<P: DailyPlanner> {
    pub config: SimConfig,
    durations:  DurationModel,
    planner:    P,
}

impl<P: DailyPlanner> DeliverySimulator<P> {
    pub(crate) fn new(config: SimConfig, durations: DurationModel, planner: P) -> Self {
        Self { config, durations, planner }
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run for `config.days` days.
    pub fn run<O: SimObserver>(&self, observer: &mut O) -> SimResult<PerformanceMetrics> {
        self.operate(self.config.days, observer)
    }

    /// Run for `days` days with an RNG seeded from `config.seed`.
    pub fn operate<O: SimObserver>(&self, days: u32, observer: &mut O) -> SimResult<PerformanceMetrics> {
        tracing::debug!(seed = self.config.seed, "seeding run from configuration");
        self.operate_with_rng(days, SimRng::new(self.config.seed), observer)
    }

    /// Run for `days` days drawing every duration from `rng`.
    ///
    /// The run halts at `days × day_length`; wake-ups at or after that time
    /// are discarded, so deliveries still on the road are not counted.
    pub fn operate_with_rng<O: SimObserver>(
        &self,
        days:     u32,
        rng:      SimRng,
        observer: &mut O,
    ) -> SimResult<PerformanceMetrics> {
        let horizon = self.config.horizon(days);
        let mut ctx = RunContext::new(self.config.day_length_minutes, rng);

        tracing::info!(days, "delivery simulation started");

        if days > 0 {
            ctx.queue.push(SimTime::ZERO, Wake::DayBoundary);
        }

        while let Some(now) = ctx.queue.next_time() {
            if now >= horizon {
                break;
            }
            ctx.clock.advance_to(now);
            let Some(batch) = ctx.queue.drain_time(now) else {
                continue;
            };
            for wake in batch {
                match wake {
                    Wake::DayBoundary => self.start_day(&mut ctx, days, now, observer)?,
                    Wake::Delivery(pid) => self.resume(&mut ctx, pid, now, observer),
                }
            }
        }

        ctx.clock.advance_to(horizon);
        observer.on_sim_end(ctx.clock.now, &ctx.metrics);

        tracing::info!(
            deliveries = ctx.metrics.deliveries_completed,
            in_flight = ctx.metrics.in_flight(),
            km = ctx.metrics.total_distance,
            "delivery simulation finished at {}",
            ctx.clock
        );
        Ok(ctx.metrics)
    }

    /// Run one replication per seed.  With the `parallel` feature the
    /// replications run on Rayon's pool; results are in `seeds` order either
    /// way.
    pub fn replicate(&self, days: u32, seeds: &[u64]) -> SimResult<Vec<PerformanceMetrics>> {
        let one = |&seed: &u64| {
            tracing::debug!(seed, "replication");
            self.operate_with_rng(days, SimRng::new(seed), &mut crate::NoopObserver)
        };

        #[cfg(not(feature = "parallel"))]
        {
            seeds.iter().map(one).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            seeds.par_iter().map(one).collect()
        }
    }

    // ── Event handlers ────────────────────────────────────────────────────

    /// Day boundary: fetch and check the plan, spawn one process per route,
    /// and schedule the next boundary.
    fn start_day<O: SimObserver>(
        &self,
        ctx:      &mut RunContext,
        days:     u32,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        let day = ctx.next_day;
        let routes = self.planner.plan_day(day)?;
        for route in &routes {
            route.check()?;
        }
        observer.on_day_start(day, now, &routes);
        tracing::debug!(day, routes = routes.len(), "dispatching day plan");

        for route in routes {
            let pid = ProcessId(ctx.processes.len() as u32);
            let (process, first_leg) =
                DeliveryProcess::spawn(pid, day, route, now, &self.durations, &mut ctx.rng);
            ctx.metrics.routes_dispatched += 1;

            match first_leg {
                Some(wait) => ctx.queue.push(now + wait, Wake::Delivery(pid)),
                None => {
                    let record = process.record(now);
                    ctx.metrics.record_delivery(record.clone());
                    observer.on_delivery_complete(&record, &ctx.metrics);
                }
            }
            ctx.processes.push(process);
        }

        ctx.next_day += 1;
        if ctx.next_day < days {
            ctx.queue.push(now + self.config.day_length_minutes, Wake::DayBoundary);
        }
        Ok(())
    }

    /// Travel or unloading timeout of process `pid`.
    fn resume<O: SimObserver>(&self, ctx: &mut RunContext, pid: ProcessId, now: SimTime, observer: &mut O) {
        let process = &mut ctx.processes[pid.index()];
        let route_id = process.route.id;

        match process.resume(now, &self.durations, &mut ctx.rng) {
            Transition::LegCompleted { leg, km, wait } => {
                ctx.metrics.record_leg(km);
                observer.on_leg_complete(pid, route_id, leg, km, now);
                ctx.queue.push(now + wait, Wake::Delivery(pid));
            }
            Transition::Departed { wait, .. } => {
                ctx.queue.push(now + wait, Wake::Delivery(pid));
            }
            Transition::Finished(record) => {
                tracing::trace!(route = %record.route_id, day = record.day, duration = record.duration, "delivery complete");
                ctx.metrics.record_delivery(record.clone());
                observer.on_delivery_complete(&record, &ctx.metrics);
            }
            Transition::Idle => {}
        }
    }
}
