//! case-study: end-to-end run of the distnet planning toolkit.
//!
//! Solves the transportation problem, prints the current routes as
//! coordinate sequences, simulates a week of deliveries, and prints the
//! metrics as JSON.
//!
//! Usage: `case-study [scenario.json]`.  Without an argument the built-in
//! Buenos Aires case study runs.  Log verbosity follows `RUST_LOG`.

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dn_core::SimTime;
use dn_routing::Optimizer;
use dn_sim::{PlannedRoute, SimBuilder, SimObserver};

use scenario::Scenario;

/// Seeds for the replication summary, after the main run.
const REPLICATION_SEEDS: [u64; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs each day's dispatch through `tracing`.
struct DayLogger;

impl SimObserver for DayLogger {
    fn on_day_start(&mut self, day: u32, now: SimTime, routes: &[PlannedRoute]) {
        let km: f64 = routes.iter().map(PlannedRoute::total_km).sum();
        tracing::info!(day, %now, routes = routes.len(), planned_km = km, "day dispatched");
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Summary {
    deliveries_completed: u64,
    total_distance_km:    f64,
    mean_delivery_min:    Option<f64>,
    max_delivery_min:     Option<f64>,
    in_flight_at_halt:    u64,
    replication_mean_km:  f64,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::load(&PathBuf::from(path))?,
        None => Scenario::case_study(),
    };

    println!("=== case-study: distnet ===");
    println!(
        "Depots: {}  |  Stores: {}  |  Days: {}  |  Seed: {}",
        scenario.depots.len(),
        scenario.points.len(),
        scenario.sim.days,
        scenario.sim.seed
    );
    println!();

    // 1. Optimizer: validation + cached distance matrix.
    let optimizer = Optimizer::new(scenario.depots, scenario.points, scenario.optimizer)?;
    println!(
        "Network: {} nodes, {} edges",
        optimizer.network().node_count(),
        optimizer.network().edge_count()
    );

    // 2. Transportation flow.
    let plan = optimizer.solve_transportation()?;
    println!("Transportation cost: {:.2} unit·km ({} pivots)", plan.objective, plan.iterations);
    println!("{:<12} {:<12} {:>10}", "Depot", "Store", "Units");
    println!("{}", "-".repeat(36));
    for flow in &plan.flows {
        println!("{:<12} {:<12} {:>10.1}", flow.depot.to_string(), flow.point.to_string(), flow.units);
    }
    println!();

    // 3. Current routes as coordinate sequences.
    let routes = optimizer.current_routes()?;
    let coords = optimizer.route_coordinates(&routes)?;
    for (route, seq) in routes.iter().zip(&coords) {
        let path: Vec<String> = seq.iter().map(ToString::to_string).collect();
        println!(
            "{} from {}: {:.2} km  {}",
            route.id,
            route.depot,
            optimizer.route_length(route)?,
            path.join(" → ")
        );
    }
    println!();

    // 4. Simulate.
    let sim = SimBuilder::new(optimizer).config(scenario.sim).build()?;
    let t0 = Instant::now();
    let metrics = sim.run(&mut DayLogger)?;
    let replications = sim.replicate(sim.config.days, &REPLICATION_SEEDS)?;
    println!("Simulation complete in {:.3} s", t0.elapsed().as_secs_f64());

    let replication_mean_km = replications.iter().map(|m| m.total_distance).sum::<f64>()
        / replications.len() as f64;

    let summary = Summary {
        deliveries_completed: metrics.deliveries_completed,
        total_distance_km:    metrics.total_distance,
        mean_delivery_min:    metrics.mean_delivery_time(),
        max_delivery_min:     metrics.max_delivery_time(),
        in_flight_at_halt:    metrics.in_flight(),
        replication_mean_km,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
