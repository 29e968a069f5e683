/*
 * Quadtree Boids
 *
 * This application simulates the flocking behavior of birds (boids) based on three main rules:
 * 1. Alignment: Steer towards the average heading of neighbors
 * 2. Separation: Steer away from very close neighbors
 * 3. Cohesion: Steer towards nearby neighbors
 *
 * Neighbors are found through a quadtree rebuilt every frame, or alternatively
 * by a bounded heap keeping the K nearest boids.
 *
 * Usage: quadflock [params.json]
 * Logging is controlled through RUST_LOG, e.g. RUST_LOG=quadflock=debug.
 */

use anyhow::{Context, Result};
use quadflock::{app, SimulationParams};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let params = match std::env::args_os().nth(1) {
        Some(path) => SimulationParams::from_json_file(&path)
            .with_context(|| format!("loading simulation parameters from {}", path.to_string_lossy()))?,
        None => SimulationParams::default(),
    };
    params.validate().context("invalid simulation parameters")?;

    info!(
        boids = params.num_boids,
        strategy = ?params.strategy,
        parallel = params.enable_parallel,
        "Starting boid simulation"
    );
    app::run(params);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
