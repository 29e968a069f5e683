/*
 * World Module
 *
 * This module owns the boids and advances the simulation one tick at a time.
 * Each tick:
 * 1. Applies a pending resize, if any
 * 2. Copies the boids into a read-only snapshot
 * 3. Builds a fresh quadtree from the snapshot (radius strategy only)
 * 4. Updates every boid from neighbors found in the snapshot
 * 5. Drops the quadtree
 *
 * Every decision within a tick is based on the same pre-tick positions, which
 * also makes the update phase safe to run in parallel: workers share the
 * snapshot and the index read-only and each one writes only its own boid.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::boid::Boid;
use crate::error::ConfigError;
use crate::flocking::{update_boid, Neighbors};
use crate::geometry::BoundingBox;
use crate::neighbors::{k_nearest, within_radius, NeighborStrategy};
use crate::params::{validate_world_size, SimulationParams};
use crate::quadtree::QuadTree;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub tick: u64,
    // Boids stored in this tick's quadtree
    pub indexed: usize,
    // Boids left out of the quadtree because they were outside the world
    pub dropped: usize,
    pub tree_depth: u32,
}

pub struct World {
    boids: Vec<Boid>,
    params: SimulationParams,
    bounds: BoundingBox,
    pending_resize: Option<(f32, f32)>,
    tick: u64,
    rng: StdRng,
}

impl World {
    // Create a world with `params.num_boids` randomly placed boids
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let bounds = params.world_bounds();
        let boids: Vec<Boid> = (0..params.num_boids)
            .map(|_| Boid::random(&mut rng, &bounds))
            .collect();

        info!(
            boids = boids.len(),
            width = bounds.width(),
            height = bounds.height(),
            strategy = ?params.strategy,
            "Created world"
        );

        Ok(Self {
            boids,
            params,
            bounds,
            pending_resize: None,
            tick: 0,
            rng,
        })
    }

    // Create a world from explicit boids; `num_boids` is taken from their count
    pub fn with_boids(mut params: SimulationParams, boids: Vec<Boid>) -> Result<Self, ConfigError> {
        params.num_boids = boids.len();
        let mut world = Self::new(SimulationParams {
            num_boids: 0,
            ..params.clone()
        })?;
        world.params = params;
        world.boids = boids;
        Ok(world)
    }

    // Read-only view of the boids as of the last completed tick
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    // Request new world dimensions, applied at the start of the next tick.
    // Boids are not moved; ones outside a smaller world skip that tick's index.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        validate_world_size(width, height)?;
        self.pending_resize = Some((width, height));
        Ok(())
    }

    fn apply_pending_resize(&mut self) {
        if let Some((width, height)) = self.pending_resize.take() {
            self.params.world_width = width;
            self.params.world_height = height;
            self.bounds = self.params.world_bounds();
            info!(width, height, "Resized world");
        }
    }

    // Replace the tunables, growing or shrinking the population to match
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ConfigError> {
        params.validate()?;
        let target = params.num_boids;
        let (width, height) = (params.world_width, params.world_height);
        let resized = width != self.params.world_width || height != self.params.world_height;
        let reseed = params.rng_seed.filter(|_| params.rng_seed != self.params.rng_seed);

        // World dimensions follow the same deferred path as `resize`
        self.params = SimulationParams {
            world_width: self.params.world_width,
            world_height: self.params.world_height,
            ..params
        };
        if resized {
            self.pending_resize = Some((width, height));
        }
        if let Some(seed) = reseed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.resize_population(target);
        Ok(())
    }

    // Bounds the next tick will run with, including a pending resize
    fn next_bounds(&self) -> BoundingBox {
        match self.pending_resize {
            Some((width, height)) => BoundingBox::from_size(width, height),
            None => self.bounds,
        }
    }

    fn resize_population(&mut self, target: usize) {
        if target == self.boids.len() {
            return;
        }
        let bounds = self.next_bounds();
        let rng = &mut self.rng;
        self.boids.resize_with(target, || Boid::random(rng, &bounds));
        self.params.num_boids = target;
        info!(boids = target, "Resized population");
    }

    // Scatter every boid to a new random position and heading
    pub fn reset(&mut self) {
        let bounds = self.next_bounds();
        for boid in &mut self.boids {
            *boid = Boid::random(&mut self.rng, &bounds);
        }
        info!(boids = self.boids.len(), "Reset boids");
    }

    // Quadtree over the current boids, plus the number that did not fit
    pub fn build_index(&self) -> Result<(QuadTree, usize), ConfigError> {
        index_boids(&self.boids, self.bounds, self.params.leaf_capacity)
    }

    // Advance the simulation by one tick
    pub fn step(&mut self) -> Result<StepStats, ConfigError> {
        self.apply_pending_resize();
        self.tick += 1;

        let snapshot = self.boids.clone();
        let mut stats = StepStats {
            tick: self.tick,
            ..StepStats::default()
        };

        let strategy = self.params.strategy;
        match strategy {
            NeighborStrategy::Radius {
                local_radius,
                close_radius,
            } => {
                let (index, dropped) =
                    index_boids(&snapshot, self.bounds, self.params.leaf_capacity)?;
                stats.indexed = index.len();
                stats.dropped = dropped;
                stats.tree_depth = index.depth();

                self.update_all(&snapshot, |me, local, close| {
                    within_radius(&index, &snapshot, me, local_radius, local);
                    within_radius(&index, &snapshot, me, close_radius, close);
                });
            }
            NeighborStrategy::KNearest { local_k, close_k } => {
                self.update_all(&snapshot, |me, local, close| {
                    *local = k_nearest(&snapshot, me, local_k);
                    *close = k_nearest(&snapshot, me, close_k);
                });
            }
        }

        debug!(
            tick = stats.tick,
            indexed = stats.indexed,
            dropped = stats.dropped,
            depth = stats.tree_depth,
            "World step"
        );
        Ok(stats)
    }

    // Run the flocking update for every boid against `snapshot`
    fn update_all<G>(&mut self, snapshot: &[Boid], gather: G)
    where
        G: Fn(usize, &mut Vec<usize>, &mut Vec<usize>) + Sync,
    {
        let steering = self.params.steering();
        let bounds = self.bounds;

        let update = |me: usize, boid: &mut Boid, local: &mut Vec<usize>, close: &mut Vec<usize>| {
            gather(me, local, close);
            let neighbors = Neighbors {
                snapshot,
                local: local.as_slice(),
                close: close.as_slice(),
            };
            *boid = update_boid(&snapshot[me], &neighbors, steering, &bounds);
        };

        if self.params.enable_parallel {
            self.boids.par_iter_mut().enumerate().for_each_init(
                || (Vec::new(), Vec::new()),
                |(local, close), (me, boid)| update(me, boid, local, close),
            );
        } else {
            let (mut local, mut close) = (Vec::new(), Vec::new());
            for (me, boid) in self.boids.iter_mut().enumerate() {
                update(me, boid, &mut local, &mut close);
            }
        }
    }
}

// Quadtree of every boid inside `bounds`, plus the count left outside
pub fn index_boids(
    boids: &[Boid],
    bounds: BoundingBox,
    capacity: usize,
) -> Result<(QuadTree, usize), ConfigError> {
    let mut index = QuadTree::new(bounds, capacity)?;
    let mut dropped = 0;
    for (i, boid) in boids.iter().enumerate() {
        if !index.insert(i, boid.position) {
            dropped += 1;
        }
    }
    if dropped > 0 {
        warn!(dropped, "Boids outside the world were left out of the index");
    }
    Ok((index, dropped))
}
