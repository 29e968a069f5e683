/*
 * Boid Simulation Benchmark
 *
 * This file contains benchmarks for the boid simulation to identify performance bottlenecks.
 * It measures the quadtree build and range queries, K-nearest selection with the
 * bounded heap, and the full world step for both neighbor strategies.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use quadflock::neighbors::{k_nearest, within_radius};
use quadflock::world::index_boids;
use quadflock::{Boid, BoundingBox, NeighborStrategy, SimulationParams, World};

const WORLD: BoundingBox = BoundingBox::from_size(2000.0, 2000.0);

fn random_boids(n: usize) -> Vec<Boid> {
    let mut rng = StdRng::seed_from_u64(0xB01D);
    (0..n).map(|_| Boid::random(&mut rng, &WORLD)).collect()
}

// Benchmark building the quadtree from scratch
fn bench_quadtree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");

    for num_boids in [100, 500, 1000, 2000, 5000].iter() {
        let boids = random_boids(*num_boids);
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), &boids, |b, boids| {
            b.iter(|| black_box(index_boids(boids, WORLD, 8).map(|(tree, _)| tree.len())));
        });
    }

    group.finish();
}

// Benchmark one radius query per boid against a built tree
fn bench_radius_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_queries");

    for num_boids in [100, 500, 1000, 2000, 5000].iter() {
        let boids = random_boids(*num_boids);
        let (tree, _) = index_boids(&boids, WORLD, 8).expect("valid benchmark world");
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), &boids, |b, boids| {
            let mut found = Vec::new();
            b.iter(|| {
                let mut total = 0;
                for me in 0..boids.len() {
                    within_radius(&tree, boids, me, 50.0, &mut found);
                    total += found.len();
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

// Benchmark K-nearest selection per boid with the bounded heap
fn bench_k_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_nearest");

    for num_boids in [100, 500, 1000, 2000].iter() {
        let boids = random_boids(*num_boids);
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), &boids, |b, boids| {
            b.iter(|| {
                let mut total = 0;
                for me in 0..boids.len() {
                    total += k_nearest(boids, me, 7).len();
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

// Benchmark the overall update loop
fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    let strategies = [
        ("radius", NeighborStrategy::default()),
        ("k_nearest", NeighborStrategy::KNearest { local_k: 7, close_k: 3 }),
    ];

    for (name, strategy) in strategies {
        for num_boids in [500, 2000].iter() {
            let params = SimulationParams {
                num_boids: *num_boids,
                strategy,
                world_width: WORLD.width(),
                world_height: WORLD.height(),
                rng_seed: Some(7),
                ..SimulationParams::default()
            };
            let mut world = World::new(params).expect("valid benchmark params");
            group.bench_function(BenchmarkId::new(name, num_boids), |b| {
                b.iter(|| black_box(world.step().map(|stats| stats.indexed)));
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_quadtree_build, bench_radius_queries, bench_k_nearest, bench_world_step
}

criterion_main!(benches);
