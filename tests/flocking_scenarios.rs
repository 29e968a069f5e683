use std::f32::consts::PI;

use quadflock::flocking::shortest_angular_difference;
use quadflock::{Boid, BoundingBox, NeighborStrategy, Point, QuadTree, SimulationParams, World};

fn small_world(strategy: NeighborStrategy) -> SimulationParams {
    SimulationParams {
        strategy,
        world_width: 100.0,
        world_height: 100.0,
        speed: 1.0,
        lerp_rate: 0.25,
        leaf_capacity: 4,
        rng_seed: Some(17),
        enable_parallel: false,
        ..SimulationParams::default()
    }
}

#[test]
fn five_points_split_a_capacity_four_tree() {
    let world = BoundingBox::from_size(100.0, 100.0);
    let mut tree = QuadTree::new(world, 4).unwrap();
    let points = [(10.0, 10.0), (10.0, 20.0), (90.0, 90.0), (5.0, 5.0), (50.0, 50.0)];
    for (id, (x, y)) in points.into_iter().enumerate() {
        assert!(tree.insert(id, Point::new(x, y)));
    }

    assert!(!tree.is_leaf());
    assert!(tree.depth() >= 2);
    let mut all = tree.query(&BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    all.sort_unstable();
    assert_eq!(all, vec![0, 1, 2, 3, 4]);
}

#[test]
fn lone_boid_keeps_a_straight_line_for_ten_ticks() {
    let start = Boid::new(30.0, 60.0, 2.0);
    let mut world = World::with_boids(small_world(NeighborStrategy::default()), vec![start]).unwrap();

    let mut headings = Vec::new();
    for _ in 0..10 {
        world.step().unwrap();
        headings.push(world.boids()[0].heading);
    }
    for heading in headings {
        assert!((heading - 2.0).abs() < 1e-5);
    }

    let end = world.boids()[0].position;
    let expected = world.bounds().wrap(Point::new(30.0 + 10.0 * 2.0_f32.sin(), 60.0 - 10.0 * 2.0_f32.cos()));
    assert!((end.x - expected.x).abs() < 1e-3);
    assert!((end.y - expected.y).abs() < 1e-3);
}

#[test]
fn boids_heading_at_each_other_steer_away_after_one_tick() {
    let boids = vec![Boid::new(0.0, 0.0, 0.0), Boid::new(0.0, 5.0, PI)];
    let strategy = NeighborStrategy::Radius {
        local_radius: 10.0,
        close_radius: 10.0,
    };
    let mut world = World::with_boids(small_world(strategy), boids).unwrap();
    world.step().unwrap();

    let turn_a = shortest_angular_difference(world.boids()[0].heading, 0.0);
    let turn_b = shortest_angular_difference(world.boids()[1].heading, PI);

    // Each boid sees alignment -PI, separation -PI/2 and cohesion -PI/2
    let expected = -2.0 * PI * 0.25 / 3.0;
    assert!((turn_a - expected).abs() < 1e-4, "turn_a = {turn_a}");
    assert!((turn_b - expected).abs() < 1e-4, "turn_b = {turn_b}");
}

#[test]
fn k_nearest_mode_matches_radius_mode_for_an_isolated_pair() {
    let boids = vec![Boid::new(20.0, 20.0, 0.5), Boid::new(24.0, 23.0, 1.5)];
    let radius = NeighborStrategy::Radius {
        local_radius: 30.0,
        close_radius: 30.0,
    };
    let nearest = NeighborStrategy::KNearest {
        local_k: 1,
        close_k: 1,
    };

    let mut a = World::with_boids(small_world(radius), boids.clone()).unwrap();
    let mut b = World::with_boids(small_world(nearest), boids).unwrap();
    a.step().unwrap();
    b.step().unwrap();

    assert_eq!(a.boids(), b.boids());
}

#[test]
fn large_flock_stays_inside_the_world_and_fully_indexed() {
    let params = SimulationParams {
        num_boids: 2_000,
        world_width: 800.0,
        world_height: 600.0,
        rng_seed: Some(99),
        enable_parallel: true,
        ..SimulationParams::default()
    };
    let mut world = World::new(params).unwrap();

    for _ in 0..20 {
        let stats = world.step().unwrap();
        assert_eq!(stats.indexed, 2_000);
        assert_eq!(stats.dropped, 0);
    }
    for boid in world.boids() {
        assert!(world.bounds().contains(boid.position));
        assert!((0.0..2.0 * PI).contains(&boid.heading));
    }
}

#[test]
fn shrinking_the_world_wraps_every_boid_back_inside() {
    let params = SimulationParams {
        num_boids: 500,
        world_width: 400.0,
        world_height: 400.0,
        rng_seed: Some(5),
        ..SimulationParams::default()
    };
    let mut world = World::new(params).unwrap();
    world.resize(100.0, 80.0).unwrap();

    let stats = world.step().unwrap();
    assert!(stats.dropped > 0);
    assert_eq!(stats.indexed + stats.dropped, 500);

    let stats = world.step().unwrap();
    assert_eq!(stats.dropped, 0);
    assert_eq!(world.bounds(), BoundingBox::from_size(100.0, 80.0));
}
