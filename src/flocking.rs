/*
 * Flocking Module
 *
 * This module turns a boid's neighbor sets into a new heading and position.
 * Each boid follows three rules:
 * 1. Alignment: turn toward the mean heading of local neighbors
 * 2. Separation: turn away from close neighbors
 * 3. Cohesion: turn toward local neighbors
 *
 * Every rule produces a target heading. The boid then turns a fixed fraction
 * (lerp rate / 3 per rule) of the shortest angular distance toward each
 * target, moves forward and wraps around the world edges.
 *
 * A rule with nothing to act on contributes no turn at all. This covers the
 * empty neighbor sets and the degenerate case of a zero separation or
 * cohesion sum, where atan2(0, 0) would otherwise bias the heading toward 0.
 */

use std::f32::consts::{PI, TAU};

use crate::boid::Boid;
use crate::geometry::BoundingBox;

// Neighbor handles for one boid, indexing into the pre-tick snapshot.
// Neither set may contain the boid itself.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors<'a> {
    pub snapshot: &'a [Boid],
    pub local: &'a [usize],
    pub close: &'a [usize],
}

impl<'a> Neighbors<'a> {
    pub fn local_boids(&self) -> impl Iterator<Item = &'a Boid> + 'a {
        let snapshot = self.snapshot;
        self.local.iter().map(move |&i| &snapshot[i])
    }

    pub fn close_boids(&self) -> impl Iterator<Item = &'a Boid> + 'a {
        let snapshot = self.snapshot;
        self.close.iter().map(move |&i| &snapshot[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub speed: f32,
    pub lerp_rate: f32,
}

// Signed turn from `from` to `to` the short way round, in [-PI, PI).
// Opposite headings resolve to -PI.
pub fn shortest_angular_difference(to: f32, from: f32) -> f32 {
    let diff = (to - from + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for tiny negative inputs
    if diff >= PI {
        diff - TAU
    } else {
        diff
    }
}

// Normalise a heading into [0, 2PI)
pub fn normalize_heading(heading: f32) -> f32 {
    let h = heading.rem_euclid(TAU);
    if h >= TAU {
        0.0
    } else {
        h
    }
}

// Mean heading of the local neighbors
pub fn alignment_target<'a, I>(local: I) -> Option<f32>
where
    I: IntoIterator<Item = &'a Boid>,
{
    let (sum, count) = local
        .into_iter()
        .fold((0.0_f32, 0_usize), |(sum, count), other| (sum + other.heading, count + 1));
    (count > 0).then(|| sum / count as f32)
}

// Heading pointing away from the accumulated offsets to close neighbors
pub fn separation_target<'a, I>(boid: &Boid, close: I) -> Option<f32>
where
    I: IntoIterator<Item = &'a Boid>,
{
    let (sx, sy) = close.into_iter().fold((0.0_f32, 0.0_f32), |(sx, sy), other| {
        (
            sx + (boid.position.x - other.position.x),
            sy + (boid.position.y - other.position.y),
        )
    });
    if sx == 0.0 && sy == 0.0 {
        return None;
    }
    Some(sy.atan2(-sx))
}

// Heading pointing toward the accumulated offsets to local neighbors
pub fn cohesion_target<'a, I>(boid: &Boid, local: I) -> Option<f32>
where
    I: IntoIterator<Item = &'a Boid>,
{
    let (cx, cy) = local.into_iter().fold((0.0_f32, 0.0_f32), |(cx, cy), other| {
        (
            cx + (other.position.x - boid.position.x),
            cy + (other.position.y - boid.position.y),
        )
    });
    if cx == 0.0 && cy == 0.0 {
        return None;
    }
    Some((-cy).atan2(cx))
}

// New heading after blending the three rule targets, normalised to [0, 2PI)
pub fn steer(boid: &Boid, neighbors: &Neighbors<'_>, lerp_rate: f32) -> f32 {
    let weight = lerp_rate / 3.0;

    let targets = [
        alignment_target(neighbors.local_boids()),
        separation_target(boid, neighbors.close_boids()),
        cohesion_target(boid, neighbors.local_boids()),
    ];

    let turn: f32 = targets
        .into_iter()
        .flatten()
        .map(|target| shortest_angular_difference(target, boid.heading) * weight)
        .sum();

    normalize_heading(boid.heading + turn)
}

// Full per-boid transition: steer, move, wrap
pub fn update_boid(
    boid: &Boid,
    neighbors: &Neighbors<'_>,
    steering: Steering,
    world: &BoundingBox,
) -> Boid {
    let mut next = *boid;
    next.heading = steer(boid, neighbors, steering.lerp_rate);
    next.advance(steering.speed);
    next.wrap_edges(world);
    next
}
