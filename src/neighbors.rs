/*
 * Neighbor Strategy Module
 *
 * Two ways of choosing a boid's local and close neighbors:
 * - Radius: range query on the tick's quadtree, then a circle filter
 * - KNearest: scan every boid, keeping the K closest in a bounded max-heap
 *
 * The strategy is a plain enum matched at the call site in the world
 * stepper. Both strategies always exclude the boid itself.
 */

use serde::{Deserialize, Serialize};

use crate::boid::Boid;
use crate::error::ConfigError;
use crate::geometry::BoundingBox;
use crate::heap::k_smallest;
use crate::quadtree::QuadTree;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NeighborStrategy {
    Radius { local_radius: f32, close_radius: f32 },
    KNearest { local_k: usize, close_k: usize },
}

impl Default for NeighborStrategy {
    fn default() -> Self {
        NeighborStrategy::Radius {
            local_radius: 50.0,
            close_radius: 20.0,
        }
    }
}

impl NeighborStrategy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            NeighborStrategy::Radius {
                local_radius,
                close_radius,
            } => {
                check_radius("local", local_radius)?;
                check_radius("close", close_radius)
            }
            NeighborStrategy::KNearest { local_k, close_k } => {
                if local_k == 0 {
                    return Err(ConfigError::InvalidNeighborCount { name: "local" });
                }
                if close_k == 0 {
                    return Err(ConfigError::InvalidNeighborCount { name: "close" });
                }
                Ok(())
            }
        }
    }

    pub fn uses_index(&self) -> bool {
        matches!(self, NeighborStrategy::Radius { .. })
    }
}

fn check_radius(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius { name, value })
    }
}

// Boids strictly within `radius` of boid `me`, excluding `me`
pub fn within_radius(
    index: &QuadTree,
    snapshot: &[Boid],
    me: usize,
    radius: f32,
    out: &mut Vec<usize>,
) {
    out.clear();
    let center = snapshot[me].position;
    index.query_into(&BoundingBox::around(center, radius), out);

    let radius_sq = radius * radius;
    out.retain(|&other| {
        other != me && snapshot[other].position.distance_squared(center) < radius_sq
    });
}

// The `k` boids closest to boid `me`, excluding `me`, in no particular order
pub fn k_nearest(snapshot: &[Boid], me: usize, k: usize) -> Vec<usize> {
    let center = snapshot[me].position;
    k_smallest(
        k,
        snapshot
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != me)
            .map(|(other, boid)| (boid.position.distance_squared(center), other)),
    )
}
