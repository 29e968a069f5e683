/*
 * Boid Module
 *
 * This module defines the Boid struct: a position and a heading.
 * Headings are measured in radians from the "up" axis (negative y) turning
 * toward positive x, so a heading of 0 moves a boid up the screen and a
 * heading of PI/2 moves it right.
 */

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::geometry::{BoundingBox, Point};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boid {
    pub position: Point,
    pub heading: f32,
}

impl Boid {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            position: Point::new(x, y),
            heading,
        }
    }

    // Uniformly random position inside `bounds` and heading in [0, 2PI)
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: &BoundingBox) -> Self {
        let x = bounds.left + rng.gen::<f32>() * bounds.width();
        let y = bounds.top + rng.gen::<f32>() * bounds.height();
        // Rounding can land exactly on the exclusive edge
        let position = bounds.wrap(Point::new(x, y));
        Self {
            position,
            heading: rng.gen_range(0.0..TAU),
        }
    }

    // Move `speed` units along the current heading
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        let (sin, cos) = self.heading.sin_cos();
        self.position.y -= cos * speed;
        self.position.x += sin * speed;
    }

    // Wrap the boid around the world edges
    #[inline]
    pub fn wrap_edges(&mut self, world: &BoundingBox) {
        self.position = world.wrap(self.position);
    }
}
