/*
 * Geometry Module
 *
 * This module defines the Point and BoundingBox types shared by the quadtree,
 * the neighbor search and the flocking update.
 *
 * Containment is half-open: a box includes its left and top edges but not its
 * right and bottom edges. Adjacent quadrants therefore never both accept a
 * point lying on the line between them.
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

// Axis-aligned rectangle, field order top/left/bottom/right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl BoundingBox {
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self { top, left, bottom, right }
    }

    // World rectangle anchored at the origin
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, height, width)
    }

    // Square query box of half-size `radius` centred on `center`
    pub fn around(center: Point, radius: f32) -> Self {
        Self::new(
            center.y - radius,
            center.x - radius,
            center.y + radius,
            center.x + radius,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    // True when both extents are finite and strictly positive
    pub fn has_positive_area(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        contains(self, point)
    }

    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        intersects(self, other)
    }

    // Wrap a point into this box using true modulo on both axes
    pub fn wrap(&self, point: Point) -> Point {
        Point::new(
            wrap_coordinate(point.x, self.left, self.right),
            wrap_coordinate(point.y, self.top, self.bottom),
        )
    }
}

#[inline]
pub fn contains(boundary: &BoundingBox, point: Point) -> bool {
    point.x >= boundary.left
        && point.x < boundary.right
        && point.y >= boundary.top
        && point.y < boundary.bottom
}

// Rectangles that only share an edge do not intersect
#[inline]
pub fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

// Result lies in [low, high) even for negative offsets
pub fn wrap_coordinate(value: f32, low: f32, high: f32) -> f32 {
    let wrapped = low + (value - low).rem_euclid(high - low);
    // Rounding in rem_euclid or in the add back can land exactly on `high`
    if wrapped >= high {
        low
    } else {
        wrapped
    }
}
