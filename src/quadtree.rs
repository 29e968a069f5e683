/*
 * Quadtree Module
 *
 * This module defines the QuadTree spatial index used for neighbor lookups.
 * It replaces a linear scan over every boid with a rectangular range query
 * that prunes whole quadrants which cannot contain a match.
 *
 * The tree stores lightweight handles (indices into the boid snapshot of the
 * current tick) together with the position they were inserted at. It is
 * rebuilt from scratch every tick, so there is no removal or rebalancing:
 * a leaf that reaches capacity splits into four quadrants once and stays
 * split for the lifetime of the tree.
 */

use crate::error::ConfigError;
use crate::geometry::{BoundingBox, Point};

// Leaves at this depth never split and may grow past capacity.
// Prevents unbounded subdivision when many boids share one position.
pub const MAX_DEPTH: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub id: usize,
    pub position: Point,
}

#[derive(Debug)]
enum Node {
    Leaf(Vec<Item>),
    // Children in NW, NE, SW, SE order
    Internal(Box<[QuadTree; 4]>),
}

#[derive(Debug)]
pub struct QuadTree {
    boundary: BoundingBox,
    capacity: usize,
    depth: u32,
    total_items: usize,
    node: Node,
}

impl QuadTree {
    pub fn new(boundary: BoundingBox, capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 1 {
            return Err(ConfigError::InvalidCapacity(capacity));
        }
        if !boundary.has_positive_area() {
            return Err(ConfigError::InvalidWorldSize {
                width: boundary.width(),
                height: boundary.height(),
            });
        }
        Ok(Self::leaf(boundary, capacity, 0))
    }

    fn leaf(boundary: BoundingBox, capacity: usize, depth: u32) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            total_items: 0,
            node: Node::Leaf(Vec::new()),
        }
    }

    pub fn boundary(&self) -> &BoundingBox {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Number of items stored in this subtree
    pub fn len(&self) -> usize {
        self.total_items
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    // Height of the subtree; a lone leaf has depth 1
    pub fn depth(&self) -> u32 {
        match &self.node {
            Node::Leaf(_) => 1,
            Node::Internal(children) => {
                1 + children.iter().map(QuadTree::depth).max().unwrap_or(0)
            }
        }
    }

    // Insert `id` at `position`. Returns false, leaving the tree untouched,
    // when the position is outside this node's boundary.
    // Panics if no quadrant of an internal node accepts a contained position.
    pub fn insert(&mut self, id: usize, position: Point) -> bool {
        if !self.boundary.contains(position) {
            return false;
        }

        if self.is_full() {
            self.split();
        }

        let item = Item { id, position };
        match &mut self.node {
            Node::Leaf(items) => items.push(item),
            Node::Internal(children) => {
                if !place(children, item) {
                    partition_violation(&self.boundary, item);
                }
            }
        }
        self.total_items += 1;
        true
    }

    fn is_full(&self) -> bool {
        match &self.node {
            Node::Leaf(items) => items.len() >= self.capacity && self.depth < MAX_DEPTH,
            Node::Internal(_) => false,
        }
    }

    // Turn a leaf into four midpoint quadrants and move every item into the
    // first one (NW, NE, SW, SE) that contains it. No-op on an internal node.
    pub fn split(&mut self) {
        let items = match &mut self.node {
            Node::Leaf(items) => std::mem::take(items),
            Node::Internal(_) => return,
        };

        let BoundingBox { top, left, bottom, right } = self.boundary;
        let mid_x = (left + right) / 2.0;
        let mid_y = (top + bottom) / 2.0;
        let depth = self.depth + 1;

        // All four quadrants are created together so the partition is never partial
        let children = Box::new([
            QuadTree::leaf(BoundingBox::new(top, left, mid_y, mid_x), self.capacity, depth),
            QuadTree::leaf(BoundingBox::new(top, mid_x, mid_y, right), self.capacity, depth),
            QuadTree::leaf(BoundingBox::new(mid_y, left, bottom, mid_x), self.capacity, depth),
            QuadTree::leaf(BoundingBox::new(mid_y, mid_x, bottom, right), self.capacity, depth),
        ]);
        self.node = Node::Internal(children);
        self.total_items = 0;

        if let Node::Internal(children) = &mut self.node {
            for item in items {
                if !place(children, item) {
                    partition_violation(&self.boundary, item);
                }
                self.total_items += 1;
            }
        }
    }

    // Handles of every item whose position lies inside `rect`, in no particular order
    pub fn query(&self, rect: &BoundingBox) -> Vec<usize> {
        let mut found = Vec::new();
        self.query_into(rect, &mut found);
        found
    }

    // Same as `query` but appends into a caller-owned buffer
    pub fn query_into(&self, rect: &BoundingBox, found: &mut Vec<usize>) {
        if !self.boundary.intersects(rect) {
            return;
        }

        match &self.node {
            Node::Leaf(items) => found.extend(
                items
                    .iter()
                    .filter(|item| rect.contains(item.position))
                    .map(|item| item.id),
            ),
            Node::Internal(children) => {
                for child in children.iter() {
                    child.query_into(rect, found);
                }
            }
        }
    }

    // Rectangles of every node, parents before children (used by the debug overlay)
    pub fn node_boundaries(&self) -> Vec<BoundingBox> {
        let mut out = Vec::new();
        self.node_boundaries_into(&mut out);
        out
    }

    fn node_boundaries_into(&self, out: &mut Vec<BoundingBox>) {
        out.push(self.boundary);
        if let Node::Internal(children) = &self.node {
            for child in children.iter() {
                child.node_boundaries_into(out);
            }
        }
    }
}

// First quadrant to accept the item wins
fn place(children: &mut [QuadTree; 4], item: Item) -> bool {
    children
        .iter_mut()
        .any(|child| child.insert(item.id, item.position))
}

fn partition_violation(boundary: &BoundingBox, item: Item) -> ! {
    panic!(
        "quadtree partition invariant violated: {:?} lies inside {:?} but no quadrant accepts it",
        item.position, boundary
    );
}
