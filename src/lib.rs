/*
 * Quadtree Boids - Module Definitions
 *
 * This file defines the module structure for the boid simulation.
 * The simulation core (geometry, quadtree, heap, neighbors, flocking, world)
 * has no knowledge of the window; app, renderer, ui and debug form the nannou
 * front end that drives it.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use error::ConfigError;
pub use geometry::{BoundingBox, Point};
pub use heap::MaxHeap;
pub use neighbors::NeighborStrategy;
pub use params::SimulationParams;
pub use quadtree::QuadTree;
pub use world::{StepStats, World};
pub use debug::DebugInfo;
pub use app::Model;

// Simulation core
pub mod geometry;
pub mod error;
pub mod quadtree;
pub mod heap;
pub mod boid;
pub mod flocking;
pub mod neighbors;
pub mod params;
pub mod world;

// Front end
pub mod debug;
pub mod app;
pub mod ui;
pub mod renderer;

// Constants
pub const BOID_SIZE: f32 = 6.0;
