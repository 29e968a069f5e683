/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and other debug information to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS and frame time
 * - Time spent in the last world step
 * - Quadtree statistics from the last step (indexed boids, dropped boids, depth)
 */

use std::time::Duration;

use crate::world::StepStats;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub last_step: StepStats,
}

impl DebugInfo {
    // Lines shown in the on-screen debug panel
    pub fn lines(&self, boids_len: usize, world_width: f32, world_height: f32) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Step time: {:.2} ms", self.step_time.as_secs_f64() * 1000.0),
            format!("Tick: {}", self.last_step.tick),
            format!("Total Boids: {}", boids_len),
            format!(
                "Indexed: {} (dropped {})",
                self.last_step.indexed, self.last_step.dropped
            ),
            format!("Tree depth: {}", self.last_step.tree_depth),
            format!("World: {:.0}x{:.0}", world_width, world_height),
        ]
    }
}
