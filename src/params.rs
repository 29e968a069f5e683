/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunables for the boid simulation. Parameters can be loaded from a JSON
 * file at startup and modified through the UI afterwards. Every change is
 * validated before the world accepts it.
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::flocking::Steering;
use crate::geometry::BoundingBox;
use crate::neighbors::NeighborStrategy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub speed: f32,
    pub lerp_rate: f32,
    pub strategy: NeighborStrategy,
    pub leaf_capacity: usize,
    pub world_width: f32,
    pub world_height: f32,
    pub rng_seed: Option<u64>,
    // Performance settings
    pub enable_parallel: bool,
    // Display settings, ignored by the world
    pub show_debug: bool,
    pub show_quadtree: bool,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 1000,
            speed: 1.0,
            lerp_rate: 0.1,
            strategy: NeighborStrategy::default(),
            leaf_capacity: 8,
            world_width: 1280.0,
            world_height: 720.0,
            rng_seed: None,
            enable_parallel: true,
            show_debug: false,
            show_quadtree: false,
            pause_simulation: false,
        }
    }
}

// Which groups of parameters differ between two snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub population: bool,
    pub simulation: bool,
    pub display: bool,
}

impl ParamChanges {
    pub fn any(&self) -> bool {
        self.population || self.simulation || self.display
    }
}

impl SimulationParams {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leaf_capacity < 1 {
            return Err(ConfigError::InvalidCapacity(self.leaf_capacity));
        }
        validate_world_size(self.world_width, self.world_height)?;
        if !(self.lerp_rate > 0.0 && self.lerp_rate <= 1.0) {
            return Err(ConfigError::InvalidLerpRate(self.lerp_rate));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        self.strategy.validate()
    }

    pub fn world_bounds(&self) -> BoundingBox {
        BoundingBox::from_size(self.world_width, self.world_height)
    }

    pub fn steering(&self) -> Steering {
        Steering {
            speed: self.speed,
            lerp_rate: self.lerp_rate,
        }
    }

    // Compare against an earlier copy, typically taken before the UI ran
    pub fn changes_since(&self, previous: &Self) -> ParamChanges {
        ParamChanges {
            population: self.num_boids != previous.num_boids
                || self.rng_seed != previous.rng_seed,
            simulation: self.speed != previous.speed
                || self.lerp_rate != previous.lerp_rate
                || self.strategy != previous.strategy
                || self.leaf_capacity != previous.leaf_capacity
                || self.enable_parallel != previous.enable_parallel,
            display: self.show_debug != previous.show_debug
                || self.show_quadtree != previous.show_quadtree
                || self.pause_simulation != previous.pause_simulation,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        0..=20000
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn get_lerp_rate_range() -> std::ops::RangeInclusive<f32> {
        0.01..=1.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        1.0..=200.0
    }

    pub fn get_neighbor_count_range() -> std::ops::RangeInclusive<usize> {
        1..=64
    }

    pub fn get_leaf_capacity_range() -> std::ops::RangeInclusive<usize> {
        1..=128
    }
}

pub fn validate_world_size(width: f32, height: f32) -> Result<(), ConfigError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidWorldSize { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let base = SimulationParams::default();

        let p = SimulationParams { leaf_capacity: 0, ..base.clone() };
        assert!(matches!(p.validate(), Err(ConfigError::InvalidCapacity(0))));

        let p = SimulationParams { world_width: -1.0, ..base.clone() };
        assert!(matches!(p.validate(), Err(ConfigError::InvalidWorldSize { .. })));

        let p = SimulationParams { world_height: 0.0, ..base.clone() };
        assert!(matches!(p.validate(), Err(ConfigError::InvalidWorldSize { .. })));

        for lerp_rate in [0.0, -0.5, 1.5, f32::NAN] {
            let p = SimulationParams { lerp_rate, ..base.clone() };
            assert!(matches!(p.validate(), Err(ConfigError::InvalidLerpRate(_))));
        }

        let p = SimulationParams { speed: f32::INFINITY, ..base.clone() };
        assert!(matches!(p.validate(), Err(ConfigError::InvalidSpeed(_))));

        let p = SimulationParams {
            strategy: NeighborStrategy::KNearest { local_k: 0, close_k: 2 },
            ..base
        };
        assert!(matches!(
            p.validate(),
            Err(ConfigError::InvalidNeighborCount { name: "local" })
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{
            "num_boids": 250,
            "strategy": { "mode": "k_nearest", "local_k": 7, "close_k": 3 }
        }"#;
        let params: SimulationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.num_boids, 250);
        assert_eq!(
            params.strategy,
            NeighborStrategy::KNearest { local_k: 7, close_k: 3 }
        );
        assert_eq!(params.leaf_capacity, SimulationParams::default().leaf_capacity);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn loading_a_missing_file_reports_the_path() {
        let err = SimulationParams::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn change_detection_groups_fields() {
        let before = SimulationParams::default();

        let after = SimulationParams { num_boids: 3, ..before.clone() };
        assert_eq!(
            after.changes_since(&before),
            ParamChanges { population: true, simulation: false, display: false }
        );

        let after = SimulationParams { lerp_rate: 0.9, show_quadtree: true, ..before.clone() };
        let changes = after.changes_since(&before);
        assert!(!changes.population && changes.simulation && changes.display);

        assert!(!before.changes_since(&before).any());
    }
}
