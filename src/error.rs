/*
 * Error Module
 *
 * Configuration errors reject a simulation before it starts. Geometry
 * invariant violations inside the quadtree are not represented here; they
 * panic, since they can only come from a bug in the midpoint arithmetic.
 */

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("leaf capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("world dimensions must be finite and positive, got {width}x{height}")]
    InvalidWorldSize { width: f32, height: f32 },

    #[error("{name} radius must be finite and positive, got {value}")]
    InvalidRadius { name: &'static str, value: f32 },

    #[error("{name} neighbor count must be at least 1")]
    InvalidNeighborCount { name: &'static str },

    #[error("lerp rate must be in (0, 1], got {0}")]
    InvalidLerpRate(f32),

    #[error("movement speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),

    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
