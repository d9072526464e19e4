//! Error types for configuration and adapter-boundary input.
//!
//! Contract violations inside a tick are panics, not errors. These types
//! cover the places where bad input is expected and recoverable: building
//! an engine from a config, and validating a push direction before it
//! reaches `simulate`.

use glam::{IVec2, Vec2};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("bake block must be at least 1x1, got {width}x{height}")]
    EmptyBlock { width: u32, height: u32 },

    #[error("bake block {width}x{height} needs {bits} bits, at most 64 fit in a block")]
    BlockTooLarge { width: u32, height: u32, bits: u32 },

    #[error("fall reach must be a finite value of at least 1, got {0}")]
    InvalidFallReach(f32),

    #[error("axis snap must lie in [0, 45), got {0}")]
    InvalidAxisSnap(f32),

    #[error("lean threshold must lie in [0, 45], got {0}")]
    InvalidLeanThreshold(f32),

    #[error("chamber size must be positive, got {0}")]
    EmptyChamber(i32),

    #[error("seed region {min}..{max} is empty")]
    EmptySeed { min: IVec2, max: IVec2 },

    #[error("seed cell {0} is not movable terrain")]
    SeedOutsideTerrain(IVec2),

    #[error("seed cell {0} is listed more than once")]
    DuplicateSeed(IVec2),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("push direction {0} is zero or not finite")]
    DegenerateDirection(Vec2),

    #[error("angle {0} is outside [0, 360)")]
    AngleOutOfRange(f32),

    #[error("tilt must be a finite number of degrees, got {0}")]
    NonFiniteTilt(f32),
}
