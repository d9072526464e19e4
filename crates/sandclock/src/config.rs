//! Engine tunables and hourglass layout.
//!
//! Two revisions of the hourglass disagreed on the bake block size (8x4
//! vs 4x4) and on how far the fall heading reaches (100 vs 10 cells).
//! The defaults here pick 8x4 and 100.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::PreferenceThresholds;

/// Tunables for the per-tick simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Width of one bake block in cells.
    pub block_width: u32,

    /// Height of one bake block in cells. `block_width * block_height`
    /// must fit in a `u64`.
    pub block_height: u32,

    /// Distance to the heading point of a fall. A change in push direction
    /// that moves the heading by a whole cell interrupts the fall, so larger
    /// values make falls more sensitive to tilt.
    pub fall_reach: f32,

    /// Angles this close to a quadrant axis only consider the axis and the
    /// diagonal.
    pub axis_snap_degrees: f32,

    /// Angles further than this from the quadrant diagonal add a lean
    /// neighbor on the far side.
    pub lean_threshold_degrees: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            block_width: 8,
            block_height: 4,
            fall_reach: 100.0,
            axis_snap_degrees: 1.0,
            lean_threshold_degrees: 5.0,
        }
    }
}

impl SimConfig {
    /// Config with the 4x4 bake block and short 10-cell reach of the
    /// other revision.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            block_width: 4,
            block_height: 4,
            fall_reach: 10.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.block_width, self.block_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBlock { width, height });
        }
        let bits = width.saturating_mul(height);
        if bits > 64 {
            return Err(ConfigError::BlockTooLarge { width, height, bits });
        }
        if !self.fall_reach.is_finite() || self.fall_reach < 1.0 {
            return Err(ConfigError::InvalidFallReach(self.fall_reach));
        }
        if !(0.0..45.0).contains(&self.axis_snap_degrees) {
            return Err(ConfigError::InvalidAxisSnap(self.axis_snap_degrees));
        }
        if !(0.0..=45.0).contains(&self.lean_threshold_degrees) {
            return Err(ConfigError::InvalidLeanThreshold(
                self.lean_threshold_degrees,
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn thresholds(&self) -> PreferenceThresholds {
        PreferenceThresholds {
            axis_snap: self.axis_snap_degrees,
            lean: self.lean_threshold_degrees,
        }
    }
}

/// Shape of the standard hourglass and where its grains start.
///
/// The upper chamber spans `x in [0, s)`, `y in [s, 2s)` and the lower one
/// `x in [s, 2s)`, `y in [0, s)`, so they touch only diagonally at the neck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourglassLayout {
    pub chamber_size: i32,

    /// Inclusive lower corner of the seed rectangle.
    pub seed_min: IVec2,

    /// Exclusive upper corner of the seed rectangle.
    pub seed_max: IVec2,
}

impl Default for HourglassLayout {
    fn default() -> Self {
        Self {
            chamber_size: 8,
            seed_min: IVec2::new(0, 10),
            seed_max: IVec2::new(8, 14),
        }
    }
}

impl HourglassLayout {
    /// The neck edge: upper chamber's bottom-right cell and the lower
    /// chamber's top-left cell.
    #[must_use]
    pub fn neck(&self) -> (IVec2, IVec2) {
        let s = self.chamber_size;
        (IVec2::new(s - 1, s), IVec2::new(s, s - 1))
    }

    /// Seed cells in row-major order, bottom row first.
    pub fn seeds(&self) -> impl Iterator<Item = IVec2> + '_ {
        (self.seed_min.y..self.seed_max.y).flat_map(move |y| {
            (self.seed_min.x..self.seed_max.x).map(move |x| IVec2::new(x, y))
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chamber_size <= 0 {
            return Err(ConfigError::EmptyChamber(self.chamber_size));
        }
        if self.seed_min.x >= self.seed_max.x || self.seed_min.y >= self.seed_max.y {
            return Err(ConfigError::EmptySeed {
                min: self.seed_min,
                max: self.seed_max,
            });
        }
        Ok(())
    }
}
