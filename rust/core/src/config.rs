// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout parameters threaded through every generator call.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid;

/// Grid module all generated coordinates snap to (meters).
pub const GRID_UNIT: f64 = 0.25;

/// Tolerance for geometric comparisons (meters).
pub const EPSILON: f64 = 1e-4;

/// Dimensions and heuristics for one generation pass.
///
/// All lengths are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub grid_unit: f64,
    pub epsilon: f64,
    /// Corridor width before snapping.
    pub corridor_width: f64,
    pub min_room_size: f64,
    /// Recursion cap for the space partitioner.
    pub max_split_depth: u32,
    /// Jitter applied to golden splits, as a fraction of the split length.
    pub golden_jitter: f64,
    pub story_height: f64,
    pub wall_thickness: f64,
    pub floor_thickness: f64,
    pub ceiling_thickness: f64,
    pub door_width: f64,
    pub door_height: f64,
    pub window_width: f64,
    pub window_height: f64,
    pub sill_height: f64,
    /// Minimum solid wall kept between an opening and a wall end.
    pub opening_margin: f64,
    pub stair_width: f64,
    pub stair_depth: f64,
    pub stair_steps_per_floor: u32,
    /// Emit a tagged lintel piece above each door instead of a bare gap.
    pub door_lintels: bool,
    pub corridor_windows: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_unit: GRID_UNIT,
            epsilon: EPSILON,
            corridor_width: 1.8,
            min_room_size: 3.0,
            max_split_depth: 32,
            golden_jitter: grid::GOLDEN_JITTER,
            story_height: 3.0,
            wall_thickness: 0.2,
            floor_thickness: 0.2,
            ceiling_thickness: 0.15,
            door_width: 1.0,
            door_height: 2.1,
            window_width: 1.2,
            window_height: 1.4,
            sill_height: 0.9,
            opening_margin: 0.3,
            stair_width: 2.0,
            stair_depth: 4.0,
            stair_steps_per_floor: 16,
            door_lintels: false,
            corridor_windows: false,
        }
    }
}

impl LayoutConfig {
    /// Snap to this config's grid.
    #[inline]
    pub fn snap(&self, value: f64) -> f64 {
        grid::snap_to(value, self.grid_unit)
    }

    /// True when `value` already lies on the grid (within epsilon).
    pub fn is_on_grid(&self, value: f64) -> bool {
        (self.snap(value) - value).abs() <= self.epsilon
    }

    /// Reject values that would make generation meaningless.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("grid_unit", self.grid_unit),
            ("epsilon", self.epsilon),
            ("corridor_width", self.corridor_width),
            ("min_room_size", self.min_room_size),
            ("story_height", self.story_height),
            ("wall_thickness", self.wall_thickness),
            ("floor_thickness", self.floor_thickness),
            ("ceiling_thickness", self.ceiling_thickness),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("stair_width", self.stair_width),
            ("stair_depth", self.stair_depth),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(0.0..0.5).contains(&self.golden_jitter) {
            return Err(Error::InvalidConfig(format!(
                "golden_jitter must be in [0, 0.5), got {}",
                self.golden_jitter
            )));
        }
        if self.opening_margin < 0.0 || self.sill_height < 0.0 {
            return Err(Error::InvalidConfig(
                "opening_margin and sill_height must not be negative".into(),
            ));
        }
        if self.sill_height + self.window_height > self.story_height {
            return Err(Error::InvalidConfig(format!(
                "window head {} exceeds story height {}",
                self.sill_height + self.window_height,
                self.story_height
            )));
        }
        if self.door_height > self.story_height {
            return Err(Error::InvalidConfig(format!(
                "door height {} exceeds story height {}",
                self.door_height, self.story_height
            )));
        }
        if self.ceiling_thickness >= self.story_height {
            return Err(Error::InvalidConfig(
                "ceiling_thickness must be below story_height".into(),
            ));
        }
        if self.stair_steps_per_floor == 0 {
            return Err(Error::InvalidConfig(
                "stair_steps_per_floor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
