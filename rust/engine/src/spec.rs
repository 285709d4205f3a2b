// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building specification accepted by the engine.

use massform_geometry::RoofType;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Upper bound on stories per building.
pub const MAX_FLOORS: u32 = 200;

/// What to generate: footprint, story count, seed and roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingSpec {
    pub width: f64,
    pub depth: f64,
    pub floors: u32,
    pub seed: u64,
    pub roof: RoofType,
}

impl Default for BuildingSpec {
    fn default() -> Self {
        Self {
            width: 20.0,
            depth: 16.0,
            floors: 1,
            seed: 0,
            roof: RoofType::Flat,
        }
    }
}

impl BuildingSpec {
    pub fn new(width: f64, depth: f64, floors: u32, seed: u64) -> Self {
        Self {
            width,
            depth,
            floors,
            seed,
            ..Default::default()
        }
    }

    pub fn with_roof(self, roof: RoofType) -> Self {
        Self { roof, ..self }
    }

    /// Reject values no layout can be generated for.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("depth", self.depth)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidSpec(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.floors == 0 || self.floors > MAX_FLOORS {
            return Err(EngineError::InvalidSpec(format!(
                "floors must be between 1 and {MAX_FLOORS}, got {}",
                self.floors
            )));
        }
        Ok(())
    }

    /// Canonical JSON form, used for content addressing.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
