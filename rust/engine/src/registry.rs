// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Asset-registry records.
//!
//! Records describe generated assets and their feature slots. They are plain
//! data; persisting them is the caller's business.

use std::collections::BTreeMap;

use massform_core::{
    golden_split_with, stream_for, DoorOpening, LayoutConfig, Rect, Side, Stairwell,
};
use massform_geometry::{BoxDescriptor, BoxPart, Point3};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{EngineError, Result};
use crate::spec::BuildingSpec;

/// Hex characters kept from the content digest.
pub const ASSET_ID_LEN: usize = 16;

/// Window slot height above the wall base for engineered walls.
const WALL_SLOT_Z: f64 = 1.2;
const WALL_SLOT_SIZE: [f64; 2] = [1.0, 1.2];

/// A named attachment point on an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    #[serde(rename = "type")]
    pub slot_type: String,
    pub pos: [f64; 3],
    pub size: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub dimensions: Dimensions,
    pub slots: Vec<Slot>,
    pub seed: u64,
}

impl AssetRecord {
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }
}

/// First [`ASSET_ID_LEN`] hex characters of the SHA-256 of `data`.
pub fn content_id(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut id = hex::encode(hasher.finalize());
    id.truncate(ASSET_ID_LEN);
    id
}

/// Identifier of the building generated from `spec`.
pub fn asset_id(spec: &BuildingSpec) -> Result<String> {
    Ok(content_id(spec.to_json()?.as_bytes()))
}

/// A single straight wall with one window slot at its golden point.
///
/// The slot position draws from the `wall_slots` stream of `seed`.
pub fn engineered_wall(name: &str, length: f64, seed: u64, config: &LayoutConfig) -> Result<AssetRecord> {
    if !(length.is_finite() && length > 0.0) {
        return Err(EngineError::InvalidSpec(format!(
            "wall length must be positive, got {length}"
        )));
    }

    let body = BoxDescriptor::new(
        Point3::new(0.0, -config.wall_thickness / 2.0, 0.0),
        Point3::new(length, config.wall_thickness / 2.0, config.story_height),
        BoxPart::Wall {
            room_id: 0,
            side: Side::South,
        },
    );
    body.check_manifold(config.epsilon)?;

    let mut rng = stream_for(seed, "wall_slots");
    let x = golden_split_with(length, &mut rng, config.golden_jitter, config.grid_unit);

    let key = serde_json::to_vec(&(name, length, seed))?;
    Ok(AssetRecord {
        id: content_id(&key),
        name: name.to_string(),
        tags: vec!["arch_wall".into()],
        dimensions: Dimensions {
            width: length,
            height: config.story_height,
            depth: config.wall_thickness,
        },
        slots: vec![Slot {
            id: "main_opening".into(),
            slot_type: "window_opening".into(),
            pos: [x, 0.0, WALL_SLOT_Z],
            size: WALL_SLOT_SIZE,
        }],
        seed,
    })
}

/// Record for a whole generated building.
pub fn building_record(
    spec: &BuildingSpec,
    footprint: &Rect,
    total_height: f64,
    stairwell: Option<&Stairwell>,
    entrance: Option<&DoorOpening>,
) -> Result<AssetRecord> {
    let id = asset_id(spec)?;

    let mut slots = Vec::new();
    if let Some(s) = stairwell {
        let (cx, cy) = s.rect.center();
        slots.push(Slot {
            id: "stairwell".into(),
            slot_type: "stair_shaft".into(),
            pos: [cx, cy, 0.0],
            size: [s.rect.width(), s.rect.depth()],
        });
    }
    if let Some(door) = entrance {
        slots.push(Slot {
            id: "entrance".into(),
            slot_type: "door_opening".into(),
            pos: [door.center, footprint.min_y, 0.0],
            size: [door.width, door.height],
        });
    }

    Ok(AssetRecord {
        name: format!("building_{id}"),
        id,
        tags: vec![
            "building".into(),
            format!("floors_{}", spec.floors),
            format!("roof_{}", spec.roof),
        ],
        dimensions: Dimensions {
            width: footprint.width(),
            height: total_height,
            depth: footprint.depth(),
        },
        slots,
        seed: spec.seed,
    })
}

/// In-memory registry keyed by asset name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRegistry {
    assets: BTreeMap<String, AssetRecord>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the record previously stored under the name.
    pub fn register(&mut self, record: AssetRecord) -> Option<AssetRecord> {
        tracing::debug!(name = %record.name, id = %record.id, "registered asset");
        self.assets.insert(record.name.clone(), record)
    }

    pub fn get(&self, name: &str) -> Option<&AssetRecord> {
        self.assets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.assets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
