// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One story, end to end: partition, openings, carved walls.

use serde::{Deserialize, Serialize};

use crate::carve::carve;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::floorplan::{generate_floorplan, Floorplan};
use crate::placement::place_openings;
use crate::slabs::build_slabs;
use crate::types::{Opening, Room, SegmentMap, Slab, Stairwell};
use crate::walls::extract_all;

/// Everything generated for a single story except its slabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub layout: Floorplan,
    pub openings: Vec<Opening>,
    /// Carved wall pieces for every room and the corridor.
    pub walls: SegmentMap,
}

impl FloorPlan {
    pub fn floor_index(&self) -> u32 {
        self.layout.floor_index
    }

    /// Floor and ceiling slabs for this story, cut for `stairwell` if given.
    pub fn with_slabs(&self, stairwell: Option<&Stairwell>, config: &LayoutConfig) -> Result<[Slab; 2]> {
        let spaces: Vec<Room> = self.spaces().collect();
        build_slabs(&spaces, self.floor_index(), stairwell.map(|s| &s.rect), config)
    }

    /// Rooms followed by the corridor viewed as a room.
    pub fn spaces(&self) -> impl Iterator<Item = Room> + '_ {
        self.layout
            .rooms
            .iter()
            .copied()
            .chain(std::iter::once(self.layout.corridor.as_room()))
    }

    pub fn wall_piece_count(&self) -> usize {
        self.walls.values().map(Vec::len).sum()
    }

    pub fn door_count(&self) -> usize {
        self.openings.iter().filter(|o| o.is_door()).count()
    }

    pub fn window_count(&self) -> usize {
        self.openings.len() - self.door_count()
    }
}

/// Generate, place openings on and carve the walls of one story.
pub fn plan_floor(
    width: f64,
    depth: f64,
    seed: u64,
    floor_index: u32,
    config: &LayoutConfig,
) -> Result<FloorPlan> {
    let layout = generate_floorplan(width, depth, seed, floor_index, config)?;
    let openings = place_openings(&layout, seed, config);

    let corridor = layout.corridor.as_room();
    let walls = extract_all(layout.rooms.iter().chain(std::iter::once(&corridor)), config);
    let walls = carve(&walls, &openings, config)?;

    tracing::debug!(
        floor = floor_index,
        rooms = layout.rooms.len(),
        openings = openings.len(),
        "planned floor"
    );

    Ok(FloorPlan {
        layout,
        openings,
        walls,
    })
}
