// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor and ceiling slabs with an optional stairwell cutout.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::types::{Rect, Room, Slab, SlabKind};

/// Floor and ceiling slab for one story, in that order.
///
/// The footprint is the bounding rectangle of `rooms`. A supplied stairwell
/// rectangle is carried unchanged as the hole of both slabs and must lie
/// inside the footprint.
pub fn build_slabs(
    rooms: &[Room],
    floor_index: u32,
    stairwell_rect: Option<&Rect>,
    config: &LayoutConfig,
) -> Result<[Slab; 2]> {
    let footprint = Rect::bounding(rooms.iter().map(|r| &r.rect))
        .ok_or_else(|| Error::geometry("cannot build slabs without rooms"))?;

    if let Some(hole) = stairwell_rect {
        if !footprint.contains_rect(hole, config.epsilon) {
            return Err(Error::geometry(format!(
                "stairwell hole {hole:?} is outside slab footprint {footprint:?}"
            )));
        }
    }

    let floor_z = f64::from(floor_index) * config.story_height;
    let ceiling_z = floor_z + config.story_height - config.ceiling_thickness;
    let hole_rect = stairwell_rect.copied();

    Ok([
        Slab {
            rect: footprint,
            z: floor_z,
            thickness: config.floor_thickness,
            kind: SlabKind::Floor,
            hole_rect,
        },
        Slab {
            rect: footprint,
            z: ceiling_z,
            thickness: config.ceiling_thickness,
            kind: SlabKind::Ceiling,
            hole_rect,
        },
    ])
}

/// Walkable slabs only (floors), for navigation mesh baking.
pub fn navmesh_slabs<'a>(slabs: impl IntoIterator<Item = &'a Slab>) -> Vec<Slab> {
    slabs
        .into_iter()
        .filter(|s| s.kind == SlabKind::Floor)
        .copied()
        .collect()
}
