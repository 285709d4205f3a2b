// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Massform Core
//!
//! Deterministic layout generation for procedural multi-story buildings.
//! Given a footprint, a seed and a [`LayoutConfig`], this crate produces
//! rooms, a corridor, carved wall segments, floor and ceiling slabs and a
//! vertically aligned stairwell. Geometry is 2D plus elevations; meshing is
//! left to a kernel downstream.
//!
//! ## Overview
//!
//! | Stage | Module | Entry point |
//! |-------|--------|-------------|
//! | Random streams | [`rng`] | [`stream_for`] |
//! | Grid and golden ratio | [`grid`] | [`snap`], [`golden_split`] |
//! | Partition | [`floorplan`] | [`generate_floorplan`] |
//! | Walls | [`walls`] | [`extract_walls`] |
//! | Openings | [`placement`], [`carve`] | [`place_openings`], [`carve()`] |
//! | Slabs | [`slabs`] | [`build_slabs`] |
//! | Stairwell | [`stairs`] | [`place_stairwell`] |
//! | Whole story | [`floor`] | [`plan_floor`] |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use massform_core::{plan_floor, place_stairwell, LayoutConfig};
//!
//! let config = LayoutConfig::default();
//! let floor = plan_floor(20.0, 16.0, 42, 0, &config)?;
//! let stairwell = place_stairwell(Some(&floor.layout.corridor), 3, &config)?;
//! let [floor_slab, ceiling] = floor.with_slabs(stairwell.as_ref(), &config)?;
//! ```
//!
//! ## Determinism
//!
//! Every random draw comes from a stream keyed by `(seed, subsystem)`.
//! Floors use separate streams, so they can be generated in any order or in
//! parallel with identical results.

pub mod carve;
pub mod config;
pub mod error;
pub mod floor;
pub mod floorplan;
pub mod grid;
pub mod placement;
pub mod rng;
pub mod slabs;
pub mod stairs;
pub mod types;
pub mod walls;

pub use carve::{carve, carve_segment, check_segment, solid_length};
pub use config::{LayoutConfig, EPSILON, GRID_UNIT};
pub use error::{Error, Result};
pub use floor::{plan_floor, FloorPlan};
pub use floorplan::{generate_floorplan, Floorplan};
pub use grid::{golden_point, golden_split, golden_split_with, snap, snap_to, GOLDEN_JITTER, PHI};
pub use placement::{place_doors, place_openings, place_windows, shared_edge, SharedEdge};
pub use rng::{stream_for, subsystem_seed, LayoutRng};
pub use slabs::{build_slabs, navmesh_slabs};
pub use stairs::{place_stairwell, stair_zone_start};
pub use types::{
    Corridor, DoorOpening, Opening, Rect, Room, SegmentKind, SegmentMap, Side, Slab, SlabKind,
    StairType, Stairwell, WallSegment, WindowOpening,
};
pub use walls::{extract_all, extract_walls, wall_for_side};
