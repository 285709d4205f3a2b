// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Massform Geometry
//!
//! Reduces generated layouts to kernel-ready primitives: axis-aligned boxes
//! for wall pieces, slabs and stair steps, and planar faces for roofs. Boxes
//! are checked to be closed 2-manifolds before any kernel sees them.

pub mod boxes;
pub mod error;
pub mod kernel;
pub mod mesh;
pub mod roof;
pub mod stairs;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use boxes::{slab_boxes, wall_boxes, BoxDescriptor, BoxPart, Topology, BOX_FACES};
pub use error::{Error, Result};
pub use kernel::{describe_floor, BuildingDescription, GeometryKernel, MeshKernel};
pub use mesh::Mesh;
pub use roof::{roof_faces, roof_trig, RoofFace, RoofTrig, RoofType, DEFAULT_PITCH_DEG};
pub use stairs::stair_steps;
