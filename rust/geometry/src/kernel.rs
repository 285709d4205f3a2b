// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The geometry-kernel boundary.
//!
//! Layout output is reduced to a [`BuildingDescription`]: closed boxes plus
//! planar roof faces. Any kernel that can consume those two primitives
//! implements [`GeometryKernel`]; [`MeshKernel`] is the built-in triangle
//! mesher.

use massform_core::{FloorPlan, LayoutConfig, Rect, Slab, Stairwell};
use serde::{Deserialize, Serialize};

use crate::boxes::{slab_boxes, wall_boxes, BoxDescriptor};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::roof::{roof_faces, RoofFace, RoofType};
use crate::stairs::stair_steps;

/// A consumer of building primitives.
pub trait GeometryKernel {
    type Output;

    fn add_box(&mut self, descriptor: &BoxDescriptor) -> Result<()>;

    fn add_face(&mut self, face: &RoofFace) -> Result<()>;

    fn finish(self) -> Result<Self::Output>;
}

/// Triangulates every primitive into one [`Mesh`].
#[derive(Debug, Default)]
pub struct MeshKernel {
    mesh: Mesh,
}

impl MeshKernel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeometryKernel for MeshKernel {
    type Output = Mesh;

    fn add_box(&mut self, descriptor: &BoxDescriptor) -> Result<()> {
        self.mesh.add_box(descriptor);
        Ok(())
    }

    fn add_face(&mut self, face: &RoofFace) -> Result<()> {
        // Roof faces point up; vertical gable walls keep their own normal.
        let n = face.normal();
        let outward = if n.z.abs() < 1e-9 { n } else { n * n.z.signum() };
        self.mesh.add_polygon(&face.vertices, outward);
        Ok(())
    }

    fn finish(self) -> Result<Mesh> {
        Ok(self.mesh)
    }
}

/// Boxes for one story: carved walls standing on the floor elevation, then slabs.
pub fn describe_floor(floor: &FloorPlan, slabs: &[Slab], config: &LayoutConfig) -> Vec<BoxDescriptor> {
    let base_z = f64::from(floor.floor_index()) * config.story_height;
    let walls = floor
        .walls
        .values()
        .flatten()
        .flat_map(|seg| wall_boxes(seg, base_z, config.epsilon));
    let plates = slabs.iter().flat_map(|s| slab_boxes(s, config.epsilon));
    walls.chain(plates).collect()
}

/// Everything a kernel needs to build the final shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingDescription {
    pub boxes: Vec<BoxDescriptor>,
    pub roof: Vec<RoofFace>,
}

impl BuildingDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_boxes(&mut self, boxes: impl IntoIterator<Item = BoxDescriptor>) {
        self.boxes.extend(boxes);
    }

    pub fn add_stairs(&mut self, stairwell: &Stairwell, floors: u32, config: &LayoutConfig) {
        self.boxes.extend(stair_steps(stairwell, floors, config));
    }

    /// Roof on top of `floors` stories.
    pub fn add_roof(
        &mut self,
        footprint: &Rect,
        floors: u32,
        roof_type: RoofType,
        pitch_deg: f64,
        config: &LayoutConfig,
    ) -> Result<()> {
        let base_z = f64::from(floors) * config.story_height;
        self.roof = roof_faces(footprint, base_z, roof_type, pitch_deg)?;
        Ok(())
    }

    /// Every box must be a closed 2-manifold.
    pub fn validate(&self, eps: f64) -> Result<()> {
        self.boxes.iter().try_for_each(|b| b.check_manifold(eps))
    }

    /// Validate, then stream every primitive into `kernel`.
    pub fn build<K: GeometryKernel>(&self, mut kernel: K, eps: f64) -> Result<K::Output> {
        self.validate(eps)?;
        for b in &self.boxes {
            kernel.add_box(b)?;
        }
        for face in &self.roof {
            kernel.add_face(face)?;
        }
        tracing::debug!(boxes = self.boxes.len(), faces = self.roof.len(), "kernel build");
        kernel.finish()
    }

    pub fn solid_volume(&self) -> f64 {
        self.boxes.iter().map(BoxDescriptor::volume).sum()
    }
}
