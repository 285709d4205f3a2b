// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point3, Vector3};

use crate::boxes::{BoxDescriptor, BOX_FACES};

/// Triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions
            .extend([position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend([normal.x as f32, normal.y as f32, normal.z as f32]);
    }

    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend([i0, i1, i2]);
    }

    /// Fan-triangulate a convex planar polygon, wound to face `outward`.
    ///
    /// Vertices are duplicated per polygon so each face keeps a flat normal.
    pub fn add_polygon(&mut self, points: &[Point3<f64>], outward: Vector3<f64>) {
        if points.len() < 3 {
            return;
        }
        let normal = (points[1] - points[0]).cross(&(points[2] - points[0]));
        let flip = normal.dot(&outward) < 0.0;
        let unit = outward.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z);

        let base = self.vertex_count() as u32;
        for p in points {
            self.add_vertex(*p, unit);
        }
        for k in 1..points.len() as u32 - 1 {
            if flip {
                self.add_triangle(base, base + k + 1, base + k);
            } else {
                self.add_triangle(base, base + k, base + k + 1);
            }
        }
    }

    /// Six outward-facing quads, twelve triangles.
    pub fn add_box(&mut self, descriptor: &BoxDescriptor) {
        let corners = descriptor.corners();
        let outward = [
            -Vector3::z(),
            Vector3::z(),
            -Vector3::y(),
            Vector3::x(),
            Vector3::y(),
            -Vector3::x(),
        ];
        for (face, normal) in BOX_FACES.iter().zip(outward) {
            let quad = face.map(|i| corners[i]);
            self.add_polygon(&quad, normal);
        }
    }

    /// Merge another mesh into this one
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }
        let vertex_offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds (min, max); the origin for an empty mesh.
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        self.positions.chunks_exact(3).for_each(|chunk| {
            min.x = min.x.min(chunk[0]);
            min.y = min.y.min(chunk[1]);
            min.z = min.z.min(chunk[2]);
            max.x = max.x.max(chunk[0]);
            max.y = max.y.max(chunk[1]);
            max.z = max.z.max(chunk[2]);
        });
        (min, max)
    }
}
