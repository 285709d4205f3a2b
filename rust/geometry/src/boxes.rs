// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned box decomposition of wall pieces and slabs.
//!
//! A plain wall piece is one full-height box. A window piece keeps the wall
//! below the sill and above the head. A door lintel piece keeps the wall
//! above the door head. A slab with a hole becomes up to four boxes framing
//! the hole.

use massform_core::{Opening, SegmentKind, Side, Slab, SlabKind, WallSegment};
use nalgebra::Point3;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::error::{Error, Result};

/// Vertex loops of the six box faces, indexing [`BoxDescriptor::corners`].
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // bottom
    [4, 5, 6, 7], // top
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// What a box was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "part", rename_all = "snake_case")]
pub enum BoxPart {
    Wall { room_id: u32, side: Side },
    BelowSill { room_id: u32, side: Side },
    AboveWindow { room_id: u32, side: Side },
    Lintel { room_id: u32, side: Side },
    Slab { kind: SlabKind },
    Step { floor: u32, index: u32 },
}

/// A closed axis-aligned box, ready for a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDescriptor {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
    pub part: BoxPart,
}

/// Vertex, edge and face counts of a descriptor after welding coincident corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

impl Topology {
    #[inline]
    pub fn euler(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

impl BoxDescriptor {
    pub fn new(min: Point3<f64>, max: Point3<f64>, part: BoxPart) -> Self {
        Self { min, max, part }
    }

    /// Corners, bottom ring then top ring, counter-clockwise seen from above.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, b.z),
            Point3::new(a.x, b.y, b.z),
        ]
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    pub fn volume(&self) -> f64 {
        self.size().iter().product()
    }

    /// Count welded vertices, distinct edges and non-degenerate faces.
    ///
    /// Corners closer than `eps` are merged first, so a collapsed box loses
    /// vertices and faces and no longer has Euler characteristic 2.
    pub fn topology(&self, eps: f64) -> Topology {
        let quantize = |v: f64| (v / eps).round() as i64;
        let mut welded: FxHashMap<[i64; 3], usize> = FxHashMap::default();
        let ids: SmallVec<[usize; 8]> = self
            .corners()
            .iter()
            .map(|p| {
                let key = [quantize(p.x), quantize(p.y), quantize(p.z)];
                let next = welded.len();
                *welded.entry(key).or_insert(next)
            })
            .collect();

        let mut edges: FxHashSet<(usize, usize)> = FxHashSet::default();
        let mut faces: FxHashSet<SmallVec<[usize; 4]>> = FxHashSet::default();
        for face in BOX_FACES {
            let ring: SmallVec<[usize; 4]> = face.iter().map(|&i| ids[i]).collect();
            for k in 0..ring.len() {
                let (a, b) = (ring[k], ring[(k + 1) % ring.len()]);
                if a != b {
                    edges.insert((a.min(b), a.max(b)));
                }
            }
            let mut distinct = ring.clone();
            distinct.sort_unstable();
            distinct.dedup();
            if distinct.len() >= 3 {
                faces.insert(distinct);
            }
        }

        Topology {
            vertices: welded.len(),
            edges: edges.len(),
            faces: faces.len(),
        }
    }

    /// Fail with [`Error::Manifold`] unless V - E + F = 2.
    pub fn check_manifold(&self, eps: f64) -> Result<()> {
        let t = self.topology(eps);
        if t.euler() == 2 {
            return Ok(());
        }
        Err(Error::Manifold {
            part: format!("{:?}", self.part),
            vertices: t.vertices,
            edges: t.edges,
            faces: t.faces,
            euler: t.euler(),
        })
    }
}

/// Plan rectangle of a wall piece, thickened symmetrically about its line.
fn wall_plan(seg: &WallSegment) -> (f64, f64, f64, f64) {
    let half = seg.thickness / 2.0;
    let (x_lo, x_hi) = (seg.x1.min(seg.x2), seg.x1.max(seg.x2));
    let (y_lo, y_hi) = (seg.y1.min(seg.y2), seg.y1.max(seg.y2));
    if seg.side.is_horizontal() {
        (x_lo, y_lo - half, x_hi, y_hi + half)
    } else {
        (x_lo - half, y_lo, x_hi + half, y_hi)
    }
}

/// Boxes for one carved wall piece standing on `base_z`.
///
/// Bands thinner than `eps` are omitted, so a door without lintel space or a
/// window with a zero sill contributes fewer boxes.
pub fn wall_boxes(seg: &WallSegment, base_z: f64, eps: f64) -> SmallVec<[BoxDescriptor; 2]> {
    let (x0, y0, x1, y1) = wall_plan(seg);
    let (room_id, side) = (seg.room_id, seg.side);
    let top = base_z + seg.height;
    let band = |lo: f64, hi: f64, part: BoxPart| {
        (hi - lo > eps).then(|| {
            BoxDescriptor::new(Point3::new(x0, y0, lo), Point3::new(x1, y1, hi), part)
        })
    };

    let bands: SmallVec<[Option<BoxDescriptor>; 2]> = match seg.kind {
        SegmentKind::Plain => smallvec![band(base_z, top, BoxPart::Wall { room_id, side })],
        SegmentKind::WithOpening(Opening::Window(w)) => {
            let sill = base_z + w.sill_height;
            let head = (sill + w.height).min(top);
            smallvec![
                band(base_z, sill, BoxPart::BelowSill { room_id, side }),
                band(head, top, BoxPart::AboveWindow { room_id, side }),
            ]
        }
        SegmentKind::WithOpening(Opening::Door(d)) => {
            let head = (base_z + d.height).min(top);
            smallvec![band(head, top, BoxPart::Lintel { room_id, side })]
        }
    };
    bands.into_iter().flatten().collect()
}

/// Boxes for one slab; a hole is framed by full-depth strips on either side
/// and middle strips before and after it.
pub fn slab_boxes(slab: &Slab, eps: f64) -> SmallVec<[BoxDescriptor; 4]> {
    let r = &slab.rect;
    let (z0, z1) = (slab.z, slab.z + slab.thickness);
    let part = BoxPart::Slab { kind: slab.kind };
    let strip = |min_x: f64, min_y: f64, max_x: f64, max_y: f64| {
        (max_x - min_x > eps && max_y - min_y > eps).then(|| {
            BoxDescriptor::new(Point3::new(min_x, min_y, z0), Point3::new(max_x, max_y, z1), part)
        })
    };

    match &slab.hole_rect {
        None => strip(r.min_x, r.min_y, r.max_x, r.max_y).into_iter().collect(),
        Some(h) => [
            strip(r.min_x, r.min_y, h.min_x, r.max_y),
            strip(h.max_x, r.min_y, r.max_x, r.max_y),
            strip(h.min_x, h.max_y, h.max_x, r.max_y),
            strip(h.min_x, r.min_y, h.max_x, h.min_y),
        ]
        .into_iter()
        .flatten()
        .collect(),
    }
}
