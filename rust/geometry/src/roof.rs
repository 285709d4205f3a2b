// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof descriptors as planar faces over the building footprint.
//!
//! Pitched roofs run their ridge along the footprint's longer axis and rise
//! across the shorter span.

use std::fmt;
use std::str::FromStr;

use massform_core::Rect;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Pitch used when none is given, in degrees.
pub const DEFAULT_PITCH_DEG: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofType {
    #[default]
    Flat,
    Gabled,
    Hip,
    Shed,
}

impl RoofType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoofType::Flat => "flat",
            RoofType::Gabled => "gabled",
            RoofType::Hip => "hip",
            RoofType::Shed => "shed",
        }
    }
}

impl fmt::Display for RoofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoofType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(RoofType::Flat),
            "gabled" => Ok(RoofType::Gabled),
            "hip" => Ok(RoofType::Hip),
            "shed" => Ok(RoofType::Shed),
            other => Err(Error::InvalidRoof(format!("unknown roof type '{other}'"))),
        }
    }
}

/// Ridge rise and rafter length for a symmetric pitched roof.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofTrig {
    pub ridge_height: f64,
    pub slope_length: f64,
    pub pitch_deg: f64,
}

/// Trigonometry of a symmetric roof spanning `width` at `pitch_deg`.
pub fn roof_trig(width: f64, pitch_deg: f64) -> Result<RoofTrig> {
    if !(width.is_finite() && width > 0.0) {
        return Err(Error::InvalidRoof(format!("span must be positive, got {width}")));
    }
    if !(pitch_deg > 0.0 && pitch_deg < 90.0) {
        return Err(Error::InvalidRoof(format!(
            "pitch must be in (0, 90) degrees, got {pitch_deg}"
        )));
    }
    let pitch = pitch_deg.to_radians();
    let half = width / 2.0;
    Ok(RoofTrig {
        ridge_height: half * pitch.tan(),
        slope_length: half / pitch.cos(),
        pitch_deg,
    })
}

/// One planar polygon of the roof shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofFace {
    pub vertices: SmallVec<[Point3<f64>; 4]>,
}

impl RoofFace {
    /// Unnormalized normal from the first three vertices.
    pub fn normal(&self) -> Vector3<f64> {
        let v = &self.vertices;
        (v[1] - v[0]).cross(&(v[2] - v[0]))
    }

    /// True when every vertex lies on the plane of the first three.
    pub fn is_planar(&self, eps: f64) -> bool {
        let n = self.normal();
        let len = n.norm();
        if len <= eps {
            return false;
        }
        let n = n / len;
        self.vertices
            .iter()
            .all(|p| (p - self.vertices[0]).dot(&n).abs() <= eps)
    }

    pub fn max_z(&self) -> f64 {
        self.vertices
            .iter()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Plan frame with `u` along the ridge and `v` across the span.
struct Frame {
    ridge_along_x: bool,
    base_z: f64,
}

impl Frame {
    fn point(&self, u: f64, v: f64, rise: f64) -> Point3<f64> {
        if self.ridge_along_x {
            Point3::new(u, v, self.base_z + rise)
        } else {
            Point3::new(v, u, self.base_z + rise)
        }
    }

    fn face<const N: usize>(&self, corners: [(f64, f64, f64); N]) -> RoofFace {
        RoofFace {
            vertices: corners
                .iter()
                .map(|&(u, v, rise)| self.point(u, v, rise))
                .collect(),
        }
    }
}

/// Faces of a roof of `roof_type` sitting on `footprint` at `base_z`.
pub fn roof_faces(
    footprint: &Rect,
    base_z: f64,
    roof_type: RoofType,
    pitch_deg: f64,
) -> Result<Vec<RoofFace>> {
    let ridge_along_x = footprint.width() >= footprint.depth();
    let frame = Frame {
        ridge_along_x,
        base_z,
    };
    let ((u0, u1), (v0, v1)) = if ridge_along_x {
        ((footprint.min_x, footprint.max_x), (footprint.min_y, footprint.max_y))
    } else {
        ((footprint.min_y, footprint.max_y), (footprint.min_x, footprint.max_x))
    };
    let span = v1 - v0;
    let vm = (v0 + v1) / 2.0;

    let faces = match roof_type {
        RoofType::Flat => vec![frame.face([(u0, v0, 0.0), (u1, v0, 0.0), (u1, v1, 0.0), (u0, v1, 0.0)])],
        RoofType::Gabled => {
            let h = roof_trig(span, pitch_deg)?.ridge_height;
            vec![
                frame.face([(u0, v0, 0.0), (u1, v0, 0.0), (u1, vm, h), (u0, vm, h)]),
                frame.face([(u0, vm, h), (u1, vm, h), (u1, v1, 0.0), (u0, v1, 0.0)]),
                frame.face([(u0, v0, 0.0), (u0, vm, h), (u0, v1, 0.0)]),
                frame.face([(u1, v0, 0.0), (u1, v1, 0.0), (u1, vm, h)]),
            ]
        }
        RoofType::Hip => {
            let h = roof_trig(span, pitch_deg)?.ridge_height;
            let inset = span / 2.0;
            let (r0, r1) = (u0 + inset, u1 - inset);
            if r1 - r0 <= f64::EPSILON {
                let um = (u0 + u1) / 2.0;
                vec![
                    frame.face([(u0, v0, 0.0), (u1, v0, 0.0), (um, vm, h)]),
                    frame.face([(u1, v0, 0.0), (u1, v1, 0.0), (um, vm, h)]),
                    frame.face([(u1, v1, 0.0), (u0, v1, 0.0), (um, vm, h)]),
                    frame.face([(u0, v1, 0.0), (u0, v0, 0.0), (um, vm, h)]),
                ]
            } else {
                vec![
                    frame.face([(u0, v0, 0.0), (u1, v0, 0.0), (r1, vm, h), (r0, vm, h)]),
                    frame.face([(r0, vm, h), (r1, vm, h), (u1, v1, 0.0), (u0, v1, 0.0)]),
                    frame.face([(u0, v0, 0.0), (r0, vm, h), (u0, v1, 0.0)]),
                    frame.face([(u1, v0, 0.0), (u1, v1, 0.0), (r1, vm, h)]),
                ]
            }
        }
        RoofType::Shed => {
            // Single slope over the whole span: rise = span * tan(pitch).
            let h = 2.0 * roof_trig(span, pitch_deg)?.ridge_height;
            vec![
                frame.face([(u0, v0, 0.0), (u1, v0, 0.0), (u1, v1, h), (u0, v1, h)]),
                frame.face([(u0, v1, 0.0), (u0, v1, h), (u1, v1, h), (u1, v1, 0.0)]),
                frame.face([(u0, v0, 0.0), (u0, v1, h), (u0, v1, 0.0)]),
                frame.face([(u1, v0, 0.0), (u1, v1, 0.0), (u1, v1, h)]),
            ]
        }
    };

    tracing::debug!(roof = %roof_type, faces = faces.len(), base_z, "described roof");
    Ok(faces)
}
