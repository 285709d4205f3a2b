// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid snapping and golden-ratio proportioning.

use rand::Rng;

use crate::config::GRID_UNIT;

/// The golden ratio, (1 + sqrt 5) / 2.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Default jitter for [`golden_split`], as a fraction of the length.
pub const GOLDEN_JITTER: f64 = 0.02;

/// Round to the nearest multiple of [`GRID_UNIT`].
#[inline]
pub fn snap(value: f64) -> f64 {
    snap_to(value, GRID_UNIT)
}

/// Round to the nearest multiple of `unit`.
///
/// Ties round away from zero. Idempotent for any finite input.
#[inline]
pub fn snap_to(value: f64, unit: f64) -> f64 {
    (value / unit).round() * unit
}

/// Golden point along `length` with jitter of up to `±jitter * length`, unsnapped.
///
/// Consumes one draw from `rng`.
pub fn golden_point<R: Rng + ?Sized>(length: f64, rng: &mut R, jitter: f64) -> f64 {
    let base = length / PHI;
    let variation = (rng.gen::<f64>() - 0.5) * 2.0 * jitter * length;
    base + variation
}

/// `length / PHI`, jittered by up to ±2% of `length`, snapped to the grid.
///
/// Every call advances `rng`, but snapping can map consecutive draws to the
/// same grid point, so repeated splits of one length may be equal.
pub fn golden_split<R: Rng + ?Sized>(length: f64, rng: &mut R) -> f64 {
    snap(golden_point(length, rng, GOLDEN_JITTER))
}

/// [`golden_split`] with explicit jitter and grid unit.
pub fn golden_split_with<R: Rng + ?Sized>(length: f64, rng: &mut R, jitter: f64, unit: f64) -> f64 {
    snap_to(golden_point(length, rng, jitter), unit)
}
