// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for layout generation.

use crate::types::Side;

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a building layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The footprint cannot hold a room of minimum size beside the corridor.
    #[error("footprint {width}x{depth} too small: side zones need at least {min_room_size} m")]
    Sizing {
        width: f64,
        depth: f64,
        min_room_size: f64,
    },

    /// Degenerate input: zero-length spans, non-positive dimensions, misplaced holes.
    #[error("invalid geometry: {0}")]
    Geometry(String),

    /// Two openings on the same host wall overlap along the wall axis.
    #[error("overlapping openings on room {room_id} {side} wall at {first:.3} and {second:.3}")]
    OverlappingOpenings {
        room_id: u32,
        side: Side,
        first: f64,
        second: f64,
    },

    /// A configuration value is out of range.
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Shorthand for a [`Error::Geometry`] with a formatted message.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Error::Geometry(msg.into())
    }

    /// True for the degenerate-geometry family, including opening overlaps.
    pub fn is_geometry(&self) -> bool {
        matches!(self, Error::Geometry(_) | Error::OverlappingOpenings { .. })
    }
}
