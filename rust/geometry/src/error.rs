// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while describing or building geometry
#[derive(Error, Debug)]
pub enum Error {
    /// A closed descriptor does not satisfy V - E + F = 2.
    #[error("Non-manifold {part}: V - E + F = {euler} (V={vertices}, E={edges}, F={faces})")]
    Manifold {
        part: String,
        vertices: usize,
        edges: usize,
        faces: usize,
        euler: i64,
    },

    #[error("Invalid roof: {0}")]
    InvalidRoof(String),

    /// Opaque failure reported by a kernel implementation.
    #[error("Geometry kernel failed: {0}")]
    Kernel(String),

    #[error("Layout error: {0}")]
    Core(#[from] massform_core::Error),
}

impl Error {
    pub fn kernel(msg: impl Into<String>) -> Self {
        Error::Kernel(msg.into())
    }
}
