// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for building generation.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine error types.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid building spec: {0}")]
    InvalidSpec(String),

    #[error("Layout error: {0}")]
    Layout(#[from] massform_core::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] massform_geometry::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Structured error handed to the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl EngineError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        use massform_core::Error as Core;
        use massform_geometry::Error as Geom;

        match self {
            EngineError::InvalidSpec(_) => "INVALID_SPEC",
            EngineError::Layout(Core::Sizing { .. }) => "SIZING_ERROR",
            EngineError::Layout(Core::InvalidConfig(_)) => "INVALID_CONFIG",
            EngineError::Layout(_) => "GEOMETRY_ERROR",
            EngineError::Geometry(Geom::Manifold { .. }) => "MANIFOLD_ERROR",
            EngineError::Geometry(Geom::Core(Core::Sizing { .. })) => "SIZING_ERROR",
            EngineError::Geometry(Geom::Kernel(_)) => "KERNEL_ERROR",
            EngineError::Geometry(_) => "GEOMETRY_ERROR",
            EngineError::ThreadPool(_) => "THREAD_POOL_ERROR",
            EngineError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for EngineError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        EngineError::ThreadPool(err.to_string())
    }
}
