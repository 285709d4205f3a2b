// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine configuration loaded from environment variables.

use massform_core::LayoutConfig;
use massform_geometry::DEFAULT_PITCH_DEG;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of worker threads for parallel floor generation.
    pub worker_threads: usize,
    /// Generate floors on the worker pool instead of sequentially.
    pub parallel_floors: bool,
    /// Pitch of gabled, hip and shed roofs, in degrees.
    pub roof_pitch_deg: f64,
    /// Layout parameters handed to every generator call.
    pub layout: LayoutConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            worker_threads: std::env::var("MASSFORM_WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get()),
            parallel_floors: std::env::var("MASSFORM_PARALLEL_FLOORS")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            roof_pitch_deg: std::env::var("MASSFORM_ROOF_PITCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PITCH_DEG),
            layout: LayoutConfig::default(),
        }
    }

    /// Same engine settings with a different layout.
    pub fn with_layout(self, layout: LayoutConfig) -> Self {
        Self { layout, ..self }
    }

    /// Sequential generation on the calling thread.
    pub fn sequential() -> Self {
        Self {
            worker_threads: 1,
            parallel_floors: false,
            ..Self::from_env()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = EngineConfig::default();
        assert!(config.worker_threads >= 1);
        assert!(config.roof_pitch_deg > 0.0 && config.roof_pitch_deg < 90.0);
        assert!(config.layout.validate().is_ok());
    }

    #[test]
    fn sequential_disables_the_pool() {
        let config = EngineConfig::sequential();
        assert_eq!(config.worker_threads, 1);
        assert!(!config.parallel_floors);
    }

    #[test]
    fn with_layout_keeps_engine_settings() {
        let layout = LayoutConfig {
            min_room_size: 4.0,
            ..Default::default()
        };
        let config = EngineConfig::sequential().with_layout(layout.clone());
        assert_eq!(config.layout, layout);
        assert!(!config.parallel_floors);
    }
}
