// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Massform Engine
//!
//! Building-level entry point. A [`BuildingSpec`] goes in; a
//! [`GeneratedBuilding`] comes out, holding every story's layout, the slabs,
//! the shared stairwell, the kernel-ready [`BuildingDescription`] and an
//! [`AssetRecord`] for the registry.
//!
//! Stories are planned independently on a rayon pool. The stairwell is
//! placed once from the ground floor's corridor and its rectangle is cut
//! into every story's slabs unchanged.
//!
//! ```rust,ignore
//! use massform_engine::{generate_building, BuildingSpec, EngineConfig};
//!
//! let building = generate_building(&BuildingSpec::new(20.0, 16.0, 3, 42), &EngineConfig::default())?;
//! println!("{:?}", building.summary());
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod spec;

use massform_core::{
    navmesh_slabs, place_stairwell, plan_floor, Corridor, DoorOpening, FloorPlan, Opening, Side,
    Slab, Stairwell,
};
use massform_geometry::{describe_floor, BuildingDescription, GeometryKernel, Mesh, MeshKernel, RoofFace};
use rayon::prelude::*;
use serde::Serialize;

pub use config::EngineConfig;
pub use error::{EngineError, ErrorResponse, Result};
pub use registry::{
    asset_id, building_record, content_id, engineered_wall, AssetRecord, AssetRegistry, Dimensions,
    Slot,
};
pub use spec::BuildingSpec;

/// Everything generated for one building.
#[derive(Debug, Clone)]
pub struct GeneratedBuilding {
    pub spec: BuildingSpec,
    pub floors: Vec<FloorPlan>,
    /// Floor and ceiling slab of each story, in story order.
    pub slabs: Vec<Slab>,
    pub stairwell: Option<Stairwell>,
    pub description: BuildingDescription,
    pub record: AssetRecord,
    /// Tolerance the layout was generated with.
    pub epsilon: f64,
}

/// Counts reported back to the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub asset_id: String,
    pub floors: usize,
    pub rooms: usize,
    pub wall_pieces: usize,
    pub doors: usize,
    pub windows: usize,
    pub slabs: usize,
    pub boxes: usize,
    pub roof_faces: usize,
}

impl GeneratedBuilding {
    pub fn asset_id(&self) -> &str {
        &self.record.id
    }

    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            asset_id: self.record.id.clone(),
            floors: self.floors.len(),
            rooms: self.floors.iter().map(|f| f.layout.rooms.len()).sum(),
            wall_pieces: self.floors.iter().map(FloorPlan::wall_piece_count).sum(),
            doors: self.floors.iter().map(FloorPlan::door_count).sum(),
            windows: self.floors.iter().map(FloorPlan::window_count).sum(),
            slabs: self.slabs.len(),
            boxes: self.description.boxes.len(),
            roof_faces: self.description.roof.len(),
        }
    }

    /// Walkable floor slabs of every story.
    pub fn navmesh(&self) -> Vec<Slab> {
        navmesh_slabs(&self.slabs)
    }

    /// Hand the description to a kernel.
    pub fn build_with<K: GeometryKernel>(&self, kernel: K) -> Result<K::Output> {
        Ok(self.description.build(kernel, self.epsilon)?)
    }

    /// Triangulate with the built-in mesher.
    pub fn mesh(&self) -> Result<Mesh> {
        self.build_with(MeshKernel::new())
    }
}

/// Generate one building.
///
/// With [`EngineConfig::parallel_floors`] set, stories are planned on a pool
/// of [`EngineConfig::worker_threads`] threads; the result is identical to a
/// sequential run.
pub fn generate_building(spec: &BuildingSpec, config: &EngineConfig) -> Result<GeneratedBuilding> {
    if config.parallel_floors && spec.floors > 1 {
        let pool = build_pool(config)?;
        pool.install(|| generate_with(spec, config, true))
    } else {
        generate_with(spec, config, false)
    }
}

/// Generate several buildings, one result per spec in input order.
pub fn generate_batch(specs: &[BuildingSpec], config: &EngineConfig) -> Result<Vec<Result<GeneratedBuilding>>> {
    tracing::info!(buildings = specs.len(), "starting batch");
    if !config.parallel_floors {
        return Ok(specs.iter().map(|s| generate_with(s, config, false)).collect());
    }
    let pool = build_pool(config)?;
    Ok(pool.install(|| {
        specs
            .par_iter()
            .map(|s| generate_with(s, config, true))
            .collect()
    }))
}

/// Success summary or a structured error, for the orchestration layer.
pub fn summarize(spec: &BuildingSpec, config: &EngineConfig) -> std::result::Result<BuildSummary, ErrorResponse> {
    generate_building(spec, config)
        .map(|b| b.summary())
        .map_err(|e| {
            tracing::warn!(code = e.code(), error = %e, "building generation failed");
            e.to_response()
        })
}

fn build_pool(config: &EngineConfig) -> Result<rayon::ThreadPool> {
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build()?)
}

fn generate_with(spec: &BuildingSpec, config: &EngineConfig, parallel: bool) -> Result<GeneratedBuilding> {
    spec.validate()?;
    let layout = &config.layout;
    layout.validate()?;

    let plan = |i: u32| {
        tracing::debug!(floor = i, "planning floor");
        plan_floor(spec.width, spec.depth, spec.seed, i, layout)
    };
    let floors: Vec<FloorPlan> = if parallel {
        (0..spec.floors).into_par_iter().map(plan).collect::<massform_core::Result<_>>()?
    } else {
        (0..spec.floors).map(plan).collect::<massform_core::Result<_>>()?
    };
    let ground = &floors[0];

    let stairwell = if spec.floors > 1 {
        place_stairwell(Some(&ground.layout.corridor), spec.floors, layout)?
    } else {
        None
    };

    let mut slabs = Vec::with_capacity(floors.len() * 2);
    let mut description = BuildingDescription::new();
    for floor in &floors {
        let story = floor.with_slabs(stairwell.as_ref(), layout)?;
        description.extend_boxes(describe_floor(floor, &story, layout));
        slabs.extend(story);
    }
    if let Some(s) = &stairwell {
        description.add_stairs(s, spec.floors, layout);
    }
    let footprint = ground.layout.footprint;
    description.add_roof(&footprint, spec.floors, spec.roof, config.roof_pitch_deg, layout)?;
    description.validate(layout.epsilon)?;

    let roof_top = description
        .roof
        .iter()
        .map(RoofFace::max_z)
        .fold(f64::from(spec.floors) * layout.story_height, f64::max);
    let record = building_record(
        spec,
        &footprint,
        roof_top,
        stairwell.as_ref(),
        entrance(ground),
    )?;

    tracing::info!(
        id = %record.id,
        floors = spec.floors,
        seed = spec.seed,
        roof = %spec.roof,
        boxes = description.boxes.len(),
        "generated building"
    );

    Ok(GeneratedBuilding {
        spec: spec.clone(),
        floors,
        slabs,
        stairwell,
        description,
        record,
        epsilon: layout.epsilon,
    })
}

fn entrance(ground: &FloorPlan) -> Option<&DoorOpening> {
    ground.openings.iter().find_map(|o| match o {
        Opening::Door(d) if d.room_id == Corridor::ID && d.side == Side::South => Some(d),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_story_has_no_stairwell() {
        let building = generate_building(&BuildingSpec::new(20.0, 16.0, 1, 3), &EngineConfig::sequential()).unwrap();
        assert!(building.stairwell.is_none());
        assert!(building.slabs.iter().all(|s| s.hole_rect.is_none()));
        assert!(building.record.slot("stairwell").is_none());
        assert!(building.record.slot("entrance").is_some());
    }

    #[test]
    fn summary_counts_match_the_building() {
        let building = generate_building(&BuildingSpec::new(24.0, 20.0, 3, 5), &EngineConfig::sequential()).unwrap();
        let summary = building.summary();
        assert_eq!(summary.floors, 3);
        assert_eq!(summary.slabs, 6);
        assert_eq!(summary.asset_id, building.asset_id());
        assert_eq!(summary.asset_id.len(), registry::ASSET_ID_LEN);
        assert_eq!(building.navmesh().len(), 3);
    }

    #[test]
    fn invalid_spec_is_reported_with_a_code() {
        let err = summarize(&BuildingSpec::new(20.0, 16.0, 0, 1), &EngineConfig::sequential()).unwrap_err();
        assert_eq!(err.code, "INVALID_SPEC");

        let err = summarize(&BuildingSpec::new(5.0, 16.0, 2, 1), &EngineConfig::sequential()).unwrap_err();
        assert_eq!(err.code, "SIZING_ERROR");
    }
}
