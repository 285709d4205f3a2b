// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end decomposition of a small multi-story layout.

use approx::assert_relative_eq;
use massform_core::{place_stairwell, plan_floor, LayoutConfig, SlabKind};
use massform_geometry::{
    describe_floor, slab_boxes, BoxPart, BuildingDescription, MeshKernel, RoofType,
    DEFAULT_PITCH_DEG,
};

const FLOORS: u32 = 3;

fn building(roof: RoofType) -> BuildingDescription {
    let config = LayoutConfig::default();
    let ground = plan_floor(24.0, 20.0, 11, 0, &config).unwrap();
    let stairwell = place_stairwell(Some(&ground.layout.corridor), FLOORS, &config)
        .unwrap()
        .unwrap();

    let mut description = BuildingDescription::new();
    for i in 0..FLOORS {
        let floor = plan_floor(24.0, 20.0, 11, i, &config).unwrap();
        let slabs = floor.with_slabs(Some(&stairwell), &config).unwrap();
        description.extend_boxes(describe_floor(&floor, &slabs, &config));
    }
    description.add_stairs(&stairwell, FLOORS, &config);
    description
        .add_roof(&ground.layout.footprint, FLOORS, roof, DEFAULT_PITCH_DEG, &config)
        .unwrap();
    description
}

#[test]
fn every_box_is_a_closed_manifold() {
    let description = building(RoofType::Hip);
    assert!(description.validate(1e-6).is_ok());
}

#[test]
fn stair_flights_connect_each_story_pair() {
    let config = LayoutConfig::default();
    let description = building(RoofType::Flat);
    let steps = description
        .boxes
        .iter()
        .filter(|b| matches!(b.part, BoxPart::Step { .. }))
        .count();
    assert_eq!(steps, (FLOORS as usize - 1) * config.stair_steps_per_floor as usize);
}

#[test]
fn slab_strips_exclude_the_stairwell_area() {
    let config = LayoutConfig::default();
    let floor = plan_floor(24.0, 20.0, 11, 1, &config).unwrap();
    let stairwell = place_stairwell(Some(&floor.layout.corridor), FLOORS, &config)
        .unwrap()
        .unwrap();
    for slab in floor.with_slabs(Some(&stairwell), &config).unwrap() {
        let volume: f64 = slab_boxes(&slab, config.epsilon).iter().map(|b| b.volume()).sum();
        let expected = (slab.rect.area() - stairwell.rect.area()) * slab.thickness;
        assert_relative_eq!(volume, expected, max_relative = 1e-9);
        if slab.kind == SlabKind::Ceiling {
            assert_relative_eq!(slab.z + slab.thickness, 2.0 * config.story_height, epsilon = 1e-9);
        }
    }
}

#[test]
fn mesh_spans_the_whole_building() {
    let config = LayoutConfig::default();
    let description = building(RoofType::Gabled);
    let mesh = description.build(MeshKernel::new(), config.epsilon).unwrap();
    let (min, max) = mesh.bounds();
    assert!(min.x <= 0.0 && min.y <= 0.0);
    assert!(f64::from(max.x) >= 24.0 && f64::from(max.y) >= 20.0);
    assert!(f64::from(max.z) > f64::from(FLOORS) * config.story_height);
}

#[test]
fn description_round_trips_through_json() {
    let description = building(RoofType::Shed);
    let json = serde_json::to_string(&description).unwrap();
    let back: BuildingDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(back.boxes.len(), description.boxes.len());
    assert_eq!(back.roof.len(), 4);
}
