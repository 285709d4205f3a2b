// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout invariants checked across a spread of seeds and footprints.

use approx::assert_abs_diff_eq;
use massform_core::{
    generate_floorplan, place_stairwell, plan_floor, snap, solid_length, Corridor, LayoutConfig,
    Rect, SlabKind,
};

const FOOTPRINTS: [(f64, f64); 4] = [(20.0, 16.0), (24.0, 20.0), (32.5, 18.25), (40.0, 40.0)];
const SEEDS: [u64; 5] = [0, 1, 42, 1337, u64::MAX];

fn on_grid(v: f64) -> bool {
    (snap(v) - v).abs() < 1e-9
}

#[test]
fn partitions_tile_without_overlap() {
    let config = LayoutConfig::default();
    for &(w, d) in &FOOTPRINTS {
        for &seed in &SEEDS {
            let plan = generate_floorplan(w, d, seed, 0, &config).unwrap();
            let rects: Vec<&Rect> = plan.all_rects().collect();

            let area: f64 = rects.iter().map(|r| r.area()).sum();
            assert_abs_diff_eq!(area, w * d, epsilon = 1e-6);

            for (i, a) in rects.iter().enumerate() {
                for b in &rects[i + 1..] {
                    assert!(a.intersection_area(b) < config.epsilon);
                }
                for v in [a.min_x, a.min_y, a.max_x, a.max_y] {
                    assert!(on_grid(v), "{v} off grid for {w}x{d} seed {seed}");
                }
            }
            for room in &plan.rooms {
                assert!(room.rect.width() >= config.min_room_size - config.epsilon);
                assert!(room.rect.depth() >= config.min_room_size - config.epsilon);
            }
        }
    }
}

#[test]
fn corridor_snaps_from_centered_position() {
    let config = LayoutConfig::default();
    let plan = generate_floorplan(20.0, 16.0, 42, 0, &config).unwrap();
    assert_eq!(plan.corridor.rect.min_x, 9.0);
    assert_eq!(plan.corridor.rect.max_x, 10.75);
}

#[test]
fn floor_generation_order_does_not_matter() {
    let config = LayoutConfig::default();
    let forward: Vec<_> = (0..4)
        .map(|i| plan_floor(24.0, 20.0, 9, i, &config).unwrap())
        .collect();
    let mut backward: Vec<_> = (0..4)
        .rev()
        .map(|i| plan_floor(24.0, 20.0, 9, i, &config).unwrap())
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn stairwell_hole_is_identical_on_every_story() {
    let config = LayoutConfig::default();
    let floors = 5;
    let ground = plan_floor(24.0, 20.0, 3, 0, &config).unwrap();
    let stairwell = place_stairwell(Some(&ground.layout.corridor), floors, &config)
        .unwrap()
        .unwrap();
    assert!(ground.layout.corridor.rect.contains_rect(&stairwell.rect, config.epsilon));

    let mut holes = Vec::new();
    for i in 0..floors {
        let floor = plan_floor(24.0, 20.0, 3, i, &config).unwrap();
        for slab in floor.with_slabs(Some(&stairwell), &config).unwrap() {
            assert!(slab.rect.contains_rect(&stairwell.rect, config.epsilon));
            if slab.kind == SlabKind::Floor {
                assert_abs_diff_eq!(slab.z, f64::from(i) * config.story_height);
            }
            holes.push(slab.hole_rect);
        }
    }
    assert!(holes.iter().all(|h| *h == Some(stairwell.rect)));
}

#[test]
fn carving_conserves_solid_wall_length() {
    let config = LayoutConfig::default();
    for &seed in &SEEDS {
        let floor = plan_floor(32.5, 18.25, seed, 0, &config).unwrap();
        for (&room_id, pieces) in &floor.walls {
            let space = floor.spaces().find(|r| r.id == room_id).unwrap();
            let perimeter = 2.0 * (space.rect.width() + space.rect.depth());
            let cut: f64 = floor
                .openings
                .iter()
                .filter(|o| o.room_id() == room_id)
                .map(|o| o.width())
                .sum();
            assert_abs_diff_eq!(solid_length(pieces), perimeter - cut, epsilon = 1e-6);
        }
    }
}

#[test]
fn corridor_has_no_windows_by_default() {
    let config = LayoutConfig::default();
    for &seed in &SEEDS {
        let floor = plan_floor(40.0, 40.0, seed, 1, &config).unwrap();
        assert!(floor
            .openings
            .iter()
            .filter(|o| o.room_id() == Corridor::ID)
            .all(|o| o.is_door()));
    }
}

#[test]
fn plan_serializes_to_json() {
    let config = LayoutConfig::default();
    let floor = plan_floor(20.0, 16.0, 42, 0, &config).unwrap();
    let json = serde_json::to_string(&floor).unwrap();
    assert!(json.contains("\"type\":\"door\""));
}
