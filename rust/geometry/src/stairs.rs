// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight stair runs inside the stairwell shaft.

use massform_core::{LayoutConfig, Stairwell};
use nalgebra::Point3;

use crate::boxes::{BoxDescriptor, BoxPart};

/// One box per step for every story pair the stairwell connects.
///
/// Steps rise along the shaft's longer plan axis, each one riser tall, and
/// the run of one flight covers the full shaft length. `floors` caps the
/// stairwell's own range.
pub fn stair_steps(stairwell: &Stairwell, floors: u32, config: &LayoutConfig) -> Vec<BoxDescriptor> {
    let last = stairwell.floor_to.min(floors.saturating_sub(1));
    if last <= stairwell.floor_from {
        return Vec::new();
    }

    let r = &stairwell.rect;
    let steps = config.stair_steps_per_floor.max(1);
    let riser = config.story_height / f64::from(steps);
    let along_y = r.depth() >= r.width();
    let length = if along_y { r.depth() } else { r.width() };
    let run = length / f64::from(steps);

    let mut boxes = Vec::with_capacity(((last - stairwell.floor_from) * steps) as usize);
    for floor in stairwell.floor_from..last {
        let base_z = f64::from(floor) * config.story_height;
        for index in 0..steps {
            let z0 = base_z + f64::from(index) * riser;
            let t0 = f64::from(index) * run;
            let (min, max) = if along_y {
                (
                    Point3::new(r.min_x, r.min_y + t0, z0),
                    Point3::new(r.max_x, r.min_y + t0 + run, z0 + riser),
                )
            } else {
                (
                    Point3::new(r.min_x + t0, r.min_y, z0),
                    Point3::new(r.min_x + t0 + run, r.max_y, z0 + riser),
                )
            };
            boxes.push(BoxDescriptor::new(min, max, BoxPart::Step { floor, index }));
        }
    }
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use massform_core::{Rect, StairType};

    fn stairwell(floor_to: u32) -> Stairwell {
        Stairwell {
            rect: Rect::new(9.0, 12.0, 10.75, 16.0).unwrap(),
            floor_from: 0,
            floor_to,
            stair_type: StairType::Straight,
        }
    }

    #[test]
    fn one_flight_per_story_pair() {
        let config = LayoutConfig::default();
        let steps = stair_steps(&stairwell(3), 4, &config);
        assert_eq!(steps.len(), 3 * 16);

        let top = steps.last().unwrap();
        assert_abs_diff_eq!(top.max.z, 9.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top.max.y, 16.0, epsilon = 1e-9);
        assert!(steps.iter().all(|b| b.check_manifold(1e-6).is_ok()));
    }

    #[test]
    fn steps_stay_inside_the_shaft() {
        let config = LayoutConfig::default();
        let s = stairwell(1);
        for b in stair_steps(&s, 2, &config) {
            assert!(b.min.x >= s.rect.min_x && b.max.x <= s.rect.max_x);
            assert!(b.min.y >= s.rect.min_y - 1e-9 && b.max.y <= s.rect.max_y + 1e-9);
        }
    }

    #[test]
    fn single_story_has_no_steps() {
        let config = LayoutConfig::default();
        assert!(stair_steps(&stairwell(0), 1, &config).is_empty());
        // Building height caps the shaft's range.
        assert_eq!(stair_steps(&stairwell(5), 2, &config).len(), 16);
    }
}
