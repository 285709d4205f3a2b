// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window placement heuristics.
//!
//! Doors connect every reachable room to the corridor: rooms touching the
//! corridor open onto it directly, the rest are reached breadth-first
//! through neighbouring rooms. A connecting door is recorded once per host
//! wall so both walls get carved. Windows go on exterior walls at a
//! jittered golden point.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::config::LayoutConfig;
use crate::floorplan::Floorplan;
use crate::grid::golden_split_with;
use crate::rng::{stream_for, windows_key};
use crate::stairs::stair_zone_start;
use crate::types::{DoorOpening, Opening, Rect, Room, Side, WindowOpening};

/// A shared edge between two spaces, seen from the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedEdge {
    /// Side of the first space the edge lies on.
    pub side: Side,
    pub lo: f64,
    pub hi: f64,
}

impl SharedEdge {
    pub fn length(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn midpoint(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }
}

/// Edge shared by `a` and `b`, if they touch along a segment longer than `eps`.
pub fn shared_edge(a: &Rect, b: &Rect, eps: f64) -> Option<SharedEdge> {
    let overlap = |lo_a: f64, hi_a: f64, lo_b: f64, hi_b: f64| {
        let lo = lo_a.max(lo_b);
        let hi = hi_a.min(hi_b);
        (hi - lo > eps).then_some((lo, hi))
    };

    let (side, span) = if (a.max_x - b.min_x).abs() <= eps {
        (Side::East, overlap(a.min_y, a.max_y, b.min_y, b.max_y))
    } else if (a.min_x - b.max_x).abs() <= eps {
        (Side::West, overlap(a.min_y, a.max_y, b.min_y, b.max_y))
    } else if (a.max_y - b.min_y).abs() <= eps {
        (Side::North, overlap(a.min_x, a.max_x, b.min_x, b.max_x))
    } else if (a.min_y - b.max_y).abs() <= eps {
        (Side::South, overlap(a.min_x, a.max_x, b.min_x, b.max_x))
    } else {
        return None;
    };
    span.map(|(lo, hi)| SharedEdge { side, lo, hi })
}

/// Doors connecting rooms to the corridor, plus the entrance on floor 0.
///
/// Corridor doors stay south of the stair zone (see [`stair_zone_start`]) so
/// that no upper-floor door opens onto the shaft. A room whose corridor edge
/// lies wholly in the zone is reached through its neighbours instead, and
/// only opens onto the zone when nothing else connects it.
pub fn place_doors(plan: &Floorplan, config: &LayoutConfig) -> Vec<DoorOpening> {
    let needed = config.door_width + 2.0 * config.opening_margin;
    let corridor = plan.corridor.as_room();
    let zone_start = stair_zone_start(&corridor.rect, config);

    let mut rooms: Vec<&Room> = plan.rooms.iter().collect();
    rooms.sort_by_key(|r| r.id);

    let mut doors = Vec::new();
    let mut connected: FxHashSet<u32> = FxHashSet::default();
    let mut queue = VecDeque::new();

    for room in &rooms {
        let edge = usable_edge(&room.rect, &corridor.rect, needed, config)
            .and_then(|e| below(e, zone_start, needed, config));
        if let Some(edge) = edge {
            push_door_pair(&mut doors, room, &corridor, edge, config);
            connected.insert(room.id);
            queue.push_back(**room);
        }
    }
    connect_neighbours(&rooms, &mut queue, &mut connected, &mut doors, needed, config);

    for room in &rooms {
        if connected.contains(&room.id) {
            continue;
        }
        if let Some(edge) = usable_edge(&room.rect, &corridor.rect, needed, config) {
            tracing::debug!(room = room.id, floor = plan.floor_index, "corridor door inside stair zone");
            push_door_pair(&mut doors, room, &corridor, edge, config);
            connected.insert(room.id);
            queue.push_back(**room);
            connect_neighbours(&rooms, &mut queue, &mut connected, &mut doors, needed, config);
        }
    }

    for room in &rooms {
        if !connected.contains(&room.id) {
            tracing::warn!(room = room.id, floor = plan.floor_index, "room has no usable door edge");
        }
    }

    if plan.floor_index == 0 {
        match entrance(plan, config) {
            Some(door) => doors.push(door),
            None => tracing::warn!("corridor too narrow for an entrance door"),
        }
    }

    doors
}

/// Windows on exterior walls, positioned by golden split.
///
/// Walls already hosting a door are skipped, as is the corridor unless
/// [`LayoutConfig::corridor_windows`] is set.
pub fn place_windows(
    plan: &Floorplan,
    seed: u64,
    doors: &[DoorOpening],
    config: &LayoutConfig,
) -> Vec<WindowOpening> {
    let mut rng = stream_for(seed, &windows_key(plan.floor_index));
    let occupied: FxHashSet<(u32, Side)> = doors.iter().map(|d| (d.room_id, d.side)).collect();

    let mut hosts: Vec<Room> = plan.rooms.clone();
    if config.corridor_windows {
        hosts.push(plan.corridor.as_room());
    }
    hosts.sort_by_key(|r| r.id);

    let eps = config.epsilon;
    let half = config.window_width / 2.0;
    let mut windows = Vec::new();

    for room in &hosts {
        for side in Side::ALL {
            let exterior = (room.rect.edge(side) - plan.footprint.edge(side)).abs() <= eps;
            if !exterior || occupied.contains(&(room.id, side)) {
                continue;
            }
            let (lo, hi) = room.rect.side_span(side);
            let length = hi - lo;
            if length + eps < config.window_width + 2.0 * config.opening_margin {
                continue;
            }

            let offset = golden_split_with(length, &mut rng, config.golden_jitter, config.grid_unit);
            let center = (lo + offset)
                .min(hi - config.opening_margin - half)
                .max(lo + config.opening_margin + half);
            windows.push(WindowOpening {
                room_id: room.id,
                side,
                center,
                width: config.window_width,
                height: config.window_height,
                sill_height: config.sill_height,
            });
        }
    }

    tracing::debug!(floor = plan.floor_index, windows = windows.len(), "placed windows");
    windows
}

/// Doors then windows for one story, as carver input.
pub fn place_openings(plan: &Floorplan, seed: u64, config: &LayoutConfig) -> Vec<Opening> {
    let doors = place_doors(plan, config);
    let windows = place_windows(plan, seed, &doors, config);
    doors
        .into_iter()
        .map(Opening::from)
        .chain(windows.into_iter().map(Opening::from))
        .collect()
}

fn usable_edge(a: &Rect, b: &Rect, needed: f64, config: &LayoutConfig) -> Option<SharedEdge> {
    shared_edge(a, b, config.epsilon).filter(|e| e.length() + config.epsilon >= needed)
}

/// Breadth-first over room adjacency from everything in `queue`.
fn connect_neighbours(
    rooms: &[&Room],
    queue: &mut VecDeque<Room>,
    connected: &mut FxHashSet<u32>,
    doors: &mut Vec<DoorOpening>,
    needed: f64,
    config: &LayoutConfig,
) {
    while let Some(current) = queue.pop_front() {
        for room in rooms {
            if connected.contains(&room.id) {
                continue;
            }
            if let Some(edge) = usable_edge(&current.rect, &room.rect, needed, config) {
                push_door_pair(doors, &current, room, edge, config);
                connected.insert(room.id);
                queue.push_back(**room);
            }
        }
    }
}

/// The part of a vertical corridor edge south of `limit`, if a door still fits.
fn below(edge: SharedEdge, limit: f64, needed: f64, config: &LayoutConfig) -> Option<SharedEdge> {
    let trimmed = SharedEdge {
        hi: edge.hi.min(limit),
        ..edge
    };
    (trimmed.length() + config.epsilon >= needed).then_some(trimmed)
}

fn push_door_pair(
    doors: &mut Vec<DoorOpening>,
    a: &Room,
    b: &Room,
    edge: SharedEdge,
    config: &LayoutConfig,
) {
    let center = edge.midpoint();
    for (room_id, side) in [(a.id, edge.side), (b.id, edge.side.opposite())] {
        doors.push(DoorOpening {
            room_id,
            side,
            center,
            width: config.door_width,
            height: config.door_height,
        });
    }
}

fn entrance(plan: &Floorplan, config: &LayoutConfig) -> Option<DoorOpening> {
    let rect = &plan.corridor.rect;
    if rect.width() + config.epsilon < config.door_width + 2.0 * config.opening_margin {
        return None;
    }
    Some(DoorOpening {
        room_id: plan.corridor.id,
        side: Side::South,
        center: rect.center().0,
        width: config.door_width,
        height: config.door_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floorplan::generate_floorplan;
    use crate::types::Corridor;

    fn rect(a: f64, b: f64, c: f64, d: f64) -> Rect {
        Rect::new(a, b, c, d).unwrap()
    }

    #[test]
    fn shared_edge_detects_each_side() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let east = shared_edge(&a, &rect(4.0, 1.0, 8.0, 6.0), 1e-4).unwrap();
        assert_eq!(east.side, Side::East);
        assert_eq!((east.lo, east.hi), (1.0, 4.0));

        let south = shared_edge(&a, &rect(2.0, -3.0, 9.0, 0.0), 1e-4).unwrap();
        assert_eq!(south.side, Side::South);
        assert_eq!((south.lo, south.hi), (2.0, 4.0));

        // Corner contact is not an edge.
        assert!(shared_edge(&a, &rect(4.0, 4.0, 6.0, 6.0), 1e-4).is_none());
        assert!(shared_edge(&a, &rect(5.0, 0.0, 6.0, 4.0), 1e-4).is_none());
    }

    #[test]
    fn doorless_rooms_have_no_usable_edge_to_the_network() {
        let config = LayoutConfig::default();
        let needed = config.door_width + 2.0 * config.opening_margin;
        for seed in [1, 42, 500] {
            let plan = generate_floorplan(24.0, 20.0, seed, 1, &config).unwrap();
            let doors = place_doors(&plan, &config);
            let has_door = |id: u32| doors.iter().any(|d| d.room_id == id);

            let mut network: Vec<Rect> = vec![plan.corridor.rect];
            network.extend(plan.rooms.iter().filter(|r| has_door(r.id)).map(|r| r.rect));
            for room in plan.rooms.iter().filter(|r| !has_door(r.id)) {
                for other in &network {
                    assert!(usable_edge(&room.rect, other, needed, &config).is_none());
                }
            }

            // Every room on the corridor is reachable.
            for room in &plan.rooms {
                if usable_edge(&room.rect, &plan.corridor.rect, needed, &config).is_some() {
                    assert!(has_door(room.id), "room {} (seed {seed})", room.id);
                }
            }
            // Doors come in pairs on upper floors.
            assert_eq!(doors.len() % 2, 0);
            assert!(doors.iter().all(|d| d.room_id != Corridor::ID || d.side != Side::South));
        }
    }

    fn plan_with(rooms: &[(u32, [f64; 4])], depth: f64) -> Floorplan {
        Floorplan {
            floor_index: 1,
            footprint: rect(0.0, 0.0, 20.0, depth),
            rooms: rooms
                .iter()
                .map(|&(id, [a, b, c, d])| Room { id, rect: rect(a, b, c, d) })
                .collect(),
            corridor: Corridor {
                id: Corridor::ID,
                rect: rect(9.0, 0.0, 10.75, depth),
            },
        }
    }

    fn corridor_door(doors: &[DoorOpening], room_id: u32) -> Option<&DoorOpening> {
        let room = doors.iter().find(|d| d.room_id == room_id)?;
        doors
            .iter()
            .find(|d| d.room_id == Corridor::ID && d.side == room.side.opposite() && d.center == room.center)
    }

    #[test]
    fn corridor_doors_stay_south_of_the_stair_zone() {
        let config = LayoutConfig::default();
        let plan = plan_with(
            &[
                (1, [0.0, 0.0, 9.0, 10.0]),
                (2, [0.0, 10.0, 9.0, 16.0]),
                (3, [10.75, 0.0, 20.0, 16.0]),
            ],
            16.0,
        );
        let doors = place_doors(&plan, &config);

        // Zone starts at y = 12: room 2 keeps the 10..12 part of its edge.
        assert_eq!(corridor_door(&doors, 1).unwrap().center, 5.0);
        assert_eq!(corridor_door(&doors, 2).unwrap().center, 11.0);
        assert_eq!(corridor_door(&doors, 3).unwrap().center, 6.0);
        for d in doors.iter().filter(|d| d.room_id == Corridor::ID) {
            assert!(d.center + d.width / 2.0 <= 12.0 + config.epsilon);
        }
    }

    #[test]
    fn room_inside_the_stair_zone_is_reached_through_a_neighbour() {
        let config = LayoutConfig::default();
        let plan = plan_with(
            &[
                (1, [0.0, 0.0, 9.0, 12.5]),
                (2, [0.0, 12.5, 9.0, 16.0]),
                (3, [10.75, 0.0, 20.0, 16.0]),
            ],
            16.0,
        );
        let doors = place_doors(&plan, &config);

        assert!(doors.iter().all(|d| d.room_id != Corridor::ID || d.center < 12.0));
        let into_2: Vec<&DoorOpening> = doors.iter().filter(|d| d.room_id == 2).collect();
        assert_eq!(into_2.len(), 1);
        assert_eq!(into_2[0].side, Side::South);
        assert_eq!(into_2[0].center, 4.5);
    }

    #[test]
    fn shallow_corridor_falls_back_to_the_stair_zone() {
        let config = LayoutConfig::default();
        // The whole corridor is stair zone; rooms still get connected.
        let plan = plan_with(&[(1, [0.0, 0.0, 9.0, 3.5]), (2, [10.75, 0.0, 20.0, 3.5])], 3.5);
        let doors = place_doors(&plan, &config);
        assert_eq!(corridor_door(&doors, 1).unwrap().center, 1.75);
        assert_eq!(corridor_door(&doors, 2).unwrap().center, 1.75);
    }

    #[test]
    fn generated_plans_keep_corridor_doors_off_the_shaft() {
        let config = LayoutConfig::default();
        let needed = config.door_width + 2.0 * config.opening_margin;
        for seed in 0..50 {
            let plan = generate_floorplan(20.0, 16.0, seed, 1, &config).unwrap();
            let zone = stair_zone_start(&plan.corridor.rect, &config);
            let doors = place_doors(&plan, &config);
            for room in &plan.rooms {
                let Some(door) = corridor_door(&doors, room.id) else {
                    continue;
                };
                if door.center + door.width / 2.0 > zone + config.epsilon {
                    // Only when the part below the zone is too short for a door.
                    let edge = shared_edge(&room.rect, &plan.corridor.rect, config.epsilon).unwrap();
                    assert!(below(edge, zone, needed, &config).is_none(), "seed {seed} room {}", room.id);
                }
            }
        }
    }

    #[test]
    fn ground_floor_has_entrance() {
        let config = LayoutConfig::default();
        let plan = generate_floorplan(20.0, 16.0, 3, 0, &config).unwrap();
        let doors = place_doors(&plan, &config);
        let entrance = doors
            .iter()
            .find(|d| d.room_id == Corridor::ID && d.side == Side::South)
            .unwrap();
        assert_eq!(entrance.center, plan.corridor.rect.center().0);
    }

    #[test]
    fn windows_only_on_exterior_walls() {
        let config = LayoutConfig::default();
        let plan = generate_floorplan(24.0, 20.0, 9, 0, &config).unwrap();
        let doors = place_doors(&plan, &config);
        let windows = place_windows(&plan, 9, &doors, &config);
        assert!(!windows.is_empty());
        for w in &windows {
            let room = plan.room(w.room_id).unwrap();
            assert_eq!(room.rect.edge(w.side), plan.footprint.edge(w.side));
            let (lo, hi) = room.rect.side_span(w.side);
            assert!(w.center - w.width / 2.0 >= lo + config.opening_margin - 1e-9);
            assert!(w.center + w.width / 2.0 <= hi - config.opening_margin + 1e-9);
        }
        assert!(windows.iter().all(|w| w.room_id != Corridor::ID));
    }

    #[test]
    fn corridor_windows_avoid_the_entrance_wall() {
        let config = LayoutConfig {
            corridor_windows: true,
            opening_margin: 0.2,
            ..Default::default()
        };
        let plan = generate_floorplan(20.0, 16.0, 4, 0, &config).unwrap();
        let openings = place_openings(&plan, 4, &config);
        let corridor_windows: Vec<&Opening> = openings
            .iter()
            .filter(|o| !o.is_door() && o.room_id() == Corridor::ID)
            .collect();
        assert_eq!(corridor_windows.len(), 1);
        assert_eq!(corridor_windows[0].side(), Side::North);
    }

    #[test]
    fn placement_is_deterministic() {
        let config = LayoutConfig::default();
        let plan = generate_floorplan(30.0, 22.0, 77, 2, &config).unwrap();
        assert_eq!(place_openings(&plan, 77, &config), place_openings(&plan, 77, &config));
    }
}
