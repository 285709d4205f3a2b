// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall segment extraction from room rectangles.

use crate::config::LayoutConfig;
use crate::types::{Room, SegmentKind, SegmentMap, Side, WallSegment};

/// The four full-length walls of a room, ordered north, south, east, west.
///
/// Endpoints always run in increasing axis order.
pub fn extract_walls(room: &Room, config: &LayoutConfig) -> [WallSegment; 4] {
    Side::ALL.map(|side| wall_for_side(room, side, config))
}

/// The single full-length wall on one side of a room.
pub fn wall_for_side(room: &Room, side: Side, config: &LayoutConfig) -> WallSegment {
    let r = &room.rect;
    let (x1, y1, x2, y2) = match side {
        Side::North => (r.min_x, r.max_y, r.max_x, r.max_y),
        Side::South => (r.min_x, r.min_y, r.max_x, r.min_y),
        Side::East => (r.max_x, r.min_y, r.max_x, r.max_y),
        Side::West => (r.min_x, r.min_y, r.min_x, r.max_y),
    };
    WallSegment {
        room_id: room.id,
        side,
        x1,
        y1,
        x2,
        y2,
        height: config.story_height,
        thickness: config.wall_thickness,
        kind: SegmentKind::Plain,
    }
}

/// Walls for a set of rooms, keyed by room id.
pub fn extract_all<'a>(rooms: impl IntoIterator<Item = &'a Room>, config: &LayoutConfig) -> SegmentMap {
    rooms
        .into_iter()
        .map(|room| (room.id, extract_walls(room, config).to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    fn room() -> Room {
        Room {
            id: 4,
            rect: Rect::new(1.0, 2.0, 6.0, 5.0).unwrap(),
        }
    }

    #[test]
    fn one_wall_per_side_spanning_the_edge() {
        let config = LayoutConfig::default();
        let walls = extract_walls(&room(), &config);

        let north = &walls[0];
        assert_eq!(north.side, Side::North);
        assert_eq!((north.x1, north.y1, north.x2, north.y2), (1.0, 5.0, 6.0, 5.0));
        assert_eq!(north.length(), 5.0);

        let west = &walls[3];
        assert_eq!(west.side, Side::West);
        assert_eq!((west.x1, west.y1, west.x2, west.y2), (1.0, 2.0, 1.0, 5.0));
        assert_eq!(west.length(), 3.0);

        for w in &walls {
            assert_eq!(w.room_id, 4);
            assert!(w.is_plain());
            assert_eq!(w.height, config.story_height);
            assert_eq!(w.thickness, config.wall_thickness);
        }
    }

    #[test]
    fn perimeter_is_preserved() {
        let walls = extract_walls(&room(), &LayoutConfig::default());
        let perimeter: f64 = walls.iter().map(|w| w.length()).sum();
        assert_eq!(perimeter, 16.0);
    }

    #[test]
    fn extract_all_keys_by_id() {
        let a = room();
        let b = Room {
            id: 9,
            rect: Rect::new(6.0, 2.0, 9.0, 5.0).unwrap(),
        };
        let map = extract_all([&a, &b], &LayoutConfig::default());
        assert_eq!(map.len(), 2);
        assert_eq!(map[&9].len(), 4);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![4, 9]);
    }
}
