// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core data model shared by every generation stage.
//!
//! All values are plain immutable data. Stages never patch a value they
//! received; corrections are expressed by building new values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned rectangle in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Create a rectangle, rejecting empty or inverted bounds.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let all_finite = [min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite());
        if !all_finite || min_x >= max_x || min_y >= max_y {
            return Err(Error::geometry(format!(
                "degenerate rect ({min_x}, {min_y}) -> ({max_x}, {max_y})"
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: f64, depth: f64) -> Result<Self> {
        Self::new(0.0, 0.0, width, depth)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.depth()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Area shared with `other` (zero when they only touch).
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let overlap_x = (self.max_x.min(other.max_x) - self.min_x.max(other.min_x)).max(0.0);
        let overlap_y = (self.max_y.min(other.max_y) - self.min_y.max(other.min_y)).max(0.0);
        overlap_x * overlap_y
    }

    /// True if `other` lies inside `self`, allowing `eps` of slack on every edge.
    pub fn contains_rect(&self, other: &Rect, eps: f64) -> bool {
        other.min_x >= self.min_x - eps
            && other.min_y >= self.min_y - eps
            && other.max_x <= self.max_x + eps
            && other.max_y <= self.max_y + eps
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Bounding rectangle of a set of rectangles, `None` when empty.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(*r),
            Some(b) => Some(b.union(r)),
        })
    }

    /// Split at an x coordinate into (west, east). Caller guarantees `x` is interior.
    pub(crate) fn split_at_x(&self, x: f64) -> (Rect, Rect) {
        (
            Rect { max_x: x, ..*self },
            Rect { min_x: x, ..*self },
        )
    }

    /// Split at a y coordinate into (south, north). Caller guarantees `y` is interior.
    pub(crate) fn split_at_y(&self, y: f64) -> (Rect, Rect) {
        (
            Rect { max_y: y, ..*self },
            Rect { min_y: y, ..*self },
        )
    }

    /// Coordinate of the edge on the given side.
    pub fn edge(&self, side: Side) -> f64 {
        match side {
            Side::North => self.max_y,
            Side::South => self.min_y,
            Side::East => self.max_x,
            Side::West => self.min_x,
        }
    }

    /// Extent of the given side along its own axis as `(lo, hi)`.
    pub fn side_span(&self, side: Side) -> (f64, f64) {
        if side.is_horizontal() {
            (self.min_x, self.max_x)
        } else {
            (self.min_y, self.max_y)
        }
    }
}

/// One of the four compass sides of an axis-aligned room.
///
/// North is +y, east is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// North and south walls run along the x axis.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Side::North | Side::South)
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::East => Side::West,
            Side::West => Side::East,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::North => "north",
            Side::South => "south",
            Side::East => "east",
            Side::West => "west",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A habitable room produced by the floorplan generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub rect: Rect,
}

/// Circulation space. Walled like a room, never windowed by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: u32,
    pub rect: Rect,
}

impl Corridor {
    /// Id reserved for the corridor; rooms are numbered from 1.
    pub const ID: u32 = 0;

    /// View the corridor as a room for stages that only need id and bounds.
    pub fn as_room(&self) -> Room {
        Room {
            id: self.id,
            rect: self.rect,
        }
    }
}

/// A door cut through a wall for its full height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorOpening {
    pub room_id: u32,
    pub side: Side,
    /// Center along the wall axis (x for north/south, y for east/west).
    pub center: f64,
    pub width: f64,
    pub height: f64,
}

/// A window; the vertical carve (sill and head) is left to the geometry kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowOpening {
    pub room_id: u32,
    pub side: Side,
    /// Center along the wall axis (x for north/south, y for east/west).
    pub center: f64,
    pub width: f64,
    pub height: f64,
    pub sill_height: f64,
}

/// Either kind of opening, as placed on a host wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Opening {
    Door(DoorOpening),
    Window(WindowOpening),
}

impl Opening {
    pub fn room_id(&self) -> u32 {
        match self {
            Opening::Door(d) => d.room_id,
            Opening::Window(w) => w.room_id,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Opening::Door(d) => d.side,
            Opening::Window(w) => w.side,
        }
    }

    pub fn center(&self) -> f64 {
        match self {
            Opening::Door(d) => d.center,
            Opening::Window(w) => w.center,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Opening::Door(d) => d.width,
            Opening::Window(w) => w.width,
        }
    }

    /// Extent along the wall axis as `(lo, hi)`.
    pub fn span(&self) -> (f64, f64) {
        let half = self.width() / 2.0;
        (self.center() - half, self.center() + half)
    }

    pub fn is_door(&self) -> bool {
        matches!(self, Opening::Door(_))
    }
}

impl From<DoorOpening> for Opening {
    fn from(d: DoorOpening) -> Self {
        Opening::Door(d)
    }
}

impl From<WindowOpening> for Opening {
    fn from(w: WindowOpening) -> Self {
        Opening::Window(w)
    }
}

/// What a wall piece carries. Built atomically with the piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "opening", rename_all = "snake_case")]
pub enum SegmentKind {
    Plain,
    WithOpening(Opening),
}

/// A straight, gap-free run of wall belonging to one room side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub room_id: u32,
    pub side: Side,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub height: f64,
    pub thickness: f64,
    pub kind: SegmentKind,
}

impl WallSegment {
    pub fn length(&self) -> f64 {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        (dx * dx + dy * dy).sqrt()
    }

    /// Extent along the wall axis as `(lo, hi)`.
    pub fn axis_range(&self) -> (f64, f64) {
        let (a, b) = if self.side.is_horizontal() {
            (self.x1, self.x2)
        } else {
            (self.y1, self.y2)
        };
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// A collinear piece of this segment covering `[lo, hi]` along the wall axis.
    pub fn piece(&self, lo: f64, hi: f64, kind: SegmentKind) -> WallSegment {
        let (x1, y1, x2, y2) = if self.side.is_horizontal() {
            (lo, self.y1, hi, self.y2)
        } else {
            (self.x1, lo, self.x2, hi)
        };
        WallSegment {
            x1,
            y1,
            x2,
            y2,
            kind,
            ..*self
        }
    }

    pub fn opening(&self) -> Option<&Opening> {
        match &self.kind {
            SegmentKind::Plain => None,
            SegmentKind::WithOpening(o) => Some(o),
        }
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        matches!(self.kind, SegmentKind::Plain)
    }
}

/// Wall segments keyed by owning room id, in ascending id order.
pub type SegmentMap = BTreeMap<u32, Vec<WallSegment>>;

/// Floor or ceiling plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlabKind {
    Floor,
    Ceiling,
}

/// A horizontal plate with an optional rectangular cutout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub rect: Rect,
    /// Elevation of the slab's underside.
    pub z: f64,
    pub thickness: f64,
    pub kind: SlabKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_rect: Option<Rect>,
}

/// Stair construction style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StairType {
    #[default]
    Straight,
    Spiral,
}

/// The vertical shaft reserved for stairs, identical in plan on every story.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stairwell {
    pub rect: Rect,
    /// First story served (inclusive).
    pub floor_from: u32,
    /// Last story served (inclusive).
    pub floor_to: u32,
    pub stair_type: StairType,
}
