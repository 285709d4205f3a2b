// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening carving: splitting wall segments around doors and windows.
//!
//! Openings on one host wall are validated as mutually disjoint, then applied
//! in axis order. Each opening splits the plain piece that strictly contains
//! its center into a left remainder, an optional tagged middle piece and a
//! right remainder. Remainders shorter than epsilon are dropped.
//!
//! Windows always leave a tagged middle piece (the kernel carves sill and
//! head). Doors leave a gap, or a tagged lintel piece when
//! [`LayoutConfig::door_lintels`] is set.

use rustc_hash::FxHashMap;

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::types::{Opening, SegmentKind, SegmentMap, Side, WallSegment};

/// Carve `openings` into `segments`, returning a new map.
///
/// The input map is left untouched. An opening whose center is not interior
/// to any plain piece of its wall is skipped. Overlapping openings on the
/// same wall are rejected with [`Error::OverlappingOpenings`]; a segment
/// shorter than epsilon or off its side's axis is an [`Error::Geometry`].
pub fn carve(
    segments: &SegmentMap,
    openings: &[Opening],
    config: &LayoutConfig,
) -> Result<SegmentMap> {
    let by_wall = group_openings(openings, config)?;

    let mut carved = SegmentMap::new();
    for (&room_id, walls) in segments {
        let mut out = Vec::with_capacity(walls.len());
        for seg in walls {
            match by_wall.get(&(room_id, seg.side)) {
                Some(wall_openings) => out.extend(carve_segment(seg, wall_openings, config)?),
                None => {
                    check_segment(seg, config)?;
                    out.push(*seg);
                }
            }
        }
        carved.insert(room_id, out);
    }
    Ok(carved)
}

/// Carve already-validated openings into a single segment.
///
/// `openings` must be sorted along the wall axis and mutually disjoint.
pub fn carve_segment(
    seg: &WallSegment,
    openings: &[Opening],
    config: &LayoutConfig,
) -> Result<Vec<WallSegment>> {
    check_segment(seg, config)?;
    let eps = config.epsilon;
    let mut pieces = vec![*seg];

    for opening in openings {
        let coord = opening.center();
        let mut applied = false;
        let mut next = Vec::with_capacity(pieces.len() + 2);

        for piece in pieces {
            let (p_min, p_max) = piece.axis_range();
            // Boundary-coincident centers (exactly eps from an end) count as interior.
            let interior = coord >= p_min + eps && coord <= p_max - eps;
            if !piece.is_plain() || !interior {
                next.push(piece);
                continue;
            }

            applied = true;
            let (lo, hi) = opening.span();
            let lo = lo.max(p_min);
            let hi = hi.min(p_max);

            if lo - p_min > eps {
                next.push(piece.piece(p_min, lo, SegmentKind::Plain));
            }
            if let Some(kind) = middle_kind(opening, config) {
                next.push(piece.piece(lo, hi, kind));
            }
            if p_max - hi > eps {
                next.push(piece.piece(hi, p_max, SegmentKind::Plain));
            }
        }

        if !applied {
            tracing::warn!(
                room = seg.room_id,
                side = %seg.side,
                center = coord,
                "opening not interior to any wall piece, skipped"
            );
        }
        pieces = next;
    }
    Ok(pieces)
}

/// Reject zero-length segments and segments that do not run along their side.
pub fn check_segment(seg: &WallSegment, config: &LayoutConfig) -> Result<()> {
    let eps = config.epsilon;
    let coords = [seg.x1, seg.y1, seg.x2, seg.y2];
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(Error::geometry(format!(
            "room {} {} wall has non-finite endpoints",
            seg.room_id, seg.side
        )));
    }
    let drift = if seg.side.is_horizontal() {
        (seg.y2 - seg.y1).abs()
    } else {
        (seg.x2 - seg.x1).abs()
    };
    if drift > eps {
        return Err(Error::geometry(format!(
            "room {} {} wall ({}, {})-({}, {}) is not aligned with its side",
            seg.room_id, seg.side, seg.x1, seg.y1, seg.x2, seg.y2
        )));
    }
    if seg.length() < eps {
        return Err(Error::geometry(format!(
            "room {} {} wall has zero length",
            seg.room_id, seg.side
        )));
    }
    Ok(())
}

/// Total length of untagged pieces.
pub fn solid_length(pieces: &[WallSegment]) -> f64 {
    pieces.iter().filter(|p| p.is_plain()).map(|p| p.length()).sum()
}

fn middle_kind(opening: &Opening, config: &LayoutConfig) -> Option<SegmentKind> {
    match opening {
        Opening::Window(_) => Some(SegmentKind::WithOpening(*opening)),
        Opening::Door(_) if config.door_lintels => Some(SegmentKind::WithOpening(*opening)),
        Opening::Door(_) => None,
    }
}

/// Group openings per host wall, sorted along the axis, and reject overlaps.
fn group_openings(
    openings: &[Opening],
    config: &LayoutConfig,
) -> Result<FxHashMap<(u32, Side), Vec<Opening>>> {
    let mut by_wall: FxHashMap<(u32, Side), Vec<Opening>> = FxHashMap::default();
    for opening in openings {
        let width = opening.width();
        if !(width.is_finite() && width > 0.0) || !opening.center().is_finite() {
            return Err(Error::geometry(format!(
                "opening on room {} {} wall has width {width}",
                opening.room_id(),
                opening.side()
            )));
        }
        by_wall
            .entry((opening.room_id(), opening.side()))
            .or_default()
            .push(*opening);
    }

    for ((room_id, side), list) in by_wall.iter_mut() {
        list.sort_by(|a, b| a.center().total_cmp(&b.center()));
        for pair in list.windows(2) {
            let (_, prev_hi) = pair[0].span();
            let (next_lo, _) = pair[1].span();
            if prev_hi > next_lo + config.epsilon {
                return Err(Error::OverlappingOpenings {
                    room_id: *room_id,
                    side: *side,
                    first: pair[0].center(),
                    second: pair[1].center(),
                });
            }
        }
    }
    Ok(by_wall)
}
