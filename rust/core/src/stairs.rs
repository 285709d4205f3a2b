// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stairwell placement.
//!
//! The stairwell sits centered on the corridor's width, flush with its far
//! (north) end. Its rectangle is computed once and reused verbatim as the
//! slab hole on every story, which keeps the shaft aligned vertically.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::types::{Corridor, Rect, StairType, Stairwell};

/// Place the stairwell for a building of `floors` stories.
///
/// Returns `None` without a corridor. The configured size is clamped to the
/// corridor so the shaft never leaves it.
pub fn place_stairwell(
    corridor: Option<&Corridor>,
    floors: u32,
    config: &LayoutConfig,
) -> Result<Option<Stairwell>> {
    let Some(corridor) = corridor else {
        return Ok(None);
    };
    let c = &corridor.rect;

    let width = config.stair_width.min(c.width());
    let cx = (c.min_x + c.max_x) / 2.0;

    let rect = Rect::new(cx - width / 2.0, stair_zone_start(c, config), cx + width / 2.0, c.max_y)?;

    tracing::debug!(?rect, floors, "placed stairwell");

    Ok(Some(Stairwell {
        rect,
        floor_from: 0,
        floor_to: floors.saturating_sub(1),
        stair_type: StairType::Straight,
    }))
}

/// Lowest y of the stairwell inside `corridor`. The corridor beyond this
/// point is stair shaft on every story.
pub fn stair_zone_start(corridor: &Rect, config: &LayoutConfig) -> f64 {
    corridor.max_y - config.stair_depth.min(corridor.depth())
}
