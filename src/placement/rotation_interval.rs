//! Pairwise rotation-interval computation.
//!
//! Contract consumed by the rotation range resolver: given the glyph being
//! placed, one committed placement, and the scale the pair is compared at,
//! return the interval of rotation angles (radians) during which the glyph,
//! rotated about its own anchor, may intersect the committed box held in its
//! committed pose. Both true extents (`rect`, not the circumscribed query
//! `bounds`) are projected at the shared scale.
//!
//! Output is an interval inside `[0, 2π]` with `min <= max`, except for the
//! two distinguished values: `(2π, 0)` ("never intersects", identical to the
//! resolver's accumulator seed) and `[0, 2π]` ("intersects at every angle").
//! The resolver merges intervals by widening, so an interval that would wrap
//! past `2π` cannot be represented and degrades to the full circle.
//!
//! This default implementation is a conservative corner-angle bound: the
//! blocker is reduced to the arc it subtends from the glyph's anchor, the
//! glyph to the arc its corners sweep, and the unsafe interval is the set of
//! rotations bringing the two arcs into contact. It may report collisions
//! that a finer test would clear; it never misses one at the arc level.

use std::f32::consts::TAU;

use super::types::{GlyphBox, PlacementBox, PlacementRange, Point};

/// Default rotation-interval routine; swap out via
/// [`PlacementEngine::with_rotation_interval`](super::PlacementEngine::with_rotation_interval).
pub fn rotation_interval(glyph: &GlyphBox, blocker: &PlacementBox, scale: f32) -> PlacementRange {
    // Blocker extent in the rotating glyph's anchor frame, at the shared
    // scale.
    let dx = blocker.anchor.x - glyph.anchor.x;
    let dy = blocker.anchor.y - glyph.anchor.y;
    let b_tl = Point::new(dx + blocker.rect.tl.x / scale, dy + blocker.rect.tl.y / scale);
    let b_br = Point::new(dx + blocker.rect.br.x / scale, dy + blocker.rect.br.y / scale);

    let g_tl = Point::new(glyph.rect.tl.x / scale, glyph.rect.tl.y / scale);
    let g_br = Point::new(glyph.rect.br.x / scale, glyph.rect.br.y / scale);

    // Farthest the rotating glyph reaches from its anchor.
    let reach = corners(g_tl, g_br)
        .into_iter()
        .fold(0.0f32, |acc, c| acc.max((c.x * c.x + c.y * c.y).sqrt()));

    let blocker_dist = origin_rect_distance(b_tl, b_br);
    if blocker_dist > reach {
        return PlacementRange::unconstrained();
    }
    if blocker_dist <= 0.0 {
        // The blocker covers the anchor itself; no heading avoids it.
        return PlacementRange::full_circle();
    }

    // Origin inside the glyph extent: the glyph occupies every heading.
    if g_tl.x <= 0.0 && g_tl.y <= 0.0 && g_br.x >= 0.0 && g_br.y >= 0.0 {
        return PlacementRange::full_circle();
    }

    // The anchor is outside both rectangles, so each subtended arc is exact
    // at its corners.
    let (blocker_start, blocker_span) = covering_arc(corner_angles(b_tl, b_br));
    let (glyph_start, glyph_span) = covering_arc(corner_angles(g_tl, g_br));

    // Rotating by theta shifts the glyph arc by theta; the pair can only
    // meet while the shifted glyph arc touches the blocker arc.
    let span = blocker_span + glyph_span;
    if span >= TAU {
        return PlacementRange::full_circle();
    }
    let start = normalize_angle(blocker_start - (glyph_start + glyph_span));
    let end = start + span;
    if end > TAU {
        // Wrapping interval; not representable, fail toward blocking.
        return PlacementRange::full_circle();
    }
    PlacementRange::new(start, end)
}

fn corners(tl: Point, br: Point) -> [Point; 4] {
    [
        tl,
        Point::new(br.x, tl.y),
        Point::new(tl.x, br.y),
        br,
    ]
}

fn corner_angles(tl: Point, br: Point) -> [f32; 4] {
    corners(tl, br).map(|c| normalize_angle(c.y.atan2(c.x)))
}

/// Distance from the origin to an axis-aligned rectangle, zero if inside.
fn origin_rect_distance(tl: Point, br: Point) -> f32 {
    let dx = if tl.x > 0.0 {
        tl.x
    } else if br.x < 0.0 {
        -br.x
    } else {
        0.0
    };
    let dy = if tl.y > 0.0 {
        tl.y
    } else if br.y < 0.0 {
        -br.y
    } else {
        0.0
    };
    (dx * dx + dy * dy).sqrt()
}

fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    a
}

/// Smallest circular arc covering all four angles, as (start, span). The
/// covering arc is the complement of the largest gap between consecutive
/// angles.
fn covering_arc(mut angles: [f32; 4]) -> (f32, f32) {
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut largest_gap = -1.0f32;
    let mut after_gap = 0;
    for i in 0..4 {
        let gap = if i == 3 {
            angles[0] + TAU - angles[3]
        } else {
            angles[i + 1] - angles[i]
        };
        if gap > largest_gap {
            largest_gap = gap;
            after_gap = (i + 1) % 4;
        }
    }
    (angles[after_gap], TAU - largest_gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::types::{PlacementRange, Rect};
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn glyph_east() -> GlyphBox {
        // Extends east of its anchor, well clear of the origin.
        GlyphBox::new(
            Rect::new(Point::new(5.0, -5.0), Point::new(15.0, 5.0)),
            Point::new(0.0, 0.0),
        )
    }

    fn blocker_at(x: f32, y: f32, half: f32) -> PlacementBox {
        let rect = Rect::new(Point::new(-half, -half), Point::new(half, half));
        PlacementBox {
            anchor: Point::new(x, y),
            rect,
            bounds: rect,
            rotate: false,
            range: PlacementRange::unconstrained(),
            placement_scale: 1.0,
            max_scale: f32::INFINITY,
            padding: 0.0,
        }
    }

    #[test]
    fn unreachable_blocker_yields_no_constraint() {
        let range = rotation_interval(&glyph_east(), &blocker_at(2000.0, 0.0, 1.0), 1.0);
        assert_eq!(range, PlacementRange::unconstrained());
    }

    #[test]
    fn blocker_over_the_anchor_blocks_every_angle() {
        let range = rotation_interval(&glyph_east(), &blocker_at(1.0, 1.0, 10.0), 1.0);
        assert_eq!(range, PlacementRange::full_circle());
    }

    #[test]
    fn northern_blocker_yields_interval_around_quarter_turn() {
        // Glyph arc is centered on heading 0; a blocker due north is hit
        // while the glyph points at it, i.e. around pi/2.
        let range = rotation_interval(&glyph_east(), &blocker_at(0.0, 12.0, 1.0), 1.0);
        assert!(range.min < FRAC_PI_2 && FRAC_PI_2 < range.max, "got {range:?}");
        assert!(range.max - range.min < TAU / 2.0, "interval too wide: {range:?}");
    }

    #[test]
    fn eastern_blocker_wraps_and_degrades_to_full_circle() {
        // The unsafe interval straddles angle 0, which the widening
        // accumulator cannot represent; the routine fails closed.
        let range = rotation_interval(&glyph_east(), &blocker_at(12.0, 0.0, 1.0), 1.0);
        assert_eq!(range, PlacementRange::full_circle());
    }

    #[test]
    fn origin_covering_glyph_blocks_every_angle_within_reach() {
        let glyph = GlyphBox::new(
            Rect::new(Point::new(-10.0, -10.0), Point::new(10.0, 10.0)),
            Point::new(0.0, 0.0),
        );
        let range = rotation_interval(&glyph, &blocker_at(12.0, 0.0, 4.0), 1.0);
        assert_eq!(range, PlacementRange::full_circle());
    }

    #[test]
    fn scale_shrinks_reach() {
        // At scale 4 the glyph's 15-unit reach drops below the blocker
        // distance and the constraint disappears.
        let range = rotation_interval(&glyph_east(), &blocker_at(12.0, 0.0, 1.0), 4.0);
        assert_eq!(range, PlacementRange::unconstrained());
    }
}
