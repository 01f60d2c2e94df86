// Safe-rotation interval for a label at its resolved placement scale.
//
// Queries the committed placements again at the accepted scale, discards
// pairs that cannot touch via a cheap axis-aligned re-projection, and
// delegates the genuinely overlapping ones to the pairwise angular routine.
// Per-neighbor intervals are merged by widening: running min of the lower
// bounds, running max of the upper bounds, seeded at the no-constraint
// value.

use super::index::PlacementIndex;
use super::types::{GlyphBox, PlacementBox, PlacementRange, Point};

/// The pairwise angular computation the resolver delegates to. Pure: two box
/// descriptions and a shared scale in, the interval of intersecting rotation
/// angles out.
pub type RotationIntervalFn = fn(&GlyphBox, &PlacementBox, f32) -> PlacementRange;

pub(super) fn resolve_rotation_range(
    index: &PlacementIndex,
    glyphs: &[GlyphBox],
    placement_scale: f32,
    interval: RotationIntervalFn,
) -> PlacementRange {
    let mut range = PlacementRange::unconstrained();

    for glyph in glyphs {
        let bounds = glyph.bounds;
        let anchor = glyph.anchor;

        let min_placed = Point::new(
            anchor.x + bounds.tl.x / placement_scale,
            anchor.y + bounds.tl.y / placement_scale,
        );
        let max_placed = Point::new(
            anchor.x + bounds.br.x / placement_scale,
            anchor.y + bounds.br.y / placement_scale,
        );

        for entry in index.query(min_placed, max_placed) {
            let placement = &entry.placement;

            // Re-project whichever side was committed at the lower scale to
            // the higher one and compare there; only pairs that still
            // overlap are worth the angular computation.
            let (intersect_x, intersect_y) = if placement_scale > placement.placement_scale {
                let x1 = placement.anchor.x + placement.bounds.tl.x / placement_scale;
                let y1 = placement.anchor.y + placement.bounds.tl.y / placement_scale;
                let x2 = placement.anchor.x + placement.bounds.br.x / placement_scale;
                let y2 = placement.anchor.y + placement.bounds.br.y / placement_scale;
                (
                    x1 < max_placed.x && x2 > min_placed.x,
                    y1 < max_placed.y && y2 > min_placed.y,
                )
            } else {
                let x1 = anchor.x + bounds.tl.x / placement.placement_scale;
                let y1 = anchor.y + bounds.tl.y / placement.placement_scale;
                let x2 = anchor.x + bounds.br.x / placement.placement_scale;
                let y2 = anchor.y + bounds.br.y / placement.placement_scale;
                (
                    x1 < entry.max.x && x2 > entry.min.x,
                    y1 < entry.max.y && y2 > entry.min.y,
                )
            };

            if !(intersect_x && intersect_y) {
                continue;
            }

            let scale = placement_scale.max(placement.placement_scale);
            let pair = interval(glyph, placement, scale);

            range.min = range.min.min(pair.min);
            range.max = range.max.max(pair.max);
        }
    }

    range
}
