// Minimum collision-free placement scale for one label.
//
// Box extents are divided by the placement scale, so raising the scale
// shrinks every footprint until the contested pair clears. The resolver
// walks each candidate glyph, queries the committed placements its scaled
// box touches, and ratchets the label's floor scale upward until every
// collision is cleared or the window is exhausted.

use log::trace;

use super::index::PlacementIndex;
use super::types::{GlyphBox, Point};
use super::{EXTENT_RATIO, TILE_EXTENT};

/// Sentinel: the label cannot be placed anywhere in the requested window.
pub(super) const INFEASIBLE: f32 = -1.0;

pub(super) fn resolve_placement_scale(
    index: &PlacementIndex,
    glyphs: &[GlyphBox],
    mut min_placement_scale: f32,
    max_placement_scale: f32,
    pad: f32,
) -> f32 {
    for glyph in glyphs {
        let bounds = glyph.bounds;
        let rect = glyph.rect;
        let anchor = glyph.anchor;

        if anchor.x < 0.0 || anchor.x > TILE_EXTENT || anchor.y < 0.0 || anchor.y > TILE_EXTENT {
            return INFEASIBLE;
        }

        let min_scale = min_placement_scale.max(glyph.min_scale);
        let max_scale = glyph.max_scale;

        // Never displayable at any scale; contributes no constraint.
        if min_scale >= max_scale {
            continue;
        }

        // Scaled bounding box of the unrotated glyph.
        let min_placed = Point::new(
            anchor.x + bounds.tl.x / min_scale,
            anchor.y + bounds.tl.y / min_scale,
        );
        let max_placed = Point::new(
            anchor.x + bounds.br.x / min_scale,
            anchor.y + bounds.br.y / min_scale,
        );

        for entry in index.query(min_placed, max_placed) {
            let placement = &entry.placement;
            let old_anchor = placement.anchor;
            let old_rect = placement.rect;

            // Identical anchors sink the whole label. NOTE: this isn't
            // exact, since glyphs can share an anchor with differing box
            // offsets; kept as-is for parity with reference output.
            if anchor == old_anchor {
                return INFEASIBLE;
            }

            // Padding is requested in anchor units while box edges are in
            // internal units; the extent ratio bridges the two.
            let padding = pad.max(placement.padding) * EXTENT_RATIO;

            // Scale at which the new box sits fully to the left / right /
            // top / bottom of the old one.
            let sep_x = anchor.x - old_anchor.x;
            let sep_y = anchor.y - old_anchor.y;
            let mut s1 = (old_rect.tl.x - rect.br.x - padding) / sep_x;
            let mut s2 = (old_rect.br.x - rect.tl.x + padding) / sep_x;
            let mut s3 = (old_rect.tl.y - rect.br.y - padding) / sep_y;
            let mut s4 = (old_rect.br.y - rect.tl.y + padding) / sep_y;

            if s1.is_nan() || s2.is_nan() {
                s1 = 1.0;
                s2 = 1.0;
            }
            if s3.is_nan() || s4.is_nan() {
                s3 = 1.0;
                s4 = 1.0;
            }

            let collision_free_scale = s1.max(s2).min(s3.max(s4));

            // Only update the label's floor if this glyph was genuinely
            // restricted by the collision: the clearance scale must bind
            // inside both placements' scale windows.
            if collision_free_scale > min_placement_scale
                && collision_free_scale > min_scale
                && collision_free_scale < max_scale
                && collision_free_scale < placement.max_scale
            {
                trace!(
                    "collision with anchor ({}, {}) raises placement scale to {collision_free_scale}",
                    old_anchor.x, old_anchor.y
                );
                min_placement_scale = collision_free_scale;
            }

            if min_placement_scale > max_placement_scale {
                return INFEASIBLE;
            }
        }
    }

    min_placement_scale
}
