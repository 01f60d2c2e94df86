mod index;
mod rotation;
pub mod rotation_interval;
mod scale;
pub(crate) mod types;

pub use rotation::RotationIntervalFn;
pub use types::*;

use log::debug;

use index::PlacementIndex;

/// Tile coordinate space extent per axis; anchors outside `[0, TILE_EXTENT]`
/// are rejected.
pub const TILE_EXTENT: f32 = 4096.0;

/// Ratio between internal box units and anchor units (tile extent over the
/// 512-pixel tile size). Padding values are given in anchor units.
pub const EXTENT_RATIO: f32 = 8.0;

/// Padding carried by the synthetic boundary guards.
const BOUNDARY_PADDING: f32 = 2.0;

/// Collision-free label placement for a single tile.
///
/// One engine instance governs one tile's label set. Placement requests are
/// strictly sequential: each `place` call queries the committed placements
/// and, on success, commits its own, so later labels see earlier ones. The
/// index is owned exclusively and never exposed.
pub struct PlacementEngine {
    index: PlacementIndex,
    rotation_interval: RotationIntervalFn,
}

impl PlacementEngine {
    pub fn new() -> Self {
        Self::with_rotation_interval(rotation_interval::rotation_interval)
    }

    /// Engine with a caller-supplied pairwise rotation-interval routine; see
    /// the contract in [`rotation_interval`].
    pub fn with_rotation_interval(interval: RotationIntervalFn) -> Self {
        let mut engine = Self {
            index: PlacementIndex::new(),
            rotation_interval: interval,
        };
        engine.seed_boundary_guards();
        engine
    }

    /// Number of committed placements, boundary guards included.
    pub fn placement_count(&self) -> usize {
        self.index.len()
    }

    // Each tile is laid out with no knowledge of its neighbors, so a label
    // accepted flush against a tile edge could overlap one committed by the
    // adjacent tile. Two giant crosses anchored at opposite corners block
    // placements from creeping past the seams. An approximation, not a
    // cross-tile negotiation.
    fn seed_boundary_guards(&mut self) {
        let m = TILE_EXTENT;
        let origin = Point::new(0.0, 0.0);
        let far = Point::new(m, m);
        let full = PlacementRange::full_circle();

        // Zero-width arms extending 8 tile extents along +x and +y.
        let down = Rect::new(Point::new(0.0, 0.0), Point::new(0.0, m * 8.0));
        let right = Rect::new(Point::new(0.0, 0.0), Point::new(m * 8.0, 0.0));
        self.insert(
            &[GlyphBox::new(down, origin), GlyphBox::new(right, origin)],
            origin,
            1.0,
            full,
            false,
            BOUNDARY_PADDING,
        );

        // Mirrored along -x and -y from the opposite corner.
        let up = Rect::new(Point::new(0.0, -m * 8.0), Point::new(0.0, 0.0));
        let left = Rect::new(Point::new(-m * 8.0, 0.0), Point::new(0.0, 0.0));
        self.insert(
            &[GlyphBox::new(up, far), GlyphBox::new(left, far)],
            far,
            1.0,
            full,
            false,
            BOUNDARY_PADDING,
        );
    }

    /// Resolve one label against everything committed so far.
    ///
    /// Returns the zoom level (`log2` of the accepted placement scale) at
    /// which the label becomes valid plus its granted rotation range, or
    /// `None` if no scale inside
    /// `[min_placement_scale, max_placement_scale]` avoids collision. On
    /// success the placement is committed and constrains every later call.
    pub fn place(
        &mut self,
        boxes: &[GlyphBox],
        anchor: Point,
        min_placement_scale: f32,
        max_placement_scale: f32,
        padding: f32,
        horizontal: bool,
    ) -> Option<PlacementProperty> {
        if boxes.is_empty() {
            return None;
        }

        // The label only makes sense once every one of its glyphs may show.
        let floor = boxes.iter().fold(0.0f32, |acc, b| acc.max(b.min_scale));
        let min_placement_scale = min_placement_scale.max(floor);

        // Collision checks between rotating and fixed labels are relatively
        // expensive, so horizontal labels collapse to one box per label
        // rather than one per glyph; they move as a rigid block.
        let mut glyphs: Vec<GlyphBox> = if horizontal {
            vec![merged_glyphs(boxes, horizontal, anchor)]
        } else {
            boxes.to_vec()
        };

        // Query bounds: a rotating box is circumscribed so every rotation
        // stays inside; a fixed box is queried as-is.
        for glyph in &mut glyphs {
            glyph.bounds = if glyph.rotate {
                circumscribed(glyph.rect)
            } else {
                glyph.rect
            };
        }

        let scale = scale::resolve_placement_scale(
            &self.index,
            &glyphs,
            min_placement_scale,
            max_placement_scale,
            padding,
        );
        if scale < 0.0 {
            debug!(
                "label at ({}, {}) infeasible in window [{min_placement_scale}, {max_placement_scale}]",
                anchor.x, anchor.y
            );
            return None;
        }

        let range =
            rotation::resolve_rotation_range(&self.index, &glyphs, scale, self.rotation_interval);
        self.insert(&glyphs, anchor, scale, range, horizontal, padding);

        let zoom = scale.log2();
        debug!(
            "label at ({}, {}) placed at zoom {zoom} ({} placements committed)",
            anchor.x, anchor.y,
            self.index.len()
        );
        Some(PlacementProperty { zoom, range })
    }

    fn insert(
        &mut self,
        glyphs: &[GlyphBox],
        anchor: Point,
        placement_scale: f32,
        range: PlacementRange,
        horizontal: bool,
        padding: f32,
    ) {
        for glyph in glyphs {
            let min_scale = placement_scale.max(glyph.min_scale);

            let min = Point::new(
                anchor.x + glyph.bounds.tl.x / min_scale,
                anchor.y + glyph.bounds.tl.y / min_scale,
            );
            let max = Point::new(
                anchor.x + glyph.bounds.br.x / min_scale,
                anchor.y + glyph.bounds.br.y / min_scale,
            );

            self.index.insert(
                min,
                max,
                PlacementBox {
                    anchor,
                    rect: glyph.rect,
                    bounds: glyph.bounds,
                    rotate: horizontal,
                    range,
                    placement_scale: min_scale,
                    max_scale: glyph.max_scale,
                    padding,
                },
            );
        }
    }
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Union of all glyph boxes, tagged with the strictest scale floor among
/// them. Horizontal labels are rigid, so the union loses no precision worth
/// paying per-glyph queries for.
fn merged_glyphs(boxes: &[GlyphBox], horizontal: bool, anchor: Point) -> GlyphBox {
    let inf = f32::INFINITY;
    let mut merged = GlyphBox::new(
        Rect::new(Point::new(inf, inf), Point::new(-inf, -inf)),
        anchor,
    );
    merged.rotate = horizontal;

    for glyph in boxes {
        merged.rect = merged.rect.union(&glyph.rect);
        merged.min_scale = merged.min_scale.max(glyph.min_scale);
    }

    merged.bounds = merged.rect;
    merged
}

/// Square centered on the anchor whose half-extent is the box's farthest
/// corner distance; covers the box under any rotation.
fn circumscribed(rect: Rect) -> Rect {
    let x12 = rect.tl.x * rect.tl.x;
    let y12 = rect.tl.y * rect.tl.y;
    let x22 = rect.br.x * rect.br.x;
    let y22 = rect.br.y * rect.br.y;
    let diag = (x12 + y12)
        .max(x12 + y22)
        .max(x22 + y12)
        .max(x22 + y22)
        .sqrt();
    Rect::new(Point::new(-diag, -diag), Point::new(diag, diag))
}
