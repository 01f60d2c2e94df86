use serde::{Deserialize, Serialize};

/// A 2D coordinate in tile units. Anchors are absolute; rectangle corners
/// are offsets relative to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its top-left and bottom-right corners,
/// in the coordinate frame of some anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub tl: Point,
    pub br: Point,
}

impl Rect {
    pub const fn new(tl: Point, br: Point) -> Self {
        Self { tl, br }
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            tl: Point::new(self.tl.x.min(other.tl.x), self.tl.y.min(other.tl.y)),
            br: Point::new(self.br.x.max(other.br.x), self.br.y.max(other.br.y)),
        }
    }
}

/// One candidate placement unit: the true glyph extent (`rect`), the extent
/// used for collision queries (`bounds`, circumscribed when the glyph may
/// rotate), the anchor it is rooted at, and the scale window in which the
/// glyph may ever be shown.
#[derive(Debug, Clone, Copy)]
pub struct GlyphBox {
    pub rect: Rect,
    pub bounds: Rect,
    pub anchor: Point,
    pub min_scale: f32,
    pub max_scale: f32,
    pub rotate: bool,
}

impl GlyphBox {
    /// A fixed, scale-unbounded glyph. `bounds` starts equal to `rect`; the
    /// engine recomputes it before querying.
    pub fn new(rect: Rect, anchor: Point) -> Self {
        Self {
            rect,
            bounds: rect,
            anchor,
            min_scale: 0.0,
            max_scale: f32::INFINITY,
            rotate: false,
        }
    }
}

/// A rotation interval in radians. The full circle is `[0, 2π]`; the empty
/// interval `(2π, 0)` doubles as the accumulator seed meaning "no
/// constraint".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRange {
    pub min: f32,
    pub max: f32,
}

impl PlacementRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The widening-accumulator seed: nothing constrains rotation yet.
    pub const fn unconstrained() -> Self {
        Self {
            min: std::f32::consts::TAU,
            max: 0.0,
        }
    }

    /// Every rotation angle is covered.
    pub const fn full_circle() -> Self {
        Self {
            min: 0.0,
            max: std::f32::consts::TAU,
        }
    }
}

/// The record persisted in the spatial index once a label is accepted.
/// Immutable after insertion; the index is append-only for a tile's
/// lifetime.
#[derive(Debug, Clone)]
pub struct PlacementBox {
    pub anchor: Point,
    pub rect: Rect,
    pub bounds: Rect,
    pub rotate: bool,
    pub range: PlacementRange,
    pub placement_scale: f32,
    pub max_scale: f32,
    pub padding: f32,
}

/// What the caller gets back for an accepted label: the zoom level at which
/// it becomes valid (`log2` of the accepted placement scale) and the granted
/// rotation range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementProperty {
    pub zoom: f32,
    pub range: PlacementRange,
}
