// R-tree backed store of committed placements. Insert-only: nothing is ever
// updated or removed while a tile is being laid out.

use rstar::{AABB, RTree, RTreeObject};

use super::types::{PlacementBox, Point};

/// One committed placement plus the envelope it was indexed under. The
/// envelope is kept explicit because the rotation resolver compares against
/// the insertion-time box, not a recomputed one.
#[derive(Debug, Clone)]
pub(crate) struct IndexEntry {
    pub min: Point,
    pub max: Point,
    pub placement: PlacementBox,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min.x, self.min.y], [self.max.x, self.max.y])
    }
}

#[derive(Debug, Default)]
pub(crate) struct PlacementIndex {
    tree: RTree<IndexEntry>,
}

impl PlacementIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn insert(&mut self, min: Point, max: Point, placement: PlacementBox) {
        self.tree.insert(IndexEntry {
            min,
            max,
            placement,
        });
    }

    /// All entries whose envelope intersects the query box.
    pub fn query(&self, min: Point, max: Point) -> impl Iterator<Item = &IndexEntry> {
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        self.tree.locate_in_envelope_intersecting(&envelope)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::types::{PlacementRange, Rect};

    fn placement_at(x: f32, y: f32) -> PlacementBox {
        let rect = Rect::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0));
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
    fn query_finds_intersecting_entries_only() {
        let mut index = PlacementIndex::new();
        index.insert(Point::new(0.0, 0.0), Point::new(10.0, 10.0), placement_at(5.0, 5.0));
        index.insert(
            Point::new(100.0, 100.0),
            Point::new(110.0, 110.0),
            placement_at(105.0, 105.0),
        );

        let hits: Vec<_> = index.query(Point::new(5.0, 5.0), Point::new(15.0, 15.0)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].placement.anchor, Point::new(5.0, 5.0));

        let misses: Vec<_> = index.query(Point::new(20.0, 20.0), Point::new(30.0, 30.0)).collect();
        assert!(misses.is_empty());
    }

    #[test]
    fn zero_width_envelopes_are_queryable() {
        // The boundary guards are degenerate crosses collapsed to a line.
        let mut index = PlacementIndex::new();
        index.insert(Point::new(0.0, 0.0), Point::new(0.0, 1000.0), placement_at(0.0, 0.0));

        let hits: Vec<_> = index
            .query(Point::new(-5.0, 40.0), Point::new(5.0, 60.0))
            .collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn grows_by_one_per_insert() {
        let mut index = PlacementIndex::new();
        for i in 0..8 {
            let at = i as f32 * 20.0;
            index.insert(Point::new(at, at), Point::new(at + 10.0, at + 10.0), placement_at(at, at));
        }
        assert_eq!(index.len(), 8);
    }
}
