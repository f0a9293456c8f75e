//! Spatial index backing the `geopoly` virtual table.
//!
//! Wrapped behind a small trait so the rest of the virtual table never
//! touches `rstar` directly - the shape this takes is lifted from the
//! teacher's own `RTreeObject`/`AABB` wrapping of selectable geometry, just
//! retargeted from screen-space selection to rowid lookup.

use rstar::{RTree, RTreeObject, AABB};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    rowid: i64,
    min: [f32; 2],
    max: [f32; 2],
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// A bounding-box index keyed by rowid. Lookups return rowids whose stored
/// bounding box intersects the query box; exact polygon containment or
/// overlap is always re-checked by the caller afterward; this only prunes
/// candidates the way the MATCH-query / BestIndex cost model expects.
pub trait SpatialIndex {
    fn insert(&mut self, rowid: i64, bbox: [f32; 4]);
    fn remove(&mut self, rowid: i64, bbox: [f32; 4]);
    fn query(&self, bbox: [f32; 4]) -> Vec<i64>;
    fn len(&self) -> usize;
}

#[derive(Default)]
pub struct RstarIndex {
    tree: RTree<Entry>,
}

impl SpatialIndex for RstarIndex {
    fn insert(&mut self, rowid: i64, bbox: [f32; 4]) {
        self.tree.insert(Entry {
            rowid,
            min: [bbox[0], bbox[1]],
            max: [bbox[2], bbox[3]],
        });
    }

    fn remove(&mut self, rowid: i64, bbox: [f32; 4]) {
        self.tree.remove(&Entry {
            rowid,
            min: [bbox[0], bbox[1]],
            max: [bbox[2], bbox[3]],
        });
    }

    fn query(&self, bbox: [f32; 4]) -> Vec<i64> {
        let envelope = AABB::from_corners([bbox[0], bbox[1]], [bbox[2], bbox[3]]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|e| e.rowid)
            .collect()
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_returns_only_intersecting_boxes() {
        let mut idx = RstarIndex::default();
        idx.insert(1, [0.0, 0.0, 1.0, 1.0]);
        idx.insert(2, [10.0, 10.0, 11.0, 11.0]);
        let hits = idx.query([0.5, 0.5, 0.6, 0.6]);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn remove_drops_the_entry() {
        let mut idx = RstarIndex::default();
        idx.insert(1, [0.0, 0.0, 1.0, 1.0]);
        idx.remove(1, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(idx.len(), 0);
    }
}
