//! R-tree backed structure store.
//!
//! # Spatial index
//!
//! Hosts typically hold every structure they have ever seen in one flat map.
//! `StructureIndex` keeps them in an R-tree (via `rstar`) keyed by tile so a
//! cache refresh only touches the segments inside its window.

use rstar::{AABB, RTree, RTreeObject};

use crate::{Structure, StructureSource, Window};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the structure's tile as an integer point.
#[derive(Clone, Debug)]
struct IndexedStructure {
    point:     [i32; 2],
    structure: Structure,
}

impl RTreeObject for IndexedStructure {
    type Envelope = AABB<[i32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl From<Structure> for IndexedStructure {
    fn from(structure: Structure) -> Self {
        Self { point: [structure.tile.x, structure.tile.y], structure }
    }
}

// ── StructureIndex ────────────────────────────────────────────────────────────

/// Placed fences and walls, queryable by window.
#[derive(Default)]
pub struct StructureIndex {
    tree: RTree<IndexedStructure>,
}

impl StructureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load an index.  O(N log N), faster than N inserts.
    pub fn from_structures(structures: impl IntoIterator<Item = Structure>) -> Self {
        let entries: Vec<IndexedStructure> = structures.into_iter().map(Into::into).collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn insert(&mut self, structure: Structure) {
        self.tree.insert(structure.into());
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl StructureSource for StructureIndex {
    fn structures_in(&self, window: Window) -> Vec<Structure> {
        if window.side == 0 {
            return Vec::new();
        }
        let max = window.max();
        // AABB corners are inclusive.
        let envelope = AABB::from_corners(
            [window.min.x, window.min.y],
            [max.x - 1, max.y - 1],
        );
        self.tree
            .locate_in_envelope(&envelope)
            .map(|e| e.structure)
            .collect()
    }
}
