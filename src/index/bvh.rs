//! Bulk-built bounding volume hierarchy.
//!
//! Nodes live in an arena `Vec` and link to each other by position. Leaves own a
//! contiguous range of the (reordered) entry list, so a built tree is two flat vectors.

use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::index::{SearchRegion, SpatialIndex, Traversal};
use crate::triangle::TriangleId;
use nalgebra::Point3;
use std::cmp::Ordering;
use std::fmt::Debug;
use tracing::debug;

/// Default maximum number of entries per leaf.
pub const DEFAULT_MAX_LEAF: usize = 4;

/// Binary BVH built top-down by median split along the longest axis of the
/// entry centroids.
///
/// Entries inserted after [`finish`](SpatialIndex::finish) invalidate the tree; searches
/// on an unfinished index fall back to a linear scan until `finish` is called again.
#[derive(Clone)]
pub struct BvhIndex {
    max_leaf: usize,
    entries: Vec<Entry>,
    nodes: Vec<Node>,
    built: bool,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    aabb: Aabb,
    centroid: Point3<Real>,
    id: TriangleId,
}

#[derive(Clone, Copy, Debug)]
struct Node {
    aabb: Aabb,
    kind: Kind,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    /// Entries `start..end`
    Leaf { start: usize, end: usize },
    Internal { left: NodeIdx, right: NodeIdx },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn get(self) -> usize {
        self.0
    }
}

impl Default for BvhIndex {
    fn default() -> Self {
        Self::with_max_leaf(DEFAULT_MAX_LEAF)
    }
}

impl Debug for BvhIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BvhIndex")
            .field("max_leaf", &self.max_leaf)
            .field("entries", &self.entries.len())
            .field("nodes", &self.nodes.len())
            .field("built", &self.built)
            .finish_non_exhaustive()
    }
}

impl BvhIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// A BVH whose leaves hold at most `max_leaf` entries (at least 1).
    pub fn with_max_leaf(max_leaf: usize) -> Self {
        Self {
            max_leaf: max_leaf.max(1),
            entries: Vec::new(),
            nodes: Vec::new(),
            built: false,
        }
    }

    pub const fn max_leaf(&self) -> usize {
        self.max_leaf
    }

    /// True once `finish` has run and no insert happened since.
    pub const fn is_built(&self) -> bool {
        self.built
    }

    /// Number of tree nodes (0 before `finish` or for an empty index).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut deepest = 0;
        let mut stack = vec![(NodeIdx(0), 1)];
        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Kind::Internal { left, right } = self.nodes[idx.get()].kind {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
        deepest
    }

    /// Bounding box of everything in the index, if built and non-empty.
    pub fn root_aabb(&self) -> Option<Aabb> {
        self.nodes.first().map(|node| node.aabb)
    }

    fn merged_aabb(entries: &[Entry]) -> Aabb {
        let mut it = entries.iter();
        match it.next() {
            Some(first) => it.fold(first.aabb, |acc, e| acc.merged(&e.aabb)),
            None => Aabb::new_invalid(),
        }
    }

    /// Build the subtree over `entries[start..end]` and return its node.
    fn build_range(&mut self, start: usize, end: usize) -> NodeIdx {
        let idx = NodeIdx(self.nodes.len());
        let range = &mut self.entries[start..end];
        let aabb = Self::merged_aabb(range);

        if range.len() <= self.max_leaf {
            self.nodes.push(Node {
                aabb,
                kind: Kind::Leaf { start, end },
            });
            return idx;
        }

        // Placeholder until both children exist
        self.nodes.push(Node {
            aabb,
            kind: Kind::Leaf { start, end },
        });

        let first = range[0].centroid;
        let (lo, hi) = range
            .iter()
            .fold((first, first), |(lo, hi), e| (lo.inf(&e.centroid), hi.sup(&e.centroid)));
        let axis = (hi - lo).imax();

        let mid = range.len() / 2;
        range.select_nth_unstable_by(mid, |a, b| {
            a.centroid[axis]
                .partial_cmp(&b.centroid[axis])
                .unwrap_or(Ordering::Equal)
        });

        let left = self.build_range(start, start + mid);
        let right = self.build_range(start + mid, end);
        self.nodes[idx.get()].kind = Kind::Internal { left, right };
        idx
    }

    fn scan<F>(
        entries: &[Entry],
        center: &Point3<Real>,
        radius: Real,
        region: SearchRegion,
        visitor: &mut F,
    ) -> Traversal
    where
        F: FnMut(TriangleId) -> Traversal,
    {
        for entry in entries {
            if region.intersects(center, radius, &entry.aabb) && visitor(entry.id) == Traversal::Stop
            {
                return Traversal::Stop;
            }
        }
        Traversal::Continue
    }
}

impl SpatialIndex for BvhIndex {
    fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    fn insert(&mut self, aabb: Aabb, id: TriangleId) {
        if self.built {
            self.built = false;
            self.nodes.clear();
        }
        self.entries.push(Entry {
            aabb,
            centroid: aabb.center(),
            id,
        });
    }

    fn finish(&mut self) {
        if self.built {
            return;
        }
        self.nodes.clear();
        if !self.entries.is_empty() {
            // Roughly two nodes per full leaf
            self.nodes.reserve(2 * self.entries.len().div_ceil(self.max_leaf));
            self.build_range(0, self.entries.len());
        }
        self.built = true;

        debug!(
            entries = self.entries.len(),
            nodes = self.nodes.len(),
            depth = self.depth(),
            max_leaf = self.max_leaf,
            "built bvh index"
        );
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn search_region<F>(
        &self,
        center: &Point3<Real>,
        radius: Real,
        region: SearchRegion,
        mut visitor: F,
    ) -> Traversal
    where
        F: FnMut(TriangleId) -> Traversal,
    {
        if !self.built {
            return Self::scan(&self.entries, center, radius, region, &mut visitor);
        }
        if self.nodes.is_empty() {
            return Traversal::Continue;
        }

        let mut stack = vec![NodeIdx(0)];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx.get()];
            if !region.intersects(center, radius, &node.aabb) {
                continue;
            }
            match node.kind {
                Kind::Leaf { start, end } => {
                    let flow =
                        Self::scan(&self.entries[start..end], center, radius, region, &mut visitor);
                    if flow == Traversal::Stop {
                        return Traversal::Stop;
                    }
                },
                Kind::Internal { left, right } => {
                    stack.push(right);
                    stack.push(left);
                },
            }
        }
        Traversal::Continue
    }
}
