//! Flat vector index with linear scans.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::index::{SearchRegion, SpatialIndex, Traversal};
use crate::triangle::TriangleId;
use nalgebra::Point3;

/// Every entry is tested against every search region.
#[derive(Clone, Debug, Default)]
pub struct FlatIndex {
    entries: Vec<(Aabb, TriangleId)>,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }
}

impl SpatialIndex for FlatIndex {
    fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    fn insert(&mut self, aabb: Aabb, id: TriangleId) {
        self.entries.push((aabb, id));
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
        for (aabb, id) in &self.entries {
            if region.intersects(center, radius, aabb) && visitor(*id) == Traversal::Stop {
                return Traversal::Stop;
            }
        }
        Traversal::Continue
    }
}
