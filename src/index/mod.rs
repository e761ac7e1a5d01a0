//! Broad-phase spatial indexes over triangle bounding boxes
//!
//! The query engine only needs "insert a box with a handle" at build time and
//! "visit every handle whose box touches this region" at query time, so indexes are
//! pluggable through [`SpatialIndex`].
//!
//! - [`FlatIndex`]: linear scan over all boxes. Small, simple, and an exact oracle.
//! - [`BvhIndex`]: bulk-built bounding volume hierarchy, median split on the longest
//!   centroid axis. The default.

pub mod bvh;
pub mod flat;

pub use bvh::BvhIndex;
pub use flat::FlatIndex;

use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::triangle::TriangleId;
use nalgebra::{Point3, Vector3};

/// Traversal control returned by a search visitor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Keep visiting candidates
    Continue,
    /// Stop the search; no further candidates are visited
    Stop,
}

/// Shape of the broad-phase region around a query point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchRegion {
    /// Axis-aligned cube with half-extent `radius`
    #[default]
    Cube,
    /// Ball of radius `radius`; tighter than the cube, still conservative
    Sphere,
}

impl SearchRegion {
    /// Whether `aabb` touches the region of size `radius` around `center`.
    /// Touching boundaries count as intersecting.
    #[inline]
    pub fn intersects(&self, center: &Point3<Real>, radius: Real, aabb: &Aabb) -> bool {
        match self {
            SearchRegion::Cube => cube(center, radius).intersects(aabb),
            SearchRegion::Sphere => {
                let nearest = center.sup(&aabb.mins).inf(&aabb.maxs);
                (center - nearest).norm_squared() <= radius * radius
            },
        }
    }
}

/// The cube `center ± radius` as a bounding box.
#[inline]
pub fn cube(center: &Point3<Real>, radius: Real) -> Aabb {
    Aabb::from_half_extents(*center, Vector3::repeat(radius))
}

/// A bounding-box range index keyed by [`TriangleId`].
///
/// Usage is two-phase: any number of [`insert`](SpatialIndex::insert)s, one
/// [`finish`](SpatialIndex::finish), then read-only searches. `search_region` takes
/// `&self` and must not mutate, so a finished index can be searched from many threads.
pub trait SpatialIndex {
    /// Make room for `additional` more inserts. A hint; the default does nothing.
    fn reserve(&mut self, _additional: usize) {}

    /// Add one entry.
    fn insert(&mut self, aabb: Aabb, id: TriangleId);

    /// Build any acceleration structure over the inserted entries.
    fn finish(&mut self) {}

    /// Number of inserted entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke `visitor` once per entry whose box intersects the region, in unspecified
    /// order, until it returns [`Traversal::Stop`].
    ///
    /// Returns `Stop` if the visitor stopped the search, `Continue` if it ran to completion.
    fn search_region<F>(
        &self,
        center: &Point3<Real>,
        radius: Real,
        region: SearchRegion,
        visitor: F,
    ) -> Traversal
    where
        F: FnMut(TriangleId) -> Traversal;
}
