//! `ClosestPointQuery`: nearest point on a static triangle mesh within a search radius
//!
//! Construction copies the mesh triangles into a [`TriangleStore`] and indexes their
//! bounding boxes once. Each query asks the index for every triangle whose box touches
//! the region around the query point and runs the [`narrow`] phase on each, keeping the
//! best squared distance seen so far.

pub mod narrow;

pub use narrow::{Feature, closest_point_on_triangle};

use crate::errors::MeshError;
use crate::float_types::{Real, tolerance};
use crate::index::{BvhIndex, SearchRegion, SpatialIndex, Traversal};
use crate::mesh::Mesh;
use crate::store::TriangleStore;
use crate::triangle::{Triangle, TriangleId};
use narrow::{Best, Outcome};
use nalgebra::Point3;
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run-time query options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryConfig {
    /// Broad-phase region shape
    pub region: SearchRegion,

    /// Reject a result whose distance exceeds `max_distance`.
    ///
    /// Off by default: the broad phase is conservative, so without this a query may
    /// return a point somewhat farther than `max_distance` whose triangle box still
    /// touched the region.
    pub strict_radius: bool,
}

/// The closest point found by a query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestHit {
    /// Point on the mesh surface
    pub point: Point3<Real>,
    /// Squared distance from the query point to `point`
    pub distance_squared: Real,
    /// Triangle `point` lies on
    pub triangle: TriangleId,
    /// Region of `triangle` that `point` lies in
    pub feature: Feature,
}

impl ClosestHit {
    /// Euclidean distance from the query point.
    pub fn distance(&self) -> Real {
        self.distance_squared.sqrt()
    }
}

/// Per-query counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Candidates handed over by the broad phase
    pub visited: usize,
    /// Candidates rejected because their plane was already too far
    pub pruned: usize,
    /// Candidates skipped for having zero area
    pub degenerate: usize,
}

/// Closest-point query structure over a static mesh.
///
/// Immutable once built; `&self` queries can run concurrently from any number of
/// threads when the index is `Sync` (both bundled indexes are).
#[derive(Clone, Debug)]
pub struct ClosestPointQuery<I: SpatialIndex = BvhIndex> {
    triangles: TriangleStore,
    index: I,
    config: QueryConfig,
    tolerance: Real,
    degenerate: usize,
}

impl ClosestPointQuery<BvhIndex> {
    /// Build a query structure over `mesh` with the default BVH and options.
    ///
    /// # Example
    /// ```
    /// use meshprobe::{ClosestPointQuery, Mesh};
    /// use nalgebra::Point3;
    ///
    /// let mesh = Mesh::new(
    ///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
    ///     vec![0, 1, 2],
    /// );
    /// let query = ClosestPointQuery::new(&mesh)?;
    /// let closest = query.find_closest_point(&Point3::new(0.25, 0.25, 5.0), 10.0);
    /// assert_eq!(closest, Some(Point3::new(0.25, 0.25, 0.0)));
    /// # Ok::<(), meshprobe::errors::MeshError>(())
    /// ```
    pub fn new(mesh: &Mesh) -> Result<Self, MeshError> {
        Self::with_config(mesh, QueryConfig::default())
    }

    /// Build with the default BVH and the given options.
    pub fn with_config(mesh: &Mesh, config: QueryConfig) -> Result<Self, MeshError> {
        Self::with_index(mesh, BvhIndex::new(), config)
    }
}

impl<I: SpatialIndex> ClosestPointQuery<I> {
    /// Build over `mesh`, inserting every triangle into `index`.
    ///
    /// Fails without building anything when `mesh` is malformed, or with
    /// [`MeshError::IndexNotEmpty`] when `index` already holds entries.
    pub fn with_index(mesh: &Mesh, mut index: I, config: QueryConfig) -> Result<Self, MeshError> {
        if !index.is_empty() {
            return Err(MeshError::IndexNotEmpty { len: index.len() });
        }

        let triangles = TriangleStore::from_mesh(mesh)?;
        let tolerance = tolerance();

        index.reserve(triangles.len());

        let mut degenerate = 0;
        for (id, triangle) in triangles.iter() {
            if triangle.is_degenerate(tolerance) {
                degenerate += 1;
            }
            index.insert(triangle.bounding_box(), id);
        }
        index.finish();

        if degenerate > 0 {
            warn!(
                degenerate,
                triangles = triangles.len(),
                "mesh has zero-area triangles; they never produce a closest point"
            );
        }
        debug!(
            triangles = triangles.len(),
            vertices = mesh.vertices.len(),
            region = ?config.region,
            strict_radius = config.strict_radius,
            "built closest point query"
        );

        Ok(Self {
            triangles,
            index,
            config,
            tolerance,
            degenerate,
        })
    }

    /// Closest point on the mesh to `query_point`, searching triangles whose bounding
    /// box touches the region of size `max_distance` around it.
    ///
    /// `None` when no triangle qualifies, or when `max_distance` is negative or NaN.
    pub fn find_closest_point(
        &self,
        query_point: &Point3<Real>,
        max_distance: Real,
    ) -> Option<Point3<Real>> {
        self.closest_hit(query_point, max_distance).map(|hit| hit.point)
    }

    /// Like [`find_closest_point`](Self::find_closest_point), with distance, triangle
    /// and feature.
    pub fn closest_hit(&self, query_point: &Point3<Real>, max_distance: Real) -> Option<ClosestHit> {
        self.closest_hit_with_stats(query_point, max_distance).0
    }

    /// Like [`closest_hit`](Self::closest_hit), also reporting how many candidates the
    /// broad phase produced and what became of them.
    pub fn closest_hit_with_stats(
        &self,
        query_point: &Point3<Real>,
        max_distance: Real,
    ) -> (Option<ClosestHit>, QueryStats) {
        let mut stats = QueryStats::default();
        // Also rejects NaN
        if !(max_distance >= 0.0) {
            return (None, stats);
        }

        let mut best = Best::new();
        self.index.search_region(query_point, max_distance, self.config.region, |id| {
            // Ids the store doesn't hold can only come from a misbehaving index
            let Some(triangle) = self.triangles.get(id) else {
                return Traversal::Continue;
            };
            stats.visited += 1;
            match narrow::closest_on_triangle(triangle, id, query_point, self.tolerance, &mut best) {
                Outcome::Pruned => stats.pruned += 1,
                Outcome::Degenerate => stats.degenerate += 1,
                Outcome::Evaluated => {},
            }
            Traversal::Continue
        });

        trace!(
            visited = stats.visited,
            pruned = stats.pruned,
            degenerate = stats.degenerate,
            found = best.triangle.is_some(),
            "closest point query"
        );

        let hit = best.triangle.map(|triangle| ClosestHit {
            point: best.point,
            distance_squared: best.distance_squared,
            triangle,
            feature: best.feature,
        });
        let hit = hit.filter(|hit| {
            !self.config.strict_radius || hit.distance_squared <= max_distance * max_distance
        });
        (hit, stats)
    }

    /// Distance from `query_point` to the surface, under the same rules as
    /// [`closest_hit`](Self::closest_hit).
    pub fn distance_to_surface(&self, query_point: &Point3<Real>, max_distance: Real) -> Option<Real> {
        self.closest_hit(query_point, max_distance)
            .map(|hit| hit.distance())
    }

    /// Run [`closest_hit`](Self::closest_hit) for every point in `query_points`.
    #[cfg(not(feature = "parallel"))]
    pub fn find_closest_points(
        &self,
        query_points: &[Point3<Real>],
        max_distance: Real,
    ) -> Vec<Option<ClosestHit>> {
        query_points
            .iter()
            .map(|q| self.closest_hit(q, max_distance))
            .collect()
    }

    /// Run [`closest_hit`](Self::closest_hit) for every point in `query_points`, in parallel.
    #[cfg(feature = "parallel")]
    pub fn find_closest_points(
        &self,
        query_points: &[Point3<Real>],
        max_distance: Real,
    ) -> Vec<Option<ClosestHit>>
    where
        I: Sync,
    {
        query_points
            .par_iter()
            .map(|q| self.closest_hit(q, max_distance))
            .collect()
    }

    /// The stored triangles.
    pub fn triangles(&self) -> &TriangleStore {
        &self.triangles
    }

    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of zero-area triangles found at construction.
    pub const fn degenerate_count(&self) -> usize {
        self.degenerate
    }

    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub const fn index(&self) -> &I {
        &self.index
    }
}
