//! Stored triangles and the handles that reference them

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector3};

/// Handle of a triangle inside a [`TriangleStore`](crate::store::TriangleStore).
///
/// Spatial indexes store these instead of references, so the store can be moved
/// freely once built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub(crate) usize);

impl TriangleId {
    /// Wrap a raw position in the store.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the triangle in its store, which is also its position in the
    /// source mesh's index buffer divided by three.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A triangle holding its three vertex positions by value.
///
/// The vertex order is the winding order; the unit normal follows the right-hand rule
/// over `(v1 - v0) × (v2 - v0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<Real>; 3],
}

impl Triangle {
    pub const fn new(v0: Point3<Real>, v1: Point3<Real>, v2: Point3<Real>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Component-wise min/max of the three vertices.
    pub fn bounding_box(&self) -> Aabb {
        let [a, b, c] = &self.vertices;
        Aabb::new(a.inf(b).inf(c), a.sup(b).sup(c))
    }

    /// Unit normal, or `None` when the triangle is degenerate under `tolerance`.
    ///
    /// Degenerate means `|e1 × e2|² <= tolerance * |e1|² * |e2|²`: zero area, collinear
    /// vertices, repeated vertices, or coordinates large enough to overflow.
    pub fn unit_normal(&self, tolerance: Real) -> Option<Vector3<Real>> {
        let [a, b, c] = &self.vertices;
        let e1 = b - a;
        let e2 = c - a;
        let n = e1.cross(&e2);
        let len2 = n.norm_squared();

        // Written as a negated `>` so NaN lands on the degenerate side
        if !(len2 > tolerance * e1.norm_squared() * e2.norm_squared()) {
            return None;
        }
        Some(n / len2.sqrt())
    }

    /// True when [`Triangle::unit_normal`] would return `None`.
    pub fn is_degenerate(&self, tolerance: Real) -> bool {
        self.unit_normal(tolerance).is_none()
    }

    /// Edge `i` runs from vertex `i` to vertex `(i + 1) % 3`.
    pub fn edge(&self, i: usize) -> (Point3<Real>, Point3<Real>) {
        (self.vertices[i % 3], self.vertices[(i + 1) % 3])
    }
}

impl From<[Point3<Real>; 3]> for Triangle {
    fn from(vertices: [Point3<Real>; 3]) -> Self {
        Self { vertices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::tolerance;

    #[test]
    fn bounding_box_spans_vertices() {
        let tri = Triangle::new(
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-1.0, 4.0, 0.0),
            Point3::new(0.5, 0.0, 7.0),
        );
        let aabb = tri.bounding_box();
        assert_eq!(aabb.mins, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.maxs, Point3::new(1.0, 4.0, 7.0));
    }

    #[test]
    fn unit_normal_follows_winding() {
        let ccw = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(ccw.unit_normal(tolerance()), Some(Vector3::z()));

        let cw = Triangle::new(ccw.vertices[0], ccw.vertices[2], ccw.vertices[1]);
        assert_eq!(cw.unit_normal(tolerance()), Some(-Vector3::z()));
    }

    #[test]
    fn collinear_and_repeated_vertices_are_degenerate() {
        let collinear = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert!(collinear.is_degenerate(tolerance()));

        let repeated = Triangle::new(
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(repeated.is_degenerate(tolerance()));
    }

    #[test]
    fn sliver_is_not_degenerate_at_small_scale() {
        // Tiny but well-shaped: degeneracy is scale independent
        let tri = Triangle::new(
            Point3::origin(),
            Point3::new(1e-4, 0.0, 0.0),
            Point3::new(0.0, 1e-4, 0.0),
        );
        assert!(!tri.is_degenerate(tolerance()));
    }

    #[test]
    fn edges_wrap_around() {
        let tri = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(tri.edge(2), (tri.vertices[2], tri.vertices[0]));
    }
}
