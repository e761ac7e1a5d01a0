//! Exact closest point on a single triangle, against a running best.
//!
//! The query point is first projected onto the triangle's plane. If the foot of the
//! perpendicular lies inside the triangle it is the answer; otherwise the answer lies on
//! one of the edges the foot is outside of, found by clamping the foot onto each of them.
//! A point can be outside at most two edges of a triangle; when it is outside two, both
//! clamps saturate toward their shared vertex, so comparing them yields that vertex.

use crate::float_types::Real;
use crate::triangle::{Triangle, TriangleId};
use nalgebra::Point3;

/// Where on a triangle a closest point lies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Inside or on the boundary of the face: the foot of the perpendicular
    Face,
    /// On edge `i`, from vertex `i` to vertex `(i + 1) % 3`, strictly between its ends
    Edge(u8),
    /// Exactly vertex `i`
    Vertex(u8),
}

/// Best candidate seen so far during one query.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Best {
    pub(crate) point: Point3<Real>,
    pub(crate) distance_squared: Real,
    pub(crate) triangle: Option<TriangleId>,
    pub(crate) feature: Feature,
}

impl Best {
    pub(crate) fn new() -> Self {
        Self {
            point: Point3::origin(),
            distance_squared: Real::INFINITY,
            triangle: None,
            feature: Feature::Face,
        }
    }

    fn accept(&mut self, point: Point3<Real>, distance_squared: Real, id: TriangleId, feature: Feature) {
        self.point = point;
        self.distance_squared = distance_squared;
        self.triangle = Some(id);
        self.feature = feature;
    }
}

/// What happened to one candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Zero-area triangle, skipped
    Degenerate,
    /// Its plane is already farther than the best candidate
    Pruned,
    /// Fully classified; `best` may or may not have improved
    Evaluated,
}

/// Update `best` with the closest point of `triangle` to `query` if it improves on it.
pub(crate) fn closest_on_triangle(
    triangle: &Triangle,
    id: TriangleId,
    query: &Point3<Real>,
    tolerance: Real,
    best: &mut Best,
) -> Outcome {
    let Some(normal) = triangle.unit_normal(tolerance) else {
        return Outcome::Degenerate;
    };
    let vert = &triangle.vertices;

    // Offset from the query point to its foot on the plane
    let projection = normal * (vert[0] - query).dot(&normal);
    let plane_distance_squared = projection.norm_squared();

    // The plane distance bounds the triangle distance from below
    if plane_distance_squared > best.distance_squared {
        return Outcome::Pruned;
    }

    let projected = query + projection;
    let mut outside_count = 0u8;
    for i in 0..3 {
        let v1 = &vert[i];
        let v2 = &vert[(i + 1) % 3];

        // Negative when the foot is on the far side of this edge, given the winding
        let outside = (v1 - projected).cross(&(v2 - projected)).dot(&normal) < 0.0;
        if outside {
            outside_count += 1;

            let edge = v2 - v1;
            let t = (edge.dot(&(projected - v1)) / edge.norm_squared()).clamp(0.0, 1.0);
            let on_edge = v1.lerp(v2, t);
            let distance_squared = (on_edge - query).norm_squared();
            if distance_squared < best.distance_squared {
                let feature = if t <= 0.0 {
                    Feature::Vertex(i as u8)
                } else if t >= 1.0 {
                    Feature::Vertex(((i + 1) % 3) as u8)
                } else {
                    Feature::Edge(i as u8)
                };
                best.accept(on_edge, distance_squared, id, feature);
            }
        }

        if outside_count > 1 {
            return Outcome::Evaluated;
        }
    }

    if outside_count == 0 && plane_distance_squared < best.distance_squared {
        best.accept(projected, plane_distance_squared, id, Feature::Face);
    }
    Outcome::Evaluated
}

/// Closest point of a single triangle to `query`, its squared distance, and the
/// feature it lies on. `None` for a degenerate triangle.
pub fn closest_point_on_triangle(
    triangle: &Triangle,
    query: &Point3<Real>,
    tolerance: Real,
) -> Option<(Point3<Real>, Real, Feature)> {
    let mut best = Best::new();
    match closest_on_triangle(triangle, TriangleId::new(0), query, tolerance, &mut best) {
        Outcome::Degenerate => None,
        _ => Some((best.point, best.distance_squared, best.feature)),
    }
}
