//! Test support library
//! Provides mesh builders and a brute-force oracle for query tests.

#![allow(dead_code)]

use meshprobe::{
    Mesh, Triangle,
    float_types::{
        Real,
        parry3d::{query::PointQuery, shape},
        tolerance,
    },
};
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Like [`approx_eq`], with `eps` scaled by the magnitude of the values when above 1.
pub fn rel_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() <= eps * a.abs().max(b.abs()).max(1.0)
}

/// Single counter-clockwise triangle `(0,0,0) (1,0,0) (0,1,0)`.
pub fn unit_triangle_mesh() -> Mesh {
    Mesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![0, 1, 2],
    )
}

/// Closed octahedron with vertices at `±1` on each axis, outward winding.
pub fn octahedron() -> Mesh {
    let vertices = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 2, 4,  2, 1, 4,  1, 3, 4,  3, 0, 4,
        2, 0, 5,  1, 2, 5,  3, 1, 5,  0, 3, 5,
    ];
    Mesh::new(vertices, indices)
}

/// Height field over `[0, size]²` with `cells × cells` quads split into two
/// triangles each. Heights follow a gentle bump so neighboring triangles are not
/// coplanar.
pub fn terrain(cells: u32, size: Real) -> Mesh {
    let step = size / cells as Real;
    let mut vertices = Vec::with_capacity(((cells + 1) * (cells + 1)) as usize);
    for j in 0..=cells {
        for i in 0..=cells {
            let x = i as Real * step;
            let y = j as Real * step;
            let z = 0.3 * (x * 0.7).sin() * (y * 0.5).cos();
            vertices.push(Point3::new(x, y, z));
        }
    }

    let row = cells + 1;
    let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
    for j in 0..cells {
        for i in 0..cells {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    Mesh::new(vertices, indices)
}

/// Closest point on the triangle `[a, b, c]` as computed by parry, with its squared
/// distance to `query`.
pub fn parry_closest(
    a: Point3<Real>,
    b: Point3<Real>,
    c: Point3<Real>,
    query: &Point3<Real>,
) -> (Point3<Real>, Real) {
    let projection = shape::Triangle::new(a, b, c).project_local_point(query, false);
    (projection.point, (projection.point - query).norm_squared())
}

/// Exhaustive closest point over every triangle of `mesh`, ignoring any radius.
/// Zero-area triangles are skipped, as the query does. Returns the point and its
/// squared distance.
pub fn brute_force(mesh: &Mesh, query: &Point3<Real>) -> Option<(Point3<Real>, Real)> {
    let mut best: Option<(Point3<Real>, Real)> = None;
    for [a, b, c] in mesh.triangles() {
        if Triangle::new(a, b, c).is_degenerate(tolerance()) {
            continue;
        }
        let (point, d2) = parry_closest(a, b, c, query);
        if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
            best = Some((point, d2));
        }
    }
    best
}

/// Evenly spaced query points over the box `[lo, hi]³`, `n` per axis.
pub fn sample_points(lo: Real, hi: Real, n: usize) -> Vec<Point3<Real>> {
    let step = (hi - lo) / (n.max(2) - 1) as Real;
    let mut points = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                points.push(Point3::new(
                    lo + i as Real * step,
                    lo + j as Real * step,
                    lo + k as Real * step,
                ));
            }
        }
    }
    points
}
