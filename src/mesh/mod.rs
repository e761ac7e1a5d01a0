//! `Mesh` input type: a shared vertex buffer plus a flat triangle index buffer

use crate::errors::MeshError;
use crate::float_types::Real;
use nalgebra::Point3;

/// A triangle list mesh.
///
/// Every three consecutive entries of `indices` name one triangle by position in
/// `vertices`. The vertex order of each triangle is its winding order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Point3<Real>>,

    /// Flat triangle index buffer, `3 * triangle_count` entries
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh from an existing vertex buffer and index buffer.
    ///
    /// No validation happens here; see [`Mesh::validate`].
    pub const fn new(vertices: Vec<Point3<Real>>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Build a mesh from a triangle soup. Vertices are not shared between triangles.
    ///
    /// Fails with [`MeshError::TooManyVertices`] when the soup has more vertices than
    /// `u32` indices can address.
    pub fn from_triangles(triangles: &[[Point3<Real>; 3]]) -> Result<Self, MeshError> {
        let indices = soup_indices(triangles.len() * 3)?;
        let vertices = triangles.iter().flatten().copied().collect();
        Ok(Self { vertices, indices })
    }

    /// Number of triangles described by the index buffer (rounded down).
    pub const fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when the mesh has no triangles.
    pub const fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Check that the index buffer describes whole triangles, every index is in range,
    /// and every referenced vertex is finite.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree {
                len: self.indices.len(),
            });
        }

        for (triangle, face) in self.indices.chunks_exact(3).enumerate() {
            for &index in face {
                let Some(point) = self.vertices.get(index as usize) else {
                    return Err(MeshError::IndexOutOfRange {
                        triangle,
                        index,
                        vertex_count: self.vertices.len(),
                    });
                };
                if !point.coords.iter().all(|c| c.is_finite()) {
                    return Err(MeshError::InvalidCoordinate {
                        index,
                        point: *point,
                    });
                }
            }
        }

        Ok(())
    }

    /// Iterate over the vertex positions of every triangle, in index-buffer order.
    ///
    /// The mesh must have passed [`Mesh::validate`]; an out-of-range index panics.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|face| {
            [
                self.vertices[face[0] as usize],
                self.vertices[face[1] as usize],
                self.vertices[face[2] as usize],
            ]
        })
    }
}

/// `0..count` as `u32` indices.
fn soup_indices(count: usize) -> Result<Vec<u32>, MeshError> {
    let end = u32::try_from(count).map_err(|_| MeshError::TooManyVertices { count })?;
    Ok((0..end).collect())
}
