//! `TriangleStore`: the flattened, immutable triangle list a query structure owns

use crate::errors::MeshError;
use crate::mesh::Mesh;
use crate::triangle::{Triangle, TriangleId};
use std::ops::Index;

/// Triangles materialized from a [`Mesh`], in index-buffer order.
///
/// Sized exactly once at construction and never resized, so a [`TriangleId`] handed
/// out by [`TriangleStore::iter`] stays valid for the store's lifetime.
#[derive(Clone, Debug, Default)]
pub struct TriangleStore {
    triangles: Vec<Triangle>,
}

impl TriangleStore {
    /// Validate `mesh` and copy the vertex positions of each of its triangles.
    pub fn from_mesh(mesh: &Mesh) -> Result<Self, MeshError> {
        mesh.validate()?;

        let mut triangles = Vec::with_capacity(mesh.triangle_count());
        triangles.extend(mesh.triangles().map(Triangle::from));

        Ok(Self { triangles })
    }

    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate over `(id, triangle)` pairs in store order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (TriangleId, &Triangle)> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .map(|(i, tri)| (TriangleId::new(i), tri))
    }
}

impl Index<TriangleId> for TriangleStore {
    type Output = Triangle;

    fn index(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }
}
