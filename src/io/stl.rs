use crate::errors::MeshError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::Point3;
use std::io::Cursor;

impl Mesh {
    /// Create a Mesh from ASCII or binary STL data using `stl_io`.
    ///
    /// Coincident STL vertices are shared, so the result has an index buffer
    /// rather than a triangle soup. The facet winding is kept as stored.
    pub fn from_stl(stl_data: &[u8]) -> Result<Mesh, MeshError> {
        let mut cursor = Cursor::new(stl_data);
        let stl = stl_io::read_stl(&mut cursor)?;

        #[allow(clippy::unnecessary_cast)]
        let vertices = stl
            .vertices
            .iter()
            .map(|v| Point3::new(v[0] as Real, v[1] as Real, v[2] as Real))
            .collect();

        let mut indices = Vec::with_capacity(stl.faces.len() * 3);
        for face in &stl.faces {
            indices.extend(face.vertices.iter().map(|&i| i as u32));
        }

        let mesh = Mesh::new(vertices, indices);
        mesh.validate()?;
        Ok(mesh)
    }
}
