//! Mesh validation errors

use crate::float_types::Real;
use nalgebra::Point3;

/// All the possible problems we might encounter while turning a mesh into a query structure.
///
/// The structural variants form the *invalid mesh* category, see
/// [`MeshError::is_invalid_mesh`].
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// (IndexCountNotMultipleOfThree) The index buffer does not describe a whole number of triangles
    #[error("(IndexCountNotMultipleOfThree) The index buffer length {len} is not a multiple of 3")]
    IndexCountNotMultipleOfThree { len: usize },

    /// (IndexOutOfRange) A triangle references a vertex that does not exist
    #[error(
        "(IndexOutOfRange) Triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist"
    )]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// (InvalidCoordinate) A referenced vertex has a NaN or infinite coordinate
    #[error("(InvalidCoordinate) Vertex {index} ({point}) has a NaN or infinite coordinate")]
    InvalidCoordinate { index: u32, point: Point3<Real> },

    /// (TooManyVertices) A vertex buffer too long to address with `u32` indices
    #[error("(TooManyVertices) {count} vertices cannot be addressed with u32 indices")]
    TooManyVertices { count: usize },

    /// (IndexNotEmpty) The spatial index handed to the query already holds entries
    #[error("(IndexNotEmpty) The spatial index already holds {len} entries")]
    IndexNotEmpty { len: usize },

    /// Reading mesh data failed
    #[cfg(feature = "stl-io")]
    #[error("(Io) {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// True for every variant that describes a malformed mesh, as opposed to a failure
    /// to read one or a misused index.
    pub const fn is_invalid_mesh(&self) -> bool {
        match self {
            MeshError::IndexCountNotMultipleOfThree { .. }
            | MeshError::IndexOutOfRange { .. }
            | MeshError::InvalidCoordinate { .. }
            | MeshError::TooManyVertices { .. } => true,
            MeshError::IndexNotEmpty { .. } => false,
            #[cfg(feature = "stl-io")]
            MeshError::Io(_) => false,
        }
    }
}
