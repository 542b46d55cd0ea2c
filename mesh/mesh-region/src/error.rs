//! Error types for ROI extraction.

use mesh_types::InvalidFaceIndex;
use thiserror::Error;

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionError>;

/// Errors that can occur during region operations.
///
/// An ROI that selects nothing is not an error; it yields an empty mesh.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegionError {
    /// A face references a vertex that does not exist.
    #[error("invalid vertex index {index} in face {face} (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex {
        /// The face holding the bad index.
        face: usize,
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },
}

impl From<InvalidFaceIndex> for RegionError {
    fn from(err: InvalidFaceIndex) -> Self {
        Self::InvalidVertexIndex {
            face: err.face,
            index: err.index,
            vertex_count: err.vertex_count,
        }
    }
}
