//! Error types for mesh repair operations.

use mesh_types::InvalidFaceIndex;
use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during mesh repair.
///
/// Only conditions that make the whole operation meaningless are errors.
/// Holes that cannot be capped are reported as
/// [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepairError {
    /// A face references a vertex that does not exist.
    #[error("invalid vertex index {index} in face {face} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// The face holding the bad index.
        face: usize,
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A boundary walk took more steps than there are boundary edges.
    ///
    /// Every step consumes one edge, so this signals a broken traversal
    /// invariant rather than a bad input.
    #[error("boundary walk from vertex {start} did not terminate after {steps} steps")]
    UnreachableState {
        /// Start vertex of the runaway walk.
        start: u32,
        /// Steps taken when the walk was aborted.
        steps: usize,
    },
}

impl From<InvalidFaceIndex> for RepairError {
    fn from(err: InvalidFaceIndex) -> Self {
        Self::InvalidIndex {
            face: err.face,
            index: err.index,
            vertex_count: err.vertex_count,
        }
    }
}
