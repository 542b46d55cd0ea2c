//! Recoverable conditions found while tracing and capping holes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A non-fatal problem encountered during boundary tracing or hole filling.
///
/// Every diagnostic is also emitted as a `tracing` warning. The affected
/// loop is left open; the rest of the mesh is still processed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Diagnostic {
    /// A boundary vertex with other than two boundary neighbors.
    ///
    /// Tracing continues through it with a deterministic tie-break.
    NonManifoldBoundary {
        /// The vertex.
        vertex: u32,
        /// Its number of boundary edges.
        degree: usize,
    },

    /// A boundary walk ran into a dead end before returning to its start.
    OpenChain {
        /// First vertex of the chain.
        start: u32,
        /// Vertex where the walk stopped.
        end: u32,
        /// Number of vertices in the chain.
        length: usize,
    },

    /// A closed loop with fewer than three vertices.
    DegenerateLoop {
        /// Index of the loop in the trace.
        loop_index: usize,
        /// Number of vertices in the loop.
        length: usize,
    },

    /// The loop's centroid coincides with an existing vertex, so a fan
    /// would contain zero-area triangles.
    CentroidCoincident {
        /// Index of the loop in the trace.
        loop_index: usize,
        /// The existing vertex at the centroid.
        vertex: u32,
    },

    /// The loop has more edges than the configured limit.
    HoleTooLarge {
        /// Index of the loop in the trace.
        loop_index: usize,
        /// Number of edges in the loop.
        edges: usize,
        /// Configured maximum.
        max_edges: usize,
    },
}

impl Diagnostic {
    /// Whether this diagnostic means a hole was left unfilled.
    #[must_use]
    pub const fn leaves_hole(&self) -> bool {
        !matches!(self, Self::NonManifoldBoundary { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonManifoldBoundary { vertex, degree } => {
                write!(f, "boundary vertex {vertex} has {degree} boundary edges")
            }
            Self::OpenChain { start, end, length } => {
                write!(f, "open boundary chain {start}..{end} ({length} vertices)")
            }
            Self::DegenerateLoop { loop_index, length } => {
                write!(f, "loop {loop_index} has only {length} vertices")
            }
            Self::CentroidCoincident { loop_index, vertex } => {
                write!(f, "loop {loop_index} centroid coincides with vertex {vertex}")
            }
            Self::HoleTooLarge {
                loop_index,
                edges,
                max_edges,
            } => write!(f, "loop {loop_index} has {edges} edges (max {max_edges})"),
        }
    }
}
