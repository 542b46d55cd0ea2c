//! Read-only mesh views.

use crate::{Aabb, Triangle};

/// Counts and checked face lookup.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces.
    fn face_count(&self) -> usize;

    /// True when there is nothing to draw: no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Face `face_index` with its corners resolved.
    ///
    /// `None` if the face does not exist or references a missing vertex.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;
}

/// Spatial extent.
pub trait MeshBounds {
    /// Bounding box of all vertices; empty when there are none.
    fn bounds(&self) -> Aabb;

    /// Length of the bounding-box diagonal, or 0.0 when empty.
    fn diagonal(&self) -> f64 {
        self.bounds().diagonal()
    }
}
