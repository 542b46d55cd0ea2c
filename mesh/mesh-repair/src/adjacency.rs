//! Mesh adjacency data structures.
//!
//! Provides edge-to-face and vertex-to-face lookups. Edges are keyed by their
//! canonical `(min, max)` form and kept in first-appearance order, so every
//! iteration over them is deterministic.

use hashbrown::HashMap;

use crate::boundary::BoundaryEdge;

/// One unique edge and the faces that use it.
#[derive(Debug, Clone)]
struct EdgeEntry {
    /// Canonical key, `v0 < v1`.
    key: (u32, u32),
    /// Direction in which the first incident face traverses the edge.
    directed: (u32, u32),
    /// Incident faces, in face order.
    faces: Vec<usize>,
}

/// Adjacency information for a mesh.
///
/// Provides lookups for:
/// - Faces adjacent to an edge
/// - Faces adjacent to a vertex
/// - Boundary edges (edges with exactly one adjacent face)
/// - Non-manifold edges (edges with more than two adjacent faces)
///
/// Edges are recorded in the order faces introduce them: face by face, and
/// within a face `(v0, v1)`, `(v1, v2)`, `(v2, v0)`. Collapsed edges whose two
/// endpoints are the same vertex are ignored.
#[derive(Debug, Clone, Default)]
pub struct MeshAdjacency {
    /// Unique edges in first-appearance order.
    edges: Vec<EdgeEntry>,
    /// Maps canonical edge to its position in `edges`.
    edge_index: HashMap<(u32, u32), usize>,
    /// Maps vertex index to list of face indices.
    vertex_to_faces: HashMap<u32, Vec<usize>>,
}

impl MeshAdjacency {
    /// Build adjacency information from a list of faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_repair::MeshAdjacency;
    ///
    /// let faces = vec![[0, 1, 2], [1, 3, 2]];
    /// let adj = MeshAdjacency::build(&faces);
    ///
    /// assert_eq!(adj.edge_count(), 5);
    /// assert_eq!(adj.boundary_edge_count(), 4);
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut adjacency = Self::default();

        for (face_idx, face) in faces.iter().enumerate() {
            for &v in face {
                let list = adjacency.vertex_to_faces.entry(v).or_default();
                if list.last() != Some(&face_idx) {
                    list.push(face_idx);
                }
            }

            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                if a != b {
                    adjacency.add_edge(a, b, face_idx);
                }
            }
        }

        adjacency
    }

    fn add_edge(&mut self, a: u32, b: u32, face_idx: usize) {
        let key = normalize_edge(a, b);
        let slot = *self.edge_index.entry(key).or_insert_with(|| {
            self.edges.push(EdgeEntry {
                key,
                directed: (a, b),
                faces: Vec::with_capacity(2),
            });
            self.edges.len() - 1
        });
        self.edges[slot].faces.push(face_idx);
    }

    /// Get faces adjacent to an edge, in either direction.
    ///
    /// Returns `None` if the edge doesn't exist in the mesh.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[usize]> {
        self.edge_index
            .get(&normalize_edge(v0, v1))
            .map(|&slot| self.edges[slot].faces.as_slice())
    }

    /// Number of faces using an edge (0 if absent).
    #[must_use]
    pub fn edge_face_count(&self, v0: u32, v1: u32) -> usize {
        self.faces_for_edge(v0, v1).map_or(0, <[usize]>::len)
    }

    /// Get faces adjacent to a vertex.
    ///
    /// Returns an empty slice if the vertex has no adjacent faces.
    #[must_use]
    pub fn faces_for_vertex(&self, v: u32) -> &[usize] {
        self.vertex_to_faces.get(&v).map_or(&[], Vec::as_slice)
    }

    /// Iterate over canonical edges with their incident face counts,
    /// in first-appearance order.
    pub fn edges(&self) -> impl Iterator<Item = ((u32, u32), usize)> + '_ {
        self.edges.iter().map(|e| (e.key, e.faces.len()))
    }

    /// Iterate over boundary edges (exactly one adjacent face), in
    /// first-appearance order.
    ///
    /// Each edge is reported in the direction its face traverses it.
    pub fn boundary_edges(&self) -> impl Iterator<Item = BoundaryEdge> + '_ {
        self.edges
            .iter()
            .filter(|e| e.faces.len() == 1)
            .map(|e| BoundaryEdge {
                from: e.directed.0,
                to: e.directed.1,
                face: e.faces[0],
            })
    }

    /// Count the number of boundary edges.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.faces.len() == 1).count()
    }

    /// Iterate over non-manifold edges (more than two adjacent faces).
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges
            .iter()
            .filter(|e| e.faces.len() > 2)
            .map(|e| e.key)
    }

    /// Count the number of non-manifold edges.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.faces.len() > 2).count()
    }

    /// Check if the mesh is manifold (all edges have at most 2 adjacent faces).
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edges.iter().all(|e| e.faces.len() <= 2)
    }

    /// Check if the mesh is watertight: every edge has exactly two faces.
    ///
    /// A mesh without edges is vacuously watertight.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edges.iter().all(|e| e.faces.len() == 2)
    }

    /// Get the total number of unique edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of vertices referenced by at least one face.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_to_faces.len()
    }
}

/// Normalize edge direction so v0 < v1.
#[inline]
pub(crate) fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
