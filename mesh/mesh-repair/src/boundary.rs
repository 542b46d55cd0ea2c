//! Boundary edge extraction and the boundary graph.
//!
//! The boundary graph is the undirected graph formed by all edges with
//! exactly one incident face. Non-manifold edges (three or more faces) are
//! not part of it.

use hashbrown::{HashMap, HashSet};
use mesh_types::IndexedMesh;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::MeshAdjacency;
use crate::error::RepairResult;

/// An edge used by exactly one face, in the direction that face winds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundaryEdge {
    /// Start vertex in the face's winding.
    pub from: u32,
    /// End vertex in the face's winding.
    pub to: u32,
    /// The single incident face.
    pub face: usize,
}

/// Collect the boundary edges of a mesh in first-appearance order.
///
/// # Errors
///
/// Returns [`RepairError::InvalidIndex`](crate::RepairError::InvalidIndex) if
/// any face references a missing vertex.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::boundary_edges;
///
/// let mut cube = unit_cube();
/// assert!(boundary_edges(&cube).unwrap().is_empty());
///
/// cube.faces.truncate(10); // drop the right side
/// assert_eq!(boundary_edges(&cube).unwrap().len(), 4);
/// ```
pub fn boundary_edges(mesh: &IndexedMesh) -> RepairResult<Vec<BoundaryEdge>> {
    mesh.validate_indices()?;
    let adjacency = MeshAdjacency::build(&mesh.faces);
    let edges: Vec<_> = adjacency.boundary_edges().collect();
    debug!("Collected {} boundary edges", edges.len());
    Ok(edges)
}

/// Undirected adjacency over boundary edges.
///
/// Vertices and each vertex's neighbor list are kept in insertion order,
/// which makes loop tracing deterministic for a given face order.
#[derive(Debug, Clone, Default)]
pub struct BoundaryGraph {
    order: Vec<u32>,
    neighbors: HashMap<u32, Vec<u32>>,
    winding: HashSet<(u32, u32)>,
    edge_count: usize,
}

impl BoundaryGraph {
    /// Build the graph from boundary edges.
    ///
    /// Duplicate edges (in either direction) are added once.
    #[must_use]
    pub fn from_edges(edges: &[BoundaryEdge]) -> Self {
        let mut graph = Self::default();
        for edge in edges {
            graph.add_edge(edge.from, edge.to);
        }
        graph
    }

    /// Build the graph from a mesh adjacency.
    #[must_use]
    pub fn from_adjacency(adjacency: &MeshAdjacency) -> Self {
        let mut graph = Self::default();
        for edge in adjacency.boundary_edges() {
            graph.add_edge(edge.from, edge.to);
        }
        graph
    }

    fn add_edge(&mut self, from: u32, to: u32) {
        if from == to || self.winding.contains(&(from, to)) || self.winding.contains(&(to, from)) {
            return;
        }
        self.winding.insert((from, to));
        self.edge_count += 1;

        for (v, n) in [(from, to), (to, from)] {
            let list = self.neighbors.entry(v).or_insert_with(|| {
                self.order.push(v);
                Vec::with_capacity(2)
            });
            list.push(n);
        }
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.order.iter().copied()
    }

    /// Boundary neighbors of `v` in insertion order.
    #[must_use]
    pub fn neighbors(&self, v: u32) -> &[u32] {
        self.neighbors.get(&v).map_or(&[], Vec::as_slice)
    }

    /// Number of boundary edges at `v`.
    #[must_use]
    pub fn degree(&self, v: u32) -> usize {
        self.neighbors(v).len()
    }

    /// Whether the incident face winds the edge from `from` to `to`.
    #[must_use]
    pub fn runs(&self, from: u32, to: u32) -> bool {
        self.winding.contains(&(from, to))
    }

    /// Number of boundary edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of vertices touched by a boundary edge.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Whether the graph has no edges (the mesh is closed or empty).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Vertices whose boundary degree is not 2, with their degree.
    ///
    /// A clean hole has every vertex at degree 2. Anything else means
    /// several holes share a vertex, or a non-manifold edge cut a loop.
    #[must_use]
    pub fn irregular_vertices(&self) -> Vec<(u32, usize)> {
        self.order
            .iter()
            .map(|&v| (v, self.degree(v)))
            .filter(|&(_, degree)| degree != 2)
            .collect()
    }
}
