//! Boundary loop tracing and hole detection.
//!
//! A hole is a closed loop of boundary edges (edges with only one adjacent
//! face). Loops are traced over the [`BoundaryGraph`] with an explicit,
//! bounded walk; no recursion is involved.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_repair::find_boundary_loops;
//!
//! // A cube missing its top (faces 2 and 3) has one square hole.
//! let mut mesh = unit_cube();
//! mesh.faces.drain(2..4);
//!
//! let loops = find_boundary_loops(&mesh).unwrap();
//! assert_eq!(loops.len(), 1);
//! assert_eq!(loops[0].vertices, vec![5, 6, 7, 4]);
//! ```

use hashbrown::HashSet;
use mesh_types::IndexedMesh;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::{MeshAdjacency, normalize_edge};
use crate::boundary::BoundaryGraph;
use crate::diagnostics::Diagnostic;
use crate::error::{RepairError, RepairResult};

/// A traced run of boundary edges.
///
/// Closed loops are holes. Open chains appear only around non-manifold
/// edges; they are reported but never filled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundaryLoop {
    /// Ordered list of vertex indices. For a closed loop the last vertex
    /// connects back to the first.
    pub vertices: Vec<u32>,
    closed: bool,
}

impl BoundaryLoop {
    /// A closed loop over `vertices`.
    #[must_use]
    pub const fn new(vertices: Vec<u32>) -> Self {
        Self {
            vertices,
            closed: true,
        }
    }

    /// An open chain over `vertices`.
    #[must_use]
    pub const fn open_chain(vertices: Vec<u32>) -> Self {
        Self {
            vertices,
            closed: false,
        }
    }

    /// Number of edges in the loop.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len().saturating_sub(1)
        }
    }

    /// Whether the walk returned to its start vertex.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Check if this loop can be capped: closed, with at least 3 vertices.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.closed && self.vertices.len() >= 3
    }

    /// Iterate over the loop's edges as `(v_i, v_{i+1})`, including the
    /// closing edge of a closed loop.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.vertices.len();
        (0..self.edge_count()).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Everything a boundary trace produced.
#[derive(Debug, Clone, Default)]
pub struct LoopTrace {
    /// Loops and open chains, in trace order.
    pub loops: Vec<BoundaryLoop>,
    /// Non-fatal conditions met while tracing.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoopTrace {
    /// Iterate over closed loops only.
    pub fn closed_loops(&self) -> impl Iterator<Item = &BoundaryLoop> {
        self.loops.iter().filter(|l| l.is_closed())
    }
}

/// Trace every boundary edge of `graph` into loops.
///
/// Walks start from vertices in graph insertion order, chain endpoints (odd
/// degree) first so an open chain is traced end to end. From each vertex the
/// walk takes the first neighbor, in adjacency order, that is not the
/// previous vertex and whose edge has not been consumed. The very first step
/// prefers the edge the incident face winds *into* the start, so loops run
/// against the surrounding faces' winding and fan caps come out with
/// matching orientation.
///
/// Vertices with other than two boundary edges are reported as
/// [`Diagnostic::NonManifoldBoundary`] and walked through deterministically.
///
/// # Errors
///
/// Returns [`RepairError::UnreachableState`] if a walk exceeds the number of
/// boundary edges plus one step.
pub fn trace_loops(graph: &BoundaryGraph) -> RepairResult<LoopTrace> {
    let mut trace = LoopTrace::default();
    if graph.is_empty() {
        return Ok(trace);
    }

    for (vertex, degree) in graph.irregular_vertices() {
        warn!(
            "Boundary vertex {} has {} boundary edges (expected 2)",
            vertex, degree
        );
        trace
            .diagnostics
            .push(Diagnostic::NonManifoldBoundary { vertex, degree });
    }

    let starts: Vec<u32> = graph
        .vertices()
        .filter(|&v| graph.degree(v) % 2 == 1)
        .chain(graph.vertices())
        .collect();

    let mut walker = Walker::new(graph);
    for start in starts {
        while walker.has_unused_edge(start) {
            let traced = walker.walk(start)?;
            if !traced.is_closed() {
                let end = traced.vertices.last().copied().unwrap_or(start);
                warn!(
                    "Boundary chain {}..{} is not closed ({} vertices)",
                    start,
                    end,
                    traced.vertices.len()
                );
                trace.diagnostics.push(Diagnostic::OpenChain {
                    start,
                    end,
                    length: traced.vertices.len(),
                });
            }
            trace.loops.push(traced);
        }
    }

    debug!(
        "Traced {} boundary edges into {} loops ({} closed)",
        graph.edge_count(),
        trace.loops.len(),
        trace.closed_loops().count()
    );

    Ok(trace)
}

/// Walk state shared across all loops of one trace.
struct Walker<'a> {
    graph: &'a BoundaryGraph,
    used: HashSet<(u32, u32)>,
    max_steps: usize,
}

impl<'a> Walker<'a> {
    fn new(graph: &'a BoundaryGraph) -> Self {
        Self {
            graph,
            used: HashSet::with_capacity(graph.edge_count()),
            max_steps: graph.edge_count() + 1,
        }
    }

    fn is_used(&self, a: u32, b: u32) -> bool {
        self.used.contains(&normalize_edge(a, b))
    }

    fn has_unused_edge(&self, v: u32) -> bool {
        self.graph
            .neighbors(v)
            .iter()
            .any(|&n| !self.is_used(v, n))
    }

    fn next_from(&self, current: u32, prev: Option<u32>) -> Option<u32> {
        let mut candidates = self
            .graph
            .neighbors(current)
            .iter()
            .copied()
            .filter(|&n| Some(n) != prev && !self.is_used(current, n));

        if prev.is_none() {
            let first = candidates.clone().find(|&n| self.graph.runs(n, current));
            if first.is_some() {
                return first;
            }
        }

        candidates.next()
    }

    fn walk(&mut self, start: u32) -> RepairResult<BoundaryLoop> {
        let mut vertices = vec![start];
        let mut current = start;
        let mut prev = None;
        let mut steps = 0;

        loop {
            steps += 1;
            if steps > self.max_steps {
                return Err(RepairError::UnreachableState { start, steps });
            }

            let Some(next) = self.next_from(current, prev) else {
                return Ok(BoundaryLoop::open_chain(vertices));
            };
            self.used.insert(normalize_edge(current, next));

            if next == start {
                return Ok(BoundaryLoop::new(vertices));
            }

            vertices.push(next);
            prev = Some(current);
            current = next;
        }
    }
}

/// Find every boundary loop and open chain in the mesh.
///
/// Validates the mesh, builds the boundary graph and traces it. Use
/// [`BoundaryLoop::is_closed`] to tell holes from open chains, or
/// [`detect_holes`] to get only the fillable loops.
///
/// # Errors
///
/// Returns [`RepairError::InvalidIndex`] if any face references a missing
/// vertex, or [`RepairError::UnreachableState`] if tracing breaks down.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::find_boundary_loops;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// // A single triangle is bordered by one loop, walked against its winding.
/// let loops = find_boundary_loops(&mesh).unwrap();
/// assert_eq!(loops.len(), 1);
/// assert_eq!(loops[0].vertices, vec![0, 2, 1]);
/// ```
pub fn find_boundary_loops(mesh: &IndexedMesh) -> RepairResult<Vec<BoundaryLoop>> {
    mesh.validate_indices()?;
    let adjacency = MeshAdjacency::build(&mesh.faces);
    let trace = trace_loops(&BoundaryGraph::from_adjacency(&adjacency))?;
    Ok(trace.loops)
}

/// Detect all fillable holes: closed loops with at least three vertices.
///
/// # Errors
///
/// Returns [`RepairError::UnreachableState`] if tracing breaks down.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::{MeshAdjacency, detect_holes};
///
/// let mesh = unit_cube();
/// let adjacency = MeshAdjacency::build(&mesh.faces);
/// assert!(detect_holes(&adjacency).unwrap().is_empty());
/// ```
pub fn detect_holes(adjacency: &MeshAdjacency) -> RepairResult<Vec<BoundaryLoop>> {
    let trace = trace_loops(&BoundaryGraph::from_adjacency(adjacency))?;
    let holes: Vec<_> = trace
        .loops
        .into_iter()
        .filter(BoundaryLoop::is_valid)
        .collect();

    if !holes.is_empty() {
        info!(
            "Detected {} holes (boundary loops), sizes: {:?}",
            holes.len(),
            holes.iter().map(BoundaryLoop::edge_count).collect::<Vec<_>>()
        );
    }

    Ok(holes)
}
