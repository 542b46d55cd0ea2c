//! Hole capping by centroid fan triangulation.
//!
//! Every closed boundary loop gets one new vertex at the mean of its loop
//! vertices, and one triangle per loop edge connecting that edge to the new
//! vertex. Loops are walked against the winding of their neighboring faces,
//! so the fan continues the surface's orientation.

use mesh_types::{Aabb, IndexedMesh, MeshBounds, Point3, Vertex};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::MeshAdjacency;
use crate::boundary::BoundaryGraph;
use crate::diagnostics::Diagnostic;
use crate::error::RepairResult;
use crate::holes::{BoundaryLoop, trace_loops};
use crate::repair::{SpatialIndex, remove_collapsed_faces, weld_vertices};

/// How close two vertices must be to count as the same point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MergeTolerance {
    /// Only bit-identical positions (with `-0.0 == 0.0`) coincide.
    #[default]
    Exact,
    /// Positions within this distance coincide.
    Absolute(f64),
    /// Positions within this fraction of the mesh's bounding-box diagonal
    /// coincide.
    RelativeToDiagonal(f64),
}

impl MergeTolerance {
    /// Resolve to an absolute distance for a mesh with the given bounds.
    ///
    /// Returns 0.0 (exact matching) for negative, NaN or infinite settings.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    /// use mesh_repair::MergeTolerance;
    ///
    /// let bounds = Aabb::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0));
    /// assert_eq!(MergeTolerance::Exact.resolve(&bounds), 0.0);
    /// assert!((MergeTolerance::RelativeToDiagonal(0.1).resolve(&bounds) - 0.5).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn resolve(&self, bounds: &Aabb) -> f64 {
        let epsilon = match *self {
            Self::Exact => 0.0,
            Self::Absolute(distance) => distance,
            Self::RelativeToDiagonal(fraction) => fraction * bounds.diagonal(),
        };
        if epsilon.is_finite() && epsilon > 0.0 {
            epsilon
        } else {
            0.0
        }
    }
}

/// Configuration for [`close_all_holes_with_params`].
///
/// # Example
///
/// ```
/// use mesh_repair::{FillParams, MergeTolerance};
///
/// // Exact merging, every hole filled
/// let params = FillParams::default();
///
/// // Scan data: merge within 1e-8 of the bounding-box diagonal
/// let params = FillParams::for_scans();
///
/// // Or customize
/// let params = FillParams::default()
///     .with_merge_tolerance(MergeTolerance::Absolute(1e-6))
///     .with_max_hole_edges(500);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FillParams {
    /// Tolerance for merging vertices and for detecting a centroid that
    /// lands on an existing vertex.
    ///
    /// Default: [`MergeTolerance::Exact`]
    pub merge_tolerance: MergeTolerance,

    /// Largest loop (in edges) that will be capped. `None` caps every loop.
    ///
    /// Default: `None`
    pub max_hole_edges: Option<usize>,

    /// Leave a loop open when its centroid coincides with an existing
    /// vertex, instead of building a fan of zero-area triangles.
    ///
    /// Default: `true`
    pub skip_coincident_centroids: bool,
}

impl Default for FillParams {
    fn default() -> Self {
        Self {
            merge_tolerance: MergeTolerance::Exact,
            max_hole_edges: None,
            skip_coincident_centroids: true,
        }
    }
}

impl FillParams {
    /// Params for 3D scan data, where duplicated seam vertices are rarely
    /// bit-identical.
    #[must_use]
    pub fn for_scans() -> Self {
        Self {
            merge_tolerance: MergeTolerance::RelativeToDiagonal(1e-8),
            ..Default::default()
        }
    }

    /// Params for CAD exports: exact merging only.
    #[must_use]
    pub fn for_cad() -> Self {
        Self::default()
    }

    /// Set the merge tolerance.
    #[must_use]
    pub const fn with_merge_tolerance(mut self, tolerance: MergeTolerance) -> Self {
        self.merge_tolerance = tolerance;
        self
    }

    /// Only cap loops with at most `max_edges` edges.
    #[must_use]
    pub const fn with_max_hole_edges(mut self, max_edges: usize) -> Self {
        self.max_hole_edges = Some(max_edges);
        self
    }

    /// Set whether loops with a coincident centroid are left open.
    #[must_use]
    pub const fn with_skip_coincident_centroids(mut self, skip: bool) -> Self {
        self.skip_coincident_centroids = skip;
        self
    }
}

/// Outcome of [`close_all_holes_with_params`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HoleFillResult {
    /// The capped and consolidated mesh.
    pub mesh: IndexedMesh,
    /// Loops capped with a fan.
    pub holes_filled: usize,
    /// Loops and open chains left as they were.
    pub holes_skipped: usize,
    /// Vertices merged away during consolidation.
    pub vertices_merged: usize,
    /// Faces dropped because consolidation collapsed them.
    pub faces_removed: usize,
    /// Everything noteworthy found along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl HoleFillResult {
    fn unchanged(mesh: IndexedMesh) -> Self {
        Self {
            mesh,
            ..Default::default()
        }
    }

    /// Check if any holes were capped or vertices merged.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.holes_filled > 0 || self.vertices_merged > 0 || self.faces_removed > 0
    }
}

impl std::fmt::Display for HoleFillResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fill: {} holes filled, {} skipped, {} verts merged, {} faces removed ({} diagnostics)",
            self.holes_filled,
            self.holes_skipped,
            self.vertices_merged,
            self.faces_removed,
            self.diagnostics.len()
        )
    }
}

/// Cap every hole in the mesh with default [`FillParams`].
///
/// The input is not modified. A mesh without boundary edges comes back as
/// an identical copy.
///
/// # Errors
///
/// Returns [`RepairError::InvalidIndex`](crate::RepairError::InvalidIndex) if
/// any face references a missing vertex.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
/// use mesh_repair::{close_all_holes, validate_mesh};
///
/// let mut open = unit_cube();
/// open.faces.drain(2..4); // remove the top
///
/// let closed = close_all_holes(&open).unwrap();
/// assert_eq!(closed.vertex_count(), 9);
/// assert_eq!(closed.face_count(), 14);
/// assert!(validate_mesh(&closed).is_watertight);
/// assert!((closed.volume() - 1.0).abs() < 1e-12);
/// ```
pub fn close_all_holes(mesh: &IndexedMesh) -> RepairResult<IndexedMesh> {
    close_all_holes_with_params(mesh, &FillParams::default()).map(|result| result.mesh)
}

/// Cap every hole in the mesh and report what happened.
///
/// Output vertices are the input vertices followed by one centroid per
/// capped loop; output faces are the input faces followed by the fans.
/// Coincident vertices are merged (earliest index wins, positions never
/// change) and faces left with fewer than three distinct vertices are
/// dropped, both before tracing and after capping.
///
/// A single pass can leave work behind: dropping a collapsed face may turn
/// an open chain into a closed loop, and a chain walk may have swallowed
/// edges of a loop. Passes therefore repeat until one changes nothing, so
/// running this on its own output is a no-op.
///
/// Loops that cannot be capped are left open and reported in
/// [`HoleFillResult::diagnostics`], numbered as in the final pass.
///
/// # Errors
///
/// Returns [`RepairError::InvalidIndex`](crate::RepairError::InvalidIndex) if
/// any face references a missing vertex, or
/// [`RepairError::UnreachableState`](crate::RepairError::UnreachableState) if
/// boundary tracing breaks down.
pub fn close_all_holes_with_params(
    mesh: &IndexedMesh,
    params: &FillParams,
) -> RepairResult<HoleFillResult> {
    mesh.validate_indices()?;

    let boundary_edges = MeshAdjacency::build(&mesh.faces).boundary_edge_count();
    if boundary_edges == 0 {
        debug!("Mesh has no boundary edges, nothing to fill");
        return Ok(HoleFillResult::unchanged(mesh.clone()));
    }

    let epsilon = params.merge_tolerance.resolve(&mesh.bounds());
    let mut out = HoleFillResult::unchanged(mesh.clone());

    // A pass that caps a loop turns at least three boundary edges interior.
    for pass_index in 0..=boundary_edges {
        let pass = fill_pass(&mut out.mesh, epsilon, params)?;
        out.holes_filled += pass.holes_filled;
        out.vertices_merged += pass.vertices_merged;
        out.faces_removed += pass.faces_removed;
        out.holes_skipped = pass.holes_skipped;
        out.diagnostics = pass.diagnostics;

        if !pass.changed {
            break;
        }
        debug!("Fill pass {} changed the mesh, tracing again", pass_index);
    }

    info!(
        "Filled {} holes ({} skipped), merged {} vertices, removed {} faces",
        out.holes_filled, out.holes_skipped, out.vertices_merged, out.faces_removed
    );

    Ok(out)
}

/// What one consolidate, trace and cap round did.
#[derive(Debug, Default)]
struct FillPass {
    holes_filled: usize,
    holes_skipped: usize,
    vertices_merged: usize,
    faces_removed: usize,
    diagnostics: Vec<Diagnostic>,
    changed: bool,
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: mesh indices are u32, so vertex counts > 4B are unsupported
fn fill_pass(
    mesh: &mut IndexedMesh,
    epsilon: f64,
    params: &FillParams,
) -> RepairResult<FillPass> {
    let mut pass = FillPass {
        vertices_merged: weld_vertices(mesh, epsilon),
        faces_removed: remove_collapsed_faces(mesh),
        ..Default::default()
    };

    let adjacency = MeshAdjacency::build(&mesh.faces);
    let graph = BoundaryGraph::from_adjacency(&adjacency);
    if !graph.is_empty() {
        let trace = trace_loops(&graph)?;
        pass.diagnostics = trace.diagnostics;
        let mut index = SpatialIndex::from_mesh(mesh, epsilon);

        for (loop_index, boundary) in trace.loops.iter().enumerate() {
            if !boundary.is_closed() {
                // Already reported as an open chain.
                pass.holes_skipped += 1;
                continue;
            }

            if let Some(reason) = skip_reason(loop_index, boundary, params) {
                warn!("Leaving hole {} open: {}", loop_index, reason);
                pass.diagnostics.push(reason);
                pass.holes_skipped += 1;
                continue;
            }

            let centroid = loop_centroid(mesh, boundary);
            if params.skip_coincident_centroids {
                if let Some(vertex) = index.find(&centroid) {
                    let reason = Diagnostic::CentroidCoincident { loop_index, vertex };
                    warn!("Leaving hole {} open: {}", loop_index, reason);
                    pass.diagnostics.push(reason);
                    pass.holes_skipped += 1;
                    continue;
                }
            }

            let center = mesh.vertices.len() as u32;
            mesh.vertices.push(Vertex::new(centroid));
            index.insert(center, &centroid);
            mesh.faces
                .extend(boundary.edges().map(|(a, b)| [a, b, center]));
            pass.holes_filled += 1;
        }

        if pass.holes_filled > 0 {
            pass.vertices_merged += weld_vertices(mesh, epsilon);
            pass.faces_removed += remove_collapsed_faces(mesh);
        }
    }

    pass.changed = pass.holes_filled > 0 || pass.vertices_merged > 0 || pass.faces_removed > 0;
    Ok(pass)
}

fn skip_reason(
    loop_index: usize,
    boundary: &BoundaryLoop,
    params: &FillParams,
) -> Option<Diagnostic> {
    let length = boundary.vertices.len();
    if length < 3 {
        return Some(Diagnostic::DegenerateLoop { loop_index, length });
    }

    match params.max_hole_edges {
        Some(max_edges) if boundary.edge_count() > max_edges => Some(Diagnostic::HoleTooLarge {
            loop_index,
            edges: boundary.edge_count(),
            max_edges,
        }),
        _ => None,
    }
}

/// Arithmetic mean of the loop's vertex positions.
#[allow(clippy::cast_precision_loss)]
fn loop_centroid(mesh: &IndexedMesh, boundary: &BoundaryLoop) -> Point3<f64> {
    let sum = boundary
        .vertices
        .iter()
        .fold(Point3::origin().coords, |acc, &v| {
            acc + mesh.vertices[v as usize].position.coords
        });
    Point3::from(sum / boundary.vertices.len() as f64)
}
