//! Mesh health reporting.
//!
//! Produces the scalar summary callers inspect after sealing: counts,
//! watertightness, manifoldness and winding. Validation never fails. Faces
//! that reference missing vertices are counted and left out of the geometric
//! checks.

use hashbrown::HashSet;
use mesh_types::{IndexedMesh, MeshTopology, Triangle};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::MeshAdjacency;

/// Report of mesh validation results.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Number of unique edges.
    pub edge_count: usize,

    /// Number of boundary edges (edges with only one adjacent face).
    pub boundary_edge_count: usize,
    /// Number of non-manifold edges (edges with more than two adjacent faces).
    pub non_manifold_edge_count: usize,
    /// Number of degenerate faces (zero or near-zero area).
    pub degenerate_face_count: usize,
    /// Number of duplicate faces, in either winding.
    pub duplicate_face_count: usize,
    /// Number of faces referencing a vertex that does not exist.
    pub invalid_face_count: usize,

    /// Whether every edge has exactly two adjacent faces.
    pub is_watertight: bool,
    /// Whether no edge has more than two adjacent faces.
    pub is_manifold: bool,
    /// Whether the signed volume is negative.
    pub is_inside_out: bool,
    /// Signed volume over all evaluable faces.
    pub signed_volume: f64,
}

impl MeshReport {
    /// Check if the mesh is a closed, consistently outward solid.
    #[must_use]
    pub fn is_closed_solid(&self) -> bool {
        self.is_watertight
            && self.is_manifold
            && !self.is_inside_out
            && self.invalid_face_count == 0
    }

    /// Enclosed volume, when the mesh is non-empty and watertight.
    #[must_use]
    pub fn volume(&self) -> Option<f64> {
        (self.face_count > 0 && self.is_watertight && self.invalid_face_count == 0)
            .then(|| self.signed_volume.abs())
    }

    /// Check if the mesh has any issues.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }

    /// Get a count of total issues found.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.boundary_edge_count
            + self.non_manifold_edge_count
            + self.degenerate_face_count
            + self.duplicate_face_count
            + self.invalid_face_count
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f)?;
        writeln!(f, "  Status:")?;
        writeln!(f, "    Watertight: {}", yes_no(self.is_watertight))?;
        writeln!(f, "    Manifold: {}", yes_no(self.is_manifold))?;
        writeln!(
            f,
            "    Winding: {}",
            if self.is_inside_out {
                "Inside-out"
            } else {
                "Correct"
            }
        )?;
        if let Some(volume) = self.volume() {
            writeln!(f, "    Volume: {volume:.6}")?;
        }

        if self.has_issues() {
            writeln!(f)?;
            writeln!(f, "  Issues:")?;
            let issues = [
                ("Boundary edges", self.boundary_edge_count),
                ("Non-manifold edges", self.non_manifold_edge_count),
                ("Degenerate faces", self.degenerate_face_count),
                ("Duplicate faces", self.duplicate_face_count),
                ("Invalid faces", self.invalid_face_count),
            ];
            for (label, count) in issues.into_iter().filter(|&(_, c)| c > 0) {
                writeln!(f, "    {label}: {count}")?;
            }
        }

        Ok(())
    }
}

/// Options for mesh validation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationOptions {
    /// Area threshold below which a face is considered degenerate.
    pub degenerate_area_threshold: f64,
    /// Whether to compute signed volume and winding.
    pub check_winding: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            degenerate_area_threshold: 1e-12,
            check_winding: true,
        }
    }
}

/// Validate a mesh and return a report of any issues.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::validate_mesh;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let report = validate_mesh(&mesh);
/// assert_eq!(report.face_count, 1);
/// assert_eq!(report.boundary_edge_count, 3); // Single triangle has 3 boundary edges
/// assert!(!report.is_watertight);
/// assert_eq!(report.volume(), None);
/// ```
#[must_use]
pub fn validate_mesh(mesh: &IndexedMesh) -> MeshReport {
    validate_mesh_with_options(mesh, &ValidationOptions::default())
}

/// Validate a mesh with custom options.
#[must_use]
pub fn validate_mesh_with_options(mesh: &IndexedMesh, options: &ValidationOptions) -> MeshReport {
    let adjacency = MeshAdjacency::build(&mesh.faces);
    let vertex_count = mesh.vertices.len();
    let invalid_face_count = mesh
        .faces
        .iter()
        .filter(|face| face.iter().any(|&i| i as usize >= vertex_count))
        .count();

    let signed_volume = if options.check_winding {
        checked_signed_volume(mesh)
    } else {
        0.0
    };

    let report = MeshReport {
        vertex_count,
        face_count: mesh.faces.len(),
        edge_count: adjacency.edge_count(),
        boundary_edge_count: adjacency.boundary_edge_count(),
        non_manifold_edge_count: adjacency.non_manifold_edge_count(),
        degenerate_face_count: count_degenerate_faces(mesh, options.degenerate_area_threshold),
        duplicate_face_count: count_duplicate_faces(&mesh.faces),
        invalid_face_count,
        is_watertight: adjacency.is_watertight(),
        is_manifold: adjacency.is_manifold(),
        is_inside_out: signed_volume < 0.0,
        signed_volume,
    };

    debug!(
        "Validated mesh: {} verts, {} faces, {} boundary edges, watertight={}",
        report.vertex_count, report.face_count, report.boundary_edge_count, report.is_watertight
    );

    report
}

/// Triangles of every face whose indices are all in range.
fn valid_triangles(mesh: &IndexedMesh) -> impl Iterator<Item = Triangle> + '_ {
    (0..mesh.faces.len()).filter_map(|i| mesh.triangle(i))
}

/// Count faces with area below the threshold.
fn count_degenerate_faces(mesh: &IndexedMesh, area_threshold: f64) -> usize {
    valid_triangles(mesh)
        .filter(|tri| tri.is_degenerate(area_threshold))
        .count()
}

/// Count duplicate faces, in either winding.
fn count_duplicate_faces(faces: &[[u32; 3]]) -> usize {
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(faces.len());
    faces
        .iter()
        .filter(|face| {
            let normalized = normalize_face(**face);
            let reversed = normalize_face([face[0], face[2], face[1]]);
            seen.contains(&reversed) || !seen.insert(normalized)
        })
        .count()
}

/// Rotate a face so the smallest vertex index comes first.
fn normalize_face(face: [u32; 3]) -> [u32; 3] {
    let min_idx = if face[0] <= face[1] && face[0] <= face[2] {
        0
    } else if face[1] <= face[2] {
        1
    } else {
        2
    };

    [
        face[min_idx],
        face[(min_idx + 1) % 3],
        face[(min_idx + 2) % 3],
    ]
}

/// Signed volume over the faces that can be evaluated.
fn checked_signed_volume(mesh: &IndexedMesh) -> f64 {
    valid_triangles(mesh)
        .map(|tri| tri.signed_volume_to_origin())
        .sum()
}
