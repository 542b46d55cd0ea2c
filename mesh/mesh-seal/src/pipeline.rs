//! Region extraction followed by hole capping.

use mesh_region::{RoiBox, extract_roi_with_stats};
use mesh_repair::{Diagnostic, FillParams, RepairError, close_all_holes_with_params, validate_mesh};
use mesh_types::IndexedMesh;
use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SealResult;

/// Outcome of [`process_roi`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SealReport {
    /// The extracted and capped mesh.
    pub mesh: IndexedMesh,
    /// Whether every edge of `mesh` has exactly two faces.
    pub watertight: bool,
    /// Enclosed volume; `None` unless the mesh is non-empty and watertight.
    pub volume: Option<f64>,
    /// Faces in `mesh`.
    pub face_count: usize,
    /// Vertices in `mesh`.
    pub vertex_count: usize,
    /// Faces the region selected from the input.
    pub faces_selected: usize,
    /// Holes capped with a fan.
    pub holes_filled: usize,
    /// Holes and open chains left open.
    pub holes_skipped: usize,
    /// Everything noteworthy found while capping.
    pub diagnostics: Vec<Diagnostic>,
}

impl SealReport {
    /// Whether the region selected nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.face_count == 0
    }
}

impl std::fmt::Display for SealReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} faces, {} vertices, {} holes filled",
            self.face_count, self.vertex_count, self.holes_filled
        )?;
        match self.volume {
            Some(volume) => write!(f, ", watertight, volume {volume:.6}"),
            None => write!(f, ", not watertight"),
        }
    }
}

/// Scalar summary of a mesh: watertightness and counts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshSummary {
    /// Whether every edge has exactly two faces.
    pub watertight: bool,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of faces.
    pub face_count: usize,
    /// Number of edges with a single face.
    pub boundary_edge_count: usize,
    /// Enclosed volume; `None` unless the mesh is non-empty and watertight.
    pub volume: Option<f64>,
}

/// Cut `roi` out of `mesh` and cap every hole the cut opened.
///
/// The input is not modified. A region that selects nothing yields an
/// empty, watertight report with no volume.
///
/// # Errors
///
/// Returns [`SealError::Region`](crate::SealError::Region) if `mesh` has a
/// face referencing a missing vertex, or
/// [`SealError::Repair`](crate::SealError::Repair) if boundary tracing breaks
/// down.
///
/// # Example
///
/// ```
/// use mesh_seal::prelude::*;
///
/// // Keep only the bottom of the cube, then close it into a flat cap.
/// let roi = RoiBox::new(-1.0, 2.0, -1.0, 2.0, -0.5, 0.5);
/// let report = process_roi(&unit_cube(), &roi, &FillParams::default()).unwrap();
///
/// assert_eq!(report.holes_filled, 1);
/// assert!(report.watertight);
/// assert_eq!(report.face_count, 6);
/// ```
pub fn process_roi(
    mesh: &IndexedMesh,
    roi: &RoiBox,
    params: &FillParams,
) -> SealResult<SealReport> {
    let extraction = extract_roi_with_stats(mesh, roi)?;
    let filled = close_all_holes_with_params(&extraction.mesh, params)?;
    let report = validate_mesh(&filled.mesh);

    let sealed = SealReport {
        watertight: report.is_watertight,
        volume: report.volume(),
        face_count: report.face_count,
        vertex_count: report.vertex_count,
        faces_selected: extraction.faces_kept,
        holes_filled: filled.holes_filled,
        holes_skipped: filled.holes_skipped,
        diagnostics: filled.diagnostics,
        mesh: filled.mesh,
    };

    info!("Sealed region: {}", sealed);
    Ok(sealed)
}

/// Summarize a mesh without changing it.
///
/// # Errors
///
/// Returns [`SealError::Repair`](crate::SealError::Repair) if `mesh` has a
/// face referencing a missing vertex.
///
/// # Example
///
/// ```
/// use mesh_seal::prelude::*;
///
/// let summary = summarize(&unit_cube()).unwrap();
/// assert!(summary.watertight);
/// assert_eq!(summary.face_count, 12);
/// assert!((summary.volume.unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn summarize(mesh: &IndexedMesh) -> SealResult<MeshSummary> {
    mesh.validate_indices().map_err(RepairError::from)?;
    let report = validate_mesh(mesh);

    Ok(MeshSummary {
        watertight: report.is_watertight,
        vertex_count: report.vertex_count,
        face_count: report.face_count,
        boundary_edge_count: report.boundary_edge_count,
        volume: report.volume(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::SealError;
    use mesh_types::{Vertex, unit_cube};

    fn everything() -> RoiBox {
        RoiBox::new(-10.0, 10.0, -10.0, 10.0, -10.0, 10.0)
    }

    #[test]
    fn whole_cube_passes_through() {
        let report = process_roi(&unit_cube(), &everything(), &FillParams::default()).unwrap();

        // Vertices are renumbered in first-use order, geometry is unchanged.
        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.face_count, 12);
        assert_eq!(report.faces_selected, 12);
        assert_eq!(report.holes_filled, 0);
        assert!(report.watertight);
        assert_relative_eq!(report.volume.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn open_box_gets_sealed() {
        let mut open = unit_cube();
        open.faces.drain(2..4);

        let report = process_roi(&open, &everything(), &FillParams::default()).unwrap();
        assert_eq!(report.holes_filled, 1);
        assert_eq!(report.vertex_count, 9);
        assert_eq!(report.face_count, 14);
        assert_relative_eq!(report.volume.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_selection() {
        let roi = RoiBox::new(5.0, 6.0, 5.0, 6.0, 5.0, 6.0);
        let report = process_roi(&unit_cube(), &roi, &FillParams::default()).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.vertex_count, 0);
        assert!(report.watertight);
        assert_eq!(report.volume, None);
    }

    #[test]
    fn skipped_hole_has_no_volume() {
        let mut open = unit_cube();
        open.faces.drain(2..4);
        let params = FillParams::default().with_max_hole_edges(3);

        let report = process_roi(&open, &everything(), &params).unwrap();
        assert_eq!(report.holes_skipped, 1);
        assert!(!report.watertight);
        assert_eq!(report.volume, None);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn invalid_mesh_is_rejected() {
        let mesh = IndexedMesh::from_parts(
            vec![Vertex::from_coords(0.0, 0.0, 0.0)],
            vec![[0, 1, 2]],
        );

        assert!(matches!(
            process_roi(&mesh, &everything(), &FillParams::default()),
            Err(SealError::Region(_))
        ));
        assert!(matches!(summarize(&mesh), Err(SealError::Repair(_))));
    }

    #[test]
    fn summary_of_open_mesh() {
        let mut open = unit_cube();
        open.faces.drain(2..4);

        let summary = summarize(&open).unwrap();
        assert!(!summary.watertight);
        assert_eq!(summary.boundary_edge_count, 4);
        assert_eq!(summary.volume, None);
    }

    #[test]
    fn report_display() {
        let report = process_roi(&unit_cube(), &everything(), &FillParams::default()).unwrap();
        let text = report.to_string();

        assert!(text.contains("12 faces"));
        assert!(text.contains("volume 1.000000"));
    }
}
