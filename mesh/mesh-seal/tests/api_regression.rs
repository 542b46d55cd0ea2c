//! API Regression Tests for the mesh-seal crates
//!
//! These tests serve as a regression suite to ensure the public API remains
//! stable and consistent across the workspace. They are organized in 4 tiers
//! of increasing complexity:
//!
//! - Tier 1: Foundation (mesh-types, basic primitives)
//! - Tier 2: Region extraction (mesh-region)
//! - Tier 3: Boundary loops and hole capping (mesh-repair)
//! - Tier 4: Pipeline (process_roi, summarize)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]

use mesh_seal::{prelude::*, region, repair, types};
use approx::assert_relative_eq;

fn open_box() -> IndexedMesh {
    let mut mesh = unit_cube();
    mesh.faces.drain(2..4);
    mesh
}

// =============================================================================
// TIER 1: Foundation - Basic Types and Primitives
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn vertex_creation_and_access() {
        let v = types::Vertex::from_coords(1.0, 2.0, 3.0);
        assert_relative_eq!(v.position.x, 1.0);
        assert_relative_eq!(v.position.y, 2.0);
        assert_relative_eq!(v.position.z, 3.0);

        let v2 = types::Vertex::new(types::Point3::new(4.0, 5.0, 6.0));
        assert_eq!(v2.to_array(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn indexed_mesh_construction() {
        let mesh = types::IndexedMesh::new();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());

        let mesh = types::IndexedMesh::from_raw(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[0, 1, 2],
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.validate_indices().is_ok());
    }

    #[test]
    fn primitive_unit_cube() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12); // 6 faces × 2 triangles
        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
        assert!(!cube.is_inside_out());
    }

    #[test]
    fn mesh_bounds_calculation() {
        let bounds = unit_cube().bounds();

        assert_relative_eq!(bounds.min.x, 0.0);
        assert_relative_eq!(bounds.max.x, 1.0);
        assert_relative_eq!(bounds.diagonal(), 3.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn invalid_index_is_reported() {
        let mesh = IndexedMesh::from_parts(
            vec![Vertex::from_coords(0.0, 0.0, 0.0)],
            vec![[0, 0, 4]],
        );
        let err = mesh.validate_indices().unwrap_err();

        assert_eq!(err.face, 0);
        assert_eq!(err.index, 4);
        assert_eq!(err.vertex_count, 1);
    }
}

// =============================================================================
// TIER 2: Region extraction
// =============================================================================

mod tier2_region {
    use super::*;

    #[test]
    fn roi_box_construction() {
        let roi = RoiBox::new(0.0, 1.0, 0.0, 2.0, 0.0, 3.0);
        assert!(!roi.is_empty());
        assert!(roi.contains(&Point3::new(1.0, 2.0, 3.0)));
        assert!(!roi.contains(&Point3::new(1.0, 2.0, 3.5)));

        let from_bounds = region::RoiBox::from_aabb(&unit_cube().bounds());
        assert!(from_bounds.contains(&Point3::new(0.5, 0.5, 0.5)));

        assert!(RoiBox::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn extract_with_stats() {
        let roi = RoiBox::new(-1.0, 2.0, -1.0, 2.0, -0.5, 0.5);
        let extraction = region::extract_roi_with_stats(&unit_cube(), &roi).unwrap();

        assert_eq!(extraction.faces_kept, 2);
        assert_eq!(extraction.faces_dropped, 10);
        assert_eq!(extraction.vertices_kept, 4);
        assert_eq!(extraction.mesh.face_count(), 2);
    }

    #[test]
    fn extract_outside_is_empty() {
        let roi = RoiBox::new(5.0, 6.0, 5.0, 6.0, 5.0, 6.0);
        let mesh = extract_roi(&unit_cube(), &roi).unwrap();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }
}

// =============================================================================
// TIER 3: Boundary loops and hole capping
// =============================================================================

mod tier3_repair {
    use super::*;

    #[test]
    fn fill_params_builder_pattern() {
        let params = FillParams::default()
            .with_merge_tolerance(MergeTolerance::Absolute(1e-6))
            .with_max_hole_edges(100)
            .with_skip_coincident_centroids(false);

        assert_eq!(params.merge_tolerance, MergeTolerance::Absolute(1e-6));
        assert_eq!(params.max_hole_edges, Some(100));
        assert!(!params.skip_coincident_centroids);

        let _ = FillParams::for_scans();
        let _ = FillParams::for_cad();
    }

    #[test]
    fn boundary_loops() {
        let loops = find_boundary_loops(&open_box()).unwrap();
        assert_eq!(loops.len(), 1);
        assert!(loops[0].is_closed());
        assert_eq!(loops[0].edge_count(), 4);

        let edges = repair::boundary_edges(&open_box()).unwrap();
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn hole_detection_via_adjacency() {
        let mesh = open_box();
        let adjacency = repair::MeshAdjacency::build(&mesh.faces);
        let holes = repair::detect_holes(&adjacency).unwrap();

        assert_eq!(holes.len(), 1);
        assert_eq!(adjacency.boundary_edge_count(), 4);
    }

    #[test]
    fn trace_with_diagnostics() {
        // Two triangles sharing only vertex 0.
        let adjacency = repair::MeshAdjacency::build(&[[0, 1, 2], [0, 3, 4]]);
        let graph = repair::BoundaryGraph::from_adjacency(&adjacency);
        let trace = repair::trace_loops(&graph).unwrap();

        assert_eq!(trace.closed_loops().count(), 2);
        assert!(matches!(
            trace.diagnostics[..],
            [Diagnostic::NonManifoldBoundary { vertex: 0, degree: 4 }]
        ));
    }

    #[test]
    fn close_all_holes_usage() {
        let closed = close_all_holes(&open_box()).unwrap();
        let report: MeshReport = validate_mesh(&closed);

        assert!(report.is_watertight);
        assert!(report.is_closed_solid());
        assert_relative_eq!(report.volume().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn fill_result_usage() {
        let params = FillParams::default();
        let result = repair::close_all_holes_with_params(&open_box(), &params).unwrap();

        assert!(result.had_changes());
        assert_eq!(result.holes_filled, 1);
        assert_eq!(result.holes_skipped, 0);
        assert_eq!(result.vertices_merged, 0);
        assert_eq!(result.faces_removed, 0);
        assert!(result.diagnostics.is_empty());
        assert!(result.to_string().contains("1 holes filled"));
    }

    #[test]
    fn weld_and_cleanup() {
        let mut mesh = unit_cube();
        mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 1.0)); // duplicate of 6
        mesh.faces.push([4, 8, 6]);

        assert_eq!(repair::weld_vertices(&mut mesh, 0.0), 1);
        assert_eq!(repair::remove_collapsed_faces(&mut mesh), 1);
        assert_eq!(mesh.face_count(), 12);
    }
}

// =============================================================================
// TIER 4: Pipeline
// =============================================================================

mod tier4_pipeline {
    use super::*;

    #[test]
    fn process_roi_report() {
        let roi = RoiBox::from_aabb(&unit_cube().bounds());
        let report: SealReport = process_roi(&open_box(), &roi, &FillParams::default()).unwrap();

        assert!(report.watertight);
        assert_eq!(report.holes_filled, 1);
        assert_eq!(report.faces_selected, 10);
        assert_eq!(report.face_count, report.mesh.face_count());
        assert_eq!(report.vertex_count, report.mesh.vertex_count());
        assert_relative_eq!(report.volume.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn summarize_mesh() {
        let summary: MeshSummary = summarize(&open_box()).unwrap();

        assert!(!summary.watertight);
        assert_eq!(summary.vertex_count, 8);
        assert_eq!(summary.face_count, 10);
        assert_eq!(summary.boundary_edge_count, 4);
        assert_eq!(summary.volume, None);
    }
}

// =============================================================================
// Error Handling Patterns
// =============================================================================

mod error_handling {
    use super::*;

    fn broken_mesh() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![Vertex::from_coords(0.0, 0.0, 0.0)],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn region_rejects_invalid_mesh() {
        let roi = RoiBox::new(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        let err = extract_roi(&broken_mesh(), &roi).unwrap_err();
        assert!(err.to_string().contains("invalid vertex index 1"));
    }

    #[test]
    fn repair_rejects_invalid_mesh() {
        assert!(matches!(
            close_all_holes(&broken_mesh()),
            Err(repair::RepairError::InvalidIndex { face: 0, index: 1, vertex_count: 1 })
        ));
    }

    #[test]
    fn pipeline_wraps_stage_errors() {
        let roi = RoiBox::new(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        let result: SealResult<SealReport> =
            process_roi(&broken_mesh(), &roi, &FillParams::default());

        assert!(matches!(result, Err(SealError::Region(_))));
    }

    #[test]
    fn validation_never_fails() {
        let report = validate_mesh(&broken_mesh());
        assert_eq!(report.invalid_face_count, 1);
        assert!(report.has_issues());
    }
}
