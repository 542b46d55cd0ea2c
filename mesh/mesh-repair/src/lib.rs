//! Boundary detection and hole capping for triangle meshes.
//!
//! This crate provides tools for:
//! - Edge adjacency and boundary edge extraction
//! - Tracing boundary edges into ordered loops
//! - Capping every closed loop with a centroid fan
//! - Vertex consolidation (exact or tolerance-based)
//! - Mesh validation (watertight, manifold and winding checks)
//!
//! Problems that only affect one hole (a non-manifold boundary vertex, an
//! open chain, a loop too short or too large to cap) are collected as
//! [`Diagnostic`]s and logged with `tracing`; the rest of the mesh is still
//! processed. Only invalid input and broken internal invariants are errors.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, MeshTopology};
//! use mesh_repair::{close_all_holes_with_params, find_boundary_loops, validate_mesh, FillParams};
//!
//! // A unit cube with its top removed
//! let mut mesh = unit_cube();
//! mesh.faces.drain(2..4);
//!
//! let loops = find_boundary_loops(&mesh).unwrap();
//! assert_eq!(loops.len(), 1);
//! assert_eq!(loops[0].edge_count(), 4);
//!
//! let result = close_all_holes_with_params(&mesh, &FillParams::default()).unwrap();
//! assert_eq!(result.holes_filled, 1);
//!
//! let report = validate_mesh(&result.mesh);
//! assert!(report.is_watertight);
//! println!("{report}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod boundary;
mod diagnostics;
mod error;
mod fill;
pub mod holes;
mod repair;
mod validate;

pub use adjacency::MeshAdjacency;
pub use boundary::{BoundaryEdge, BoundaryGraph, boundary_edges};
pub use diagnostics::Diagnostic;
pub use error::{RepairError, RepairResult};
pub use fill::{
    FillParams, HoleFillResult, MergeTolerance, close_all_holes, close_all_holes_with_params,
};
pub use holes::{BoundaryLoop, LoopTrace, detect_holes, find_boundary_loops, trace_loops};
pub use repair::{remove_collapsed_faces, weld_vertices};
pub use validate::{MeshReport, ValidationOptions, validate_mesh, validate_mesh_with_options};
