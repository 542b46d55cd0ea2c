//! Cut a region out of a triangle mesh and seal it into a closed solid.
//!
//! This umbrella crate re-exports the mesh-* crates and adds the end-to-end
//! pipeline on top of them:
//!
//! 1. [`region::extract_roi`] keeps the faces whose three vertices lie inside
//!    an axis-aligned box.
//! 2. [`repair::close_all_holes`] traces the boundary loops left by the cut
//!    and caps each one with a centroid fan.
//! 3. [`repair::validate_mesh`] reports whether the result is watertight and
//!    what it encloses.
//!
//! [`process_roi`] runs all three and returns a [`SealReport`].
//!
//! # Quick Start
//!
//! ```
//! use mesh_seal::prelude::*;
//!
//! // A unit cube, cut down to everything below z = 0.5. Only the bottom
//! // square survives; sealing turns it into a flat, closed cap.
//! let roi = RoiBox::new(-1.0, 2.0, -1.0, 2.0, -1.0, 0.5);
//! let report = process_roi(&unit_cube(), &roi, &FillParams::default()).unwrap();
//!
//! assert!(report.watertight);
//! println!("{report}");
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`
//! - [`region`] - Region-of-interest extraction
//! - [`repair`] - Boundary loops, hole capping, validation
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for meshes, parameters and reports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod pipeline;

pub use error::{SealError, SealResult};
pub use pipeline::{MeshSummary, SealReport, process_roi, summarize};

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`.
pub use mesh_types as types;

/// Region-of-interest extraction.
pub use mesh_region as region;

/// Boundary loop detection, hole capping and validation.
pub use mesh_repair as repair;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for sealing meshes.
///
/// # Usage
///
/// ```
/// use mesh_seal::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Triangle, Vertex, unit_cube,
    };

    // Region
    pub use mesh_region::{RoiBox, extract_roi};

    // Repair
    pub use mesh_repair::{
        BoundaryLoop, Diagnostic, FillParams, MergeTolerance, MeshReport, close_all_holes,
        find_boundary_loops, validate_mesh,
    };

    // Pipeline
    pub use crate::{MeshSummary, SealError, SealReport, SealResult, process_roi, summarize};
}
