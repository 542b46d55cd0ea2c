//! Region-of-interest extraction for triangle meshes.
//!
//! Cuts the sub-mesh made of every face whose three vertices fall inside an
//! axis-aligned box. The result is usually open along the cut, which is what
//! `mesh-repair` caps afterwards.
//!
//! # Overview
//!
//! - [`RoiBox`] - Inclusive per-axis coordinate ranges
//! - [`extract_roi`] - Build the compacted sub-mesh
//! - [`extract_roi_with_stats`] - Same, plus kept/dropped counts
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, MeshTopology};
//! use mesh_region::{RoiBox, extract_roi};
//!
//! let cube = unit_cube();
//!
//! // Only the bottom face (z = 0) lies entirely inside this slab.
//! let roi = RoiBox::new(-1.0, 2.0, -1.0, 2.0, -0.5, 0.5);
//! let bottom = extract_roi(&cube, &roi).unwrap();
//!
//! assert_eq!(bottom.face_count(), 2);
//! assert_eq!(bottom.vertex_count(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod roi;

pub use error::{RegionError, RegionResult};
pub use roi::{RoiBox, RoiExtraction, extract_roi, extract_roi_with_stats};

// Re-export for convenience
pub use mesh_types::{IndexedMesh, Point3, Vertex};
