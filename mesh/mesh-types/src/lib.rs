//! Shared mesh types for region extraction and hole capping.
//!
//! An [`IndexedMesh`] is a vertex list plus triangles that index into it.
//! Everything else here exists to look at one:
//!
//! - [`Vertex`] wraps a position
//! - [`Triangle`] is a face with its corners resolved
//! - [`Aabb`] bounds a set of points
//! - [`MeshTopology`] and [`MeshBounds`] give read-only views
//!
//! Coordinates are unit-free `f64`. Faces wind counter-clockwise seen from
//! outside, so a closed, correctly oriented mesh has positive
//! [`signed_volume`](IndexedMesh::signed_volume).
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Vertex};
//!
//! let mesh = IndexedMesh::from_parts(
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0),
//!         Vertex::from_coords(0.5, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.validate_indices().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{IndexedMesh, InvalidFaceIndex, unit_cube};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

pub use nalgebra::{Point3, Vector3};
