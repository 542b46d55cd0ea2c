//! Axis-aligned ROI boxes and sub-mesh extraction.

use mesh_types::{Aabb, IndexedMesh, Point3};
use std::cmp::Ordering;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::RegionResult;

/// An axis-aligned region of interest.
///
/// Each axis is an inclusive `[min, max]` range, tested independently.
/// Unlike [`Aabb::new`], the corners are kept exactly as given: a range with
/// `min > max`, or with a NaN bound, contains nothing.
///
/// # Example
///
/// ```
/// use mesh_region::{RoiBox, Point3};
///
/// let roi = RoiBox::new(0.0, 10.0, 0.0, 10.0, 0.0, 5.0);
/// assert!(roi.contains(&Point3::new(10.0, 0.0, 5.0))); // inclusive
/// assert!(!roi.contains(&Point3::new(5.0, 5.0, 5.1)));
///
/// let inverted = RoiBox::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0);
/// assert!(inverted.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoiBox {
    /// Lower bounds `(x_min, y_min, z_min)`.
    pub min: Point3<f64>,
    /// Upper bounds `(x_max, y_max, z_max)`.
    pub max: Point3<f64>,
}

impl RoiBox {
    /// Create a box from per-axis ranges.
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            min: Point3::new(x_min, y_min, z_min),
            max: Point3::new(x_max, y_max, z_max),
        }
    }

    /// Create a box covering an [`Aabb`].
    #[must_use]
    pub const fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            min: aabb.min,
            max: aabb.max,
        }
    }

    /// The same region as an [`Aabb`], or `None` if the box selects nothing.
    #[must_use]
    pub fn to_aabb(&self) -> Option<Aabb> {
        if self.is_empty() {
            None
        } else {
            Some(Aabb {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Whether no point can satisfy every axis range.
    ///
    /// True when any axis is inverted or has a NaN bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| {
            !matches!(
                self.min[axis].partial_cmp(&self.max[axis]),
                Some(Ordering::Less | Ordering::Equal)
            )
        })
    }

    /// Inclusive per-axis containment test.
    ///
    /// Any comparison against NaN is false, so NaN bounds and NaN
    /// coordinates both fall outside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl From<Aabb> for RoiBox {
    fn from(aabb: Aabb) -> Self {
        Self::from_aabb(&aabb)
    }
}

/// Result of [`extract_roi_with_stats`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoiExtraction {
    /// The compacted sub-mesh.
    pub mesh: IndexedMesh,
    /// Faces whose three vertices were inside the box.
    pub faces_kept: usize,
    /// Faces with at least one vertex outside the box.
    pub faces_dropped: usize,
    /// Vertices of the input lying inside the box, referenced or not.
    pub vertices_inside: usize,
    /// Vertices in the output mesh.
    pub vertices_kept: usize,
}

impl RoiExtraction {
    /// Whether the box selected no faces.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.faces_kept == 0
    }
}

/// Extract the sub-mesh of faces lying entirely inside `roi`.
///
/// A face is kept iff all three of its vertices are inside. Output vertices
/// are the ones referenced by kept faces, in order of first appearance;
/// kept faces keep their order and winding. The input is not modified.
///
/// A box that selects nothing yields an empty mesh, not an error.
///
/// # Errors
///
/// Returns [`RegionError::InvalidVertexIndex`](crate::RegionError::InvalidVertexIndex)
/// if any face references a missing vertex.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
/// use mesh_region::{RoiBox, extract_roi};
///
/// let far_away = RoiBox::new(10.0, 11.0, 10.0, 11.0, 10.0, 11.0);
/// let empty = extract_roi(&unit_cube(), &far_away).unwrap();
///
/// assert_eq!(empty.vertex_count(), 0);
/// assert_eq!(empty.face_count(), 0);
/// ```
pub fn extract_roi(mesh: &IndexedMesh, roi: &RoiBox) -> RegionResult<IndexedMesh> {
    extract_roi_with_stats(mesh, roi).map(|extraction| extraction.mesh)
}

/// Extract the sub-mesh inside `roi` and report how much was kept.
///
/// # Errors
///
/// Returns [`RegionError::InvalidVertexIndex`](crate::RegionError::InvalidVertexIndex)
/// if any face references a missing vertex.
#[allow(clippy::cast_possible_truncation)]
// Truncation: remapped indices never exceed the largest u32 index of the input
pub fn extract_roi_with_stats(mesh: &IndexedMesh, roi: &RoiBox) -> RegionResult<RoiExtraction> {
    mesh.validate_indices()?;

    let inside: Vec<bool> = mesh.vertices.iter().map(|v| roi.contains(&v.position)).collect();
    let vertices_inside = inside.iter().filter(|&&i| i).count();

    let mut remap: Vec<Option<u32>> = vec![None; mesh.vertices.len()];
    let mut result = IndexedMesh::new();

    for face in &mesh.faces {
        if !face.iter().all(|&i| inside[i as usize]) {
            continue;
        }

        let mut new_face = [0u32; 3];
        for (slot, &old) in new_face.iter_mut().zip(face.iter()) {
            *slot = *remap[old as usize].get_or_insert_with(|| {
                result.vertices.push(mesh.vertices[old as usize]);
                (result.vertices.len() - 1) as u32
            });
        }
        result.faces.push(new_face);
    }

    let faces_kept = result.faces.len();
    let faces_dropped = mesh.faces.len() - faces_kept;
    let vertices_kept = result.vertices.len();

    debug!(
        "ROI selection: {} vertices inside, {} faces kept, {} dropped, {} vertices kept",
        vertices_inside, faces_kept, faces_dropped, vertices_kept
    );
    if faces_kept == 0 {
        info!(
            "ROI selected none of {} faces (empty box: {})",
            mesh.faces.len(),
            roi.is_empty()
        );
    }

    Ok(RoiExtraction {
        mesh: result,
        faces_kept,
        faces_dropped,
        vertices_inside,
        vertices_kept,
    })
}
