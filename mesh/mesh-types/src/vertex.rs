//! Vertex type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex.
///
/// Scan meshes arriving from STL/PLY readers carry nothing but positions,
/// so a vertex is just its `Point3<f64>`. Consolidation compares positions
/// bit for bit, which is why they stay `f64` end to end.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3};
///
/// let v: Vertex = [1.0, 2.0, 3.0].into();
///
/// assert_eq!(v, Vertex::new(Point3::new(1.0, 2.0, 3.0)));
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in space.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Vertex at `position`.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position }
    }

    /// Vertex at `(x, y, z)`.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Coordinates as `[x, y, z]`.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }

    /// Whether no coordinate is NaN or infinite.
    ///
    /// Non-finite vertices never merge and never count as coincident.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
