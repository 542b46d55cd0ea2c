//! Triangle with resolved vertex positions.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One face of an [`IndexedMesh`](crate::IndexedMesh) with its corners
/// looked up.
///
/// Corners are counter-clockwise when seen from the side the normal
/// points to.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!((tri.normal().unwrap().z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Triangle from three corners in winding order.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Cross product of the two edges leaving `v0`; its length is twice the area.
    fn scaled_normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal, or `None` when the triangle has no area.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.scaled_normal().try_normalize(f64::EPSILON)
    }

    /// Surface area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.scaled_normal().norm() * 0.5
    }

    /// Signed volume of the tetrahedron spanned with the origin.
    ///
    /// Summed over a closed, outward-wound surface this is the enclosed
    /// volume. Inward winding gives the negated value.
    #[inline]
    #[must_use]
    pub fn signed_volume_to_origin(&self) -> f64 {
        self.v0.coords.dot(&self.v1.coords.cross(&self.v2.coords)) / 6.0
    }

    /// Whether the area is below `epsilon`.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() < epsilon
    }
}
