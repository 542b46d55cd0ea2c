//! Axis-aligned bounding box.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Used to scale relative merge tolerances and as a convenient way to build
/// a region of interest around an existing mesh.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0));
///
/// assert!((aabb.diagonal() - 5.0).abs() < 1e-12);
/// assert!(aabb.contains(&Point3::new(3.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Corner with the smallest coordinates.
    pub min: Point3<f64>,
    /// Corner with the largest coordinates.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box spanned by two opposite corners, in either order.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// The box containing nothing: `min` at +inf, `max` at -inf.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box holding every point; [`empty`](Self::empty) for none.
    ///
    /// NaN coordinates are skipped by `f64::min`/`f64::max`.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        points.into_iter().fold(Self::empty(), |acc, p| Self {
            min: Point3::new(acc.min.x.min(p.x), acc.min.y.min(p.y), acc.min.z.min(p.z)),
            max: Point3::new(acc.max.x.max(p.x), acc.max.y.max(p.y), acc.max.z.max(p.z)),
        })
    }

    /// Whether `min` exceeds `max` on some axis.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Length of the min-to-max diagonal, or 0.0 for an empty box.
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            (self.max - self.min).norm()
        }
    }

    /// Closed containment test: points on a face count as inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
