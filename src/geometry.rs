//! Fundamental geometric and load types shared by the frame model and reaction import.

use nalgebra::{Vector3, Vector6};
use serde::{Deserialize, Serialize};

/// Position in three dimensional space, in the model's length unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Straight-line distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Three forces and three moments acting at a node.
///
/// Used both for applied nodal loads and for support reactions. Component
/// order follows the host's degree-of-freedom numbering: FX, FY, FZ, MX, MY, MZ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Wrench {
    /// Force along global X.
    pub fx: f64,
    /// Force along global Y.
    pub fy: f64,
    /// Force along global Z.
    pub fz: f64,
    /// Moment about global X.
    pub mx: f64,
    /// Moment about global Y.
    pub my: f64,
    /// Moment about global Z.
    pub mz: f64,
}

impl Wrench {
    /// Create a [`Wrench`] from components in degree-of-freedom order.
    #[must_use]
    pub const fn from_components(components: [f64; 6]) -> Self {
        let [fx, fy, fz, mx, my, mz] = components;
        Self {
            fx,
            fy,
            fz,
            mx,
            my,
            mz,
        }
    }

    /// Components in degree-of-freedom order.
    #[must_use]
    pub const fn components(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }

    /// Convert into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector6<f64> {
        Vector6::from_row_slice(&self.components())
    }

    /// Resultant force magnitude.
    #[must_use]
    pub fn force_magnitude(&self) -> f64 {
        Vector3::new(self.fx, self.fy, self.fz).norm()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use footingx::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for a purely vertical nodal force.
///
/// # Examples
/// ```
/// use footingx::vertical_load;
///
/// let load = vertical_load(-15.0);
/// assert_eq!(load.fy, -15.0);
/// assert_eq!(load.mz, 0.0);
/// ```
#[must_use]
pub const fn vertical_load(fy: f64) -> Wrench {
    Wrench::from_components([0.0, fy, 0.0, 0.0, 0.0, 0.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1.0e-12);
    }

    #[test]
    fn wrench_components_keep_dof_order() {
        let wrench = Wrench::from_components([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(wrench.fy, 2.0);
        assert_eq!(wrench.mz, 6.0);
        assert_eq!(wrench.to_vector()[4], 5.0);
    }

    #[test]
    fn force_magnitude_ignores_moments() {
        let wrench = Wrench::from_components([3.0, 4.0, 0.0, 100.0, 0.0, 0.0]);
        assert!((wrench.force_magnitude() - 5.0).abs() < 1.0e-12);
    }
}
