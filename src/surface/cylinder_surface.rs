use nalgebra::{Point3, Vector3};

use crate::{misc::FloatingPoint, parametrisation::Periodicity};

use super::{ParametricSurface, UVDirection};

/// A finite cylinder around the z axis through `base`:
/// angle `2πu` (periodic) and height `height * v` (bounded).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CylinderSurface<T: FloatingPoint> {
    base: Point3<T>,
    radius: T,
    height: T,
}

impl<T: FloatingPoint> CylinderSurface<T> {
    pub fn new(base: Point3<T>, radius: T, height: T) -> Self {
        Self {
            base,
            radius,
            height,
        }
    }

    pub fn base(&self) -> &Point3<T> {
        &self.base
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    pub fn height(&self) -> T {
        self.height
    }
}

impl<T: FloatingPoint> ParametricSurface<T> for CylinderSurface<T> {
    fn point_at(&self, u: T, v: T) -> Point3<T> {
        let phi = T::two_pi() * u;
        self.base
            + Vector3::new(
                self.radius * phi.cos(),
                self.radius * phi.sin(),
                self.height * v,
            )
    }

    fn derivative_at(&self, u: T, _v: T, direction: UVDirection) -> Vector3<T> {
        match direction {
            UVDirection::U => {
                let phi = T::two_pi() * u;
                let s = self.radius * T::two_pi();
                Vector3::new(-s * phi.sin(), s * phi.cos(), T::zero())
            }
            UVDirection::V => Vector3::new(T::zero(), T::zero(), self.height),
        }
    }

    fn periodicity(&self) -> Periodicity {
        Periodicity::new(true, false)
    }
}
