use nalgebra::{Point3, Vector3};

use crate::{misc::FloatingPoint, parametrisation::Periodicity};

use super::{ParametricSurface, UVDirection};

/// A sphere parameterized by longitude `2πu` (periodic) and polar angle `πv` (bounded),
/// with `v = 0` at the +z pole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SphereSurface<T: FloatingPoint> {
    center: Point3<T>,
    radius: T,
}

impl<T: FloatingPoint> SphereSurface<T> {
    pub fn new(center: Point3<T>, radius: T) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> &Point3<T> {
        &self.center
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    fn angles(&self, u: T, v: T) -> (T, T) {
        (T::two_pi() * u, T::pi() * v)
    }
}

impl<T: FloatingPoint> ParametricSurface<T> for SphereSurface<T> {
    fn point_at(&self, u: T, v: T) -> Point3<T> {
        let (phi, theta) = self.angles(u, v);
        let r = self.radius;
        self.center
            + Vector3::new(
                r * theta.sin() * phi.cos(),
                r * theta.sin() * phi.sin(),
                r * theta.cos(),
            )
    }

    fn derivative_at(&self, u: T, v: T, direction: UVDirection) -> Vector3<T> {
        let (phi, theta) = self.angles(u, v);
        let r = self.radius;
        match direction {
            UVDirection::U => {
                let s = r * T::two_pi() * theta.sin();
                Vector3::new(-s * phi.sin(), s * phi.cos(), T::zero())
            }
            UVDirection::V => {
                let s = r * T::pi();
                Vector3::new(
                    s * theta.cos() * phi.cos(),
                    s * theta.cos() * phi.sin(),
                    -s * theta.sin(),
                )
            }
        }
    }

    fn periodicity(&self) -> Periodicity {
        Periodicity::new(true, false)
    }
}
