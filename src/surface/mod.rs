pub mod cylinder_surface;
pub mod plane_surface;
pub mod sphere_surface;

pub use cylinder_surface::*;
pub use plane_surface::*;
pub use sphere_surface::*;

use nalgebra::{Point3, Vector3};

use crate::{
    misc::FloatingPoint,
    parametrisation::{Parametrisation, Periodicity},
};

/// The direction of a partial derivative on a surface domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UVDirection {
    U,
    V,
}

/// A smooth surface parameterized over the unit square.
/// Periodic axes are evaluated with coordinates reduced into `[0, 1)`.
pub trait ParametricSurface<T: FloatingPoint> {
    /// Evaluate the surface at the given u, v parameters to get a point
    fn point_at(&self, u: T, v: T) -> Point3<T>;

    /// First partial derivative along `direction`
    fn derivative_at(&self, u: T, v: T, direction: UVDirection) -> Vector3<T>;

    /// Which axes wrap past 1 back to 0
    fn periodicity(&self) -> Periodicity;

    /// Unnormalized normal `S_u x S_v`
    fn normal_at(&self, u: T, v: T) -> Vector3<T> {
        let su = self.derivative_at(u, v, UVDirection::U);
        let sv = self.derivative_at(u, v, UVDirection::V);
        su.cross(&sv)
    }

    fn evaluate(&self, param: &Parametrisation<T>) -> Point3<T> {
        let e = param.effective();
        self.point_at(e.x, e.y)
    }

    /// (S_u, S_v) at a parametrisation
    fn derivatives(&self, param: &Parametrisation<T>) -> (Vector3<T>, Vector3<T>) {
        let e = param.effective();
        (
            self.derivative_at(e.x, e.y, UVDirection::U),
            self.derivative_at(e.x, e.y, UVDirection::V),
        )
    }

    fn normal(&self, param: &Parametrisation<T>) -> Vector3<T> {
        let e = param.effective();
        self.normal_at(e.x, e.y)
    }

    /// Build a parametrisation carrying this surface's periodicity.
    fn parametrisation(&self, u: T, v: T) -> Parametrisation<T> {
        Parametrisation::new(u, v, self.periodicity())
    }
}
