use nalgebra::{Point3, Vector3};

use crate::{misc::FloatingPoint, parametrisation::Periodicity};

use super::{ParametricSurface, UVDirection};

/// A bounded planar patch `origin + u * u_axis + v * v_axis`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneSurface<T: FloatingPoint> {
    origin: Point3<T>,
    u_axis: Vector3<T>,
    v_axis: Vector3<T>,
}

impl<T: FloatingPoint> PlaneSurface<T> {
    pub fn new(origin: Point3<T>, u_axis: Vector3<T>, v_axis: Vector3<T>) -> Self {
        Self {
            origin,
            u_axis,
            v_axis,
        }
    }

    /// A square patch of side `2 * half_extent` centered at `center`,
    /// spanned by the (normalized) `x_axis` and `y_axis` directions.
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use surfsect::prelude::*;
    /// let plane = PlaneSurface::centered(Point3::origin(), Vector3::x(), Vector3::y(), 2.0);
    /// assert_eq!(plane.point_at(0.5, 0.5), Point3::origin());
    /// assert_eq!(plane.point_at(0., 1.), Point3::new(-2., 2., 0.));
    /// ```
    pub fn centered(
        center: Point3<T>,
        x_axis: Vector3<T>,
        y_axis: Vector3<T>,
        half_extent: T,
    ) -> Self {
        let two = T::constant(2.0);
        let u_axis = x_axis.normalize() * (half_extent * two);
        let v_axis = y_axis.normalize() * (half_extent * two);
        let origin = center - u_axis * T::constant(0.5) - v_axis * T::constant(0.5);
        Self::new(origin, u_axis, v_axis)
    }

    pub fn origin(&self) -> &Point3<T> {
        &self.origin
    }

    pub fn u_axis(&self) -> &Vector3<T> {
        &self.u_axis
    }

    pub fn v_axis(&self) -> &Vector3<T> {
        &self.v_axis
    }
}

impl<T: FloatingPoint> ParametricSurface<T> for PlaneSurface<T> {
    fn point_at(&self, u: T, v: T) -> Point3<T> {
        self.origin + self.u_axis * u + self.v_axis * v
    }

    fn derivative_at(&self, _u: T, _v: T, direction: UVDirection) -> Vector3<T> {
        match direction {
            UVDirection::U => self.u_axis,
            UVDirection::V => self.v_axis,
        }
    }

    fn periodicity(&self) -> Periodicity {
        Periodicity::bounded()
    }
}
