pub mod grid_nearest_point;
pub use grid_nearest_point::*;

use nalgebra::Point3;

use crate::{misc::FloatingPoint, parametrisation::Parametrisation, surface::ParametricSurface};

/// Finds an approximate parameter on a surface closest to a point in space.
/// Used to seed the intersection solver.
pub trait NearestPoint<T: FloatingPoint> {
    fn find_nearest(
        &self,
        surface: &dyn ParametricSurface<T>,
        point: &Point3<T>,
    ) -> Parametrisation<T>;
}
