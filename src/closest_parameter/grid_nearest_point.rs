use nalgebra::Point3;

use crate::{
    misc::FloatingPoint,
    parametrisation::Parametrisation,
    surface::ParametricSurface,
};

use super::NearestPoint;

/// Coarse-to-fine grid search for the closest parameter on a surface.
/// Each refinement re-samples a window of two cells around the best sample of the previous level.
#[derive(Debug, Clone, Copy)]
pub struct GridNearestPoint {
    /// Number of cells per axis at each level.
    divisions: usize,
    /// Number of zoomed re-samplings after the first full-domain pass.
    refinements: usize,
}

impl Default for GridNearestPoint {
    fn default() -> Self {
        Self {
            divisions: 32,
            refinements: 3,
        }
    }
}

impl GridNearestPoint {
    pub fn new(divisions: usize, refinements: usize) -> Self {
        Self {
            divisions: divisions.max(1),
            refinements,
        }
    }

    pub fn with_divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions.max(1);
        self
    }

    pub fn with_refinements(mut self, refinements: usize) -> Self {
        self.refinements = refinements;
        self
    }
}

impl<T: FloatingPoint> NearestPoint<T> for GridNearestPoint {
    fn find_nearest(
        &self,
        surface: &dyn ParametricSurface<T>,
        point: &Point3<T>,
    ) -> Parametrisation<T> {
        let periodicity = surface.periodicity();
        let n = T::from_usize(self.divisions).unwrap_or(T::one());
        let window = T::constant(2.0) / n;

        let mut best = surface.parametrisation(T::constant(0.5), T::constant(0.5));
        let mut best_distance = (surface.evaluate(&best) - point).norm_squared();
        let (mut u_range, mut v_range) = ((T::zero(), T::one()), (T::zero(), T::one()));

        for _ in 0..=self.refinements {
            for i in 0..=self.divisions {
                let s = T::from_usize(i).unwrap_or(T::zero()) / n;
                let u = u_range.0 + (u_range.1 - u_range.0) * s;
                for j in 0..=self.divisions {
                    let t = T::from_usize(j).unwrap_or(T::zero()) / n;
                    let v = v_range.0 + (v_range.1 - v_range.0) * t;
                    let candidate = surface.parametrisation(u, v);
                    let d = (surface.evaluate(&candidate) - point).norm_squared();
                    if d < best_distance {
                        best_distance = d;
                        best = candidate;
                    }
                }
            }

            let zoom = |center: T, range: (T, T), periodic: bool| {
                let half = (range.1 - range.0) * window;
                let (lo, hi) = (center - half, center + half);
                if periodic {
                    (lo, hi)
                } else {
                    (lo.max(T::zero()), hi.min(T::one()))
                }
            };
            u_range = zoom(best.u(), u_range, periodicity.u);
            v_range = zoom(best.v(), v_range, periodicity.v);
        }

        best.normalized()
    }
}
