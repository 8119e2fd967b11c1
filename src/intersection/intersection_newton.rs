use std::fmt;

use argmin::{argmin_error_closure, core::*};
use nalgebra::{DMatrix, DVector, Vector4};

use crate::{
    misc::FloatingPoint,
    parametrisation::{Parametrisation, Periodicity},
};

/// Why the Newton iteration stopped before converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewtonExit {
    /// An iterate left a bounded axis of one of the surfaces.
    DomainExit,
    /// The Jacobian had no full row rank at an iterate.
    Singular,
}

impl fmt::Display for NewtonExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewtonExit::DomainExit => write!(f, "iterate left the surface domain"),
            NewtonExit::Singular => write!(f, "jacobian is rank deficient"),
        }
    }
}

/// Minimum-norm solution `dx` of `J dx = -F` through the pseudo-inverse of `J`.
/// `J` has 4 columns and at most 4 rows. With `J^T = QR` the solution is `Q (R^T)^-1 (-F)`.
pub fn minimum_norm_correction<T: FloatingPoint>(
    jacobian: DMatrix<T>,
    residual: &DVector<T>,
) -> Option<DVector<T>> {
    let qr = jacobian.transpose().qr();
    let y = qr.r().transpose().solve_lower_triangular(&(-residual))?;
    Some(qr.q() * y)
}

fn max_norm<T: FloatingPoint>(v: &Vector4<T>) -> T {
    v.iter().fold(T::zero(), |m, x| m.max(x.abs()))
}

/// Newton's method on the joint (u1, v1, u2, v2) parameter of two surfaces.
/// Each step applies the minimum-norm correction, so the same solver handles the
/// underdetermined intersection system and the square marching system.
/// Original source: https://argmin-rs.github.io/argmin/argmin/solver/newton/struct.Newton.html
#[derive(Clone, Copy)]
pub struct IntersectionNewton<F: FloatingPoint> {
    /// converged once the max-norm of a step falls below this
    minimum_step_length: F,
    /// periodicity of surface A & B
    periodicity: (Periodicity, Periodicity),
    exit: Option<NewtonExit>,
}

impl<F: FloatingPoint> IntersectionNewton<F> {
    pub fn new(minimum_step_length: F, periodicity: (Periodicity, Periodicity)) -> Self {
        Self {
            minimum_step_length,
            periodicity,
            exit: None,
        }
    }

    pub fn exit(&self) -> Option<NewtonExit> {
        self.exit
    }

    fn contains(&self, x: &Vector4<F>) -> bool {
        Parametrisation::new(x[0], x[1], self.periodicity.0).is_valid()
            && Parametrisation::new(x[2], x[3], self.periodicity.1).is_valid()
    }

    fn is_converged(&self, current: &Vector4<F>, prev: &Vector4<F>) -> bool {
        max_norm(&(current - prev)) < self.minimum_step_length
    }
}

impl<O, F> Solver<O, IterState<Vector4<F>, (), (), (), (), F>> for IntersectionNewton<F>
where
    O: Operator<Param = Vector4<F>, Output = DVector<F>>
        + Jacobian<Param = Vector4<F>, Jacobian = DMatrix<F>>,
    F: FloatingPoint + ArgminFloat,
{
    const NAME: &'static str = "Surface intersection newton method";

    fn init(
        &mut self,
        _problem: &mut Problem<O>,
        state: IterState<Vector4<F>, (), (), (), (), F>,
    ) -> Result<(IterState<Vector4<F>, (), (), (), (), F>, Option<KV>), Error> {
        self.exit = None;
        Ok((state, None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        state: IterState<Vector4<F>, (), (), (), (), F>,
    ) -> Result<(IterState<Vector4<F>, (), (), (), (), F>, Option<KV>), Error> {
        let x = *state.get_param().ok_or_else(argmin_error_closure!(
            NotInitialized,
            concat!(
                "`IntersectionNewton` requires an initial parameter vector. ",
                "Please provide an initial guess via `Executor`s `configure` method."
            )
        ))?;

        let residual = problem.apply(&x)?;
        let jacobian = problem.jacobian(&x)?;

        let Some(correction) = minimum_norm_correction(jacobian, &residual) else {
            self.exit = Some(NewtonExit::Singular);
            return Ok((state, None));
        };

        let next = x + Vector4::from_iterator(correction.iter().copied());
        if !self.contains(&next) {
            self.exit = Some(NewtonExit::DomainExit);
        }

        Ok((state.param(next), None))
    }

    fn terminate(&mut self, state: &IterState<Vector4<F>, (), (), (), (), F>) -> TerminationStatus {
        if let Some(exit) = self.exit {
            return TerminationStatus::Terminated(TerminationReason::SolverExit(exit.to_string()));
        }

        match (state.get_param(), state.get_prev_param()) {
            (Some(current), Some(prev)) if self.is_converged(current, prev) => {
                TerminationStatus::Terminated(TerminationReason::SolverConverged)
            }
            _ => TerminationStatus::NotTerminated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_minimum_norm_correction_underdetermined() {
        let j = DMatrix::from_row_slice(3, 4, &[1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1., 1.]);
        let f = DVector::from_column_slice(&[1., -2., 2.]);
        let dx = minimum_norm_correction(j.clone(), &f).unwrap();

        // solves J dx = -F
        assert_relative_eq!(&j * &dx, -f, epsilon = 1e-12);
        // and has no component along the null space (0, 0, 1, -1)
        assert_relative_eq!(dx[2] - dx[3], 0.0, epsilon = 1e-12);
        assert_relative_eq!(dx[2], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_minimum_norm_correction_square() {
        let j = DMatrix::from_row_slice(
            4,
            4,
            &[2., 0., 0., 0., 0., 3., 0., 0., 0., 0., 4., 1., 0., 1., 0., 5.],
        );
        let f = DVector::from_column_slice(&[2., 3., 5., 6.]);
        let dx = minimum_norm_correction(j.clone(), &f).unwrap();
        assert_relative_eq!(&j * &dx, -f, epsilon = 1e-12);
    }

    #[test]
    fn test_minimum_norm_correction_rank_deficient() {
        let j = DMatrix::from_row_slice(3, 4, &[1., 0., 0., 0., 1., 0., 0., 0., 0., 0., 1., 0.]);
        let f = DVector::from_column_slice(&[1., 1., 1.]);
        assert!(minimum_norm_correction(j, &f).is_none());
    }
}
