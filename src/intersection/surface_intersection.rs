use argmin::core::{
    ArgminFloat, Executor, IterState, Jacobian, Operator, State, TerminationReason,
    TerminationStatus,
};
use nalgebra::{DMatrix, DVector, Vector3, Vector4};

use crate::{
    misc::FloatingPoint,
    parametrisation::{IntersectionParametrisation, Parametrisation},
    surface::ParametricSurface,
};

use super::{IntersectionNewton, MarchingProblem, SurfaceIntersectionProblem, TracingOptions};

/// Run the intersection Newton solver on `problem` from `seed`.
/// Returns `None` on domain exit, rank deficiency or when the iteration cap is reached.
fn solve<O, T>(
    problem: O,
    seed: &IntersectionParametrisation<T>,
    options: &TracingOptions<T>,
) -> Option<IntersectionParametrisation<T>>
where
    O: Operator<Param = Vector4<T>, Output = DVector<T>>
        + Jacobian<Param = Vector4<T>, Jacobian = DMatrix<T>>,
    T: FloatingPoint + ArgminFloat,
{
    let solver = IntersectionNewton::new(options.minimum_step_length, seed.periodicity());
    let res = Executor::new(problem, solver)
        .configure(|state: IterState<Vector4<T>, (), (), (), (), T>| {
            state
                .param(seed.to_vector())
                .max_iters(options.maximum_newton_iterations)
        })
        .run();

    let res = match res {
        Ok(res) => res,
        Err(err) => {
            log::debug!("intersection solver failed: {err}");
            return None;
        }
    };

    let state = res.state();
    match state.get_termination_status() {
        TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
            state.get_param().map(|x| seed.with_vector(x))
        }
        status => {
            log::trace!(
                "intersection solver stopped after {} iterations: {:?}",
                state.get_iter(),
                status
            );
            None
        }
    }
}

/// Check the converged sample actually lies on both surfaces.
/// Newton with a pseudo-inverse also settles on least-squares points of disjoint surfaces.
fn lies_on_both<T: FloatingPoint>(
    a: &dyn ParametricSurface<T>,
    b: &dyn ParametricSurface<T>,
    p: &IntersectionParametrisation<T>,
    tolerance: T,
) -> bool {
    (a.evaluate(p.a()) - b.evaluate(p.b())).norm() < tolerance
}

/// Refine seeds on surface `a` and `b` into a point where both surfaces meet.
/// ```
/// use nalgebra::{Point3, Vector3};
/// use surfsect::prelude::*;
/// let plane = PlaneSurface::centered(Point3::origin(), Vector3::x(), Vector3::y(), 2.0);
/// let sphere = SphereSurface::new(Point3::origin(), 1.0);
/// let options: TracingOptions<f64> = TracingOptions::default();
/// let p = find_intersection_point(
///     &plane,
///     &sphere,
///     &plane.parametrisation(0.76, 0.52),
///     &sphere.parametrisation(0.02, 0.45),
///     &options,
/// )
/// .unwrap();
/// let q = plane.evaluate(p.a());
/// assert!((q.coords.norm() - 1.0).abs() < 1e-3);
/// ```
pub fn find_intersection_point<T: FloatingPoint + ArgminFloat>(
    a: &dyn ParametricSurface<T>,
    b: &dyn ParametricSurface<T>,
    seed_a: &Parametrisation<T>,
    seed_b: &Parametrisation<T>,
    options: &TracingOptions<T>,
) -> Option<IntersectionParametrisation<T>> {
    let seed = IntersectionParametrisation::new(*seed_a, *seed_b);
    if !seed.is_valid() {
        return None;
    }
    solve(SurfaceIntersectionProblem::new(a, b), &seed, options)
        .filter(|p| lies_on_both(a, b, p, options.equality_epsilon))
}

/// Unit tangent of the intersection curve: `normalize(n_a x n_b)`.
/// Not finite where the surfaces are tangent to each other.
pub fn curve_tangent<T: FloatingPoint>(
    a: &dyn ParametricSurface<T>,
    b: &dyn ParametricSurface<T>,
    at: &IntersectionParametrisation<T>,
) -> Vector3<T> {
    let na = a.normal(at.a());
    let nb = b.normal(at.b());
    na.cross(&nb).normalize()
}

/// Advance from a converged sample `current` by the signed 3D distance `delta` along the curve.
/// Returns `None` when the curve leaves a surface domain or the solve does not converge.
pub fn march<T: FloatingPoint + ArgminFloat>(
    a: &dyn ParametricSurface<T>,
    b: &dyn ParametricSurface<T>,
    current: &IntersectionParametrisation<T>,
    delta: T,
    options: &TracingOptions<T>,
) -> Option<IntersectionParametrisation<T>> {
    let tangent = curve_tangent(a, b, current);
    let origin = a.evaluate(current.a());
    let problem = MarchingProblem::new(
        SurfaceIntersectionProblem::new(a, b),
        origin,
        tangent,
        delta,
    );
    solve(problem, current, options).filter(|p| lies_on_both(a, b, p, options.equality_epsilon))
}
