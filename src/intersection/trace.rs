use argmin::core::ArgminFloat;
use nalgebra::Point3;

use crate::{
    closest_parameter::NearestPoint,
    misc::FloatingPoint,
    parametrisation::IntersectionParametrisation,
    surface::ParametricSurface,
};

use super::{find_intersection_point, march, PolygonIntersection, TracingOptions};

/// Halve a failed step, or give up once it falls below `minimum`.
fn shrink_step<T: FloatingPoint>(step: T, minimum: T) -> Option<T> {
    let half = step * T::constant(0.5);
    (half.abs() >= minimum).then_some(half)
}

/// Grow the step back towards the requested tracking distance after a success.
fn recover_step<T: FloatingPoint>(step: T, full: T) -> T {
    let grown = step * T::constant(1.2);
    if grown.abs() > full.abs() {
        full
    } else {
        grown
    }
}

/// March from the converged `seed` in the direction given by the sign of `delta`
/// until the curve closes onto itself, leaves a domain or the tracer stalls.
/// A failed step is retried at half length, so an open curve ends close to the domain edge.
pub fn trace<T: FloatingPoint + ArgminFloat>(
    a: &dyn ParametricSurface<T>,
    b: &dyn ParametricSurface<T>,
    seed: &IntersectionParametrisation<T>,
    delta: T,
    options: &TracingOptions<T>,
) -> PolygonIntersection<T> {
    let mut polygon = PolygonIntersection::new();
    polygon.push(*seed);
    let mut current = *seed;
    let mut step = delta;

    while polygon.len() < options.maximum_samples {
        let Some(next) = march(a, b, &current, step, options) else {
            match shrink_step(step, options.minimum_step_length) {
                Some(half) => {
                    step = half;
                    continue;
                }
                None => {
                    log::debug!("trace ended after {} samples", polygon.len());
                    break;
                }
            }
        };

        if polygon.is_stalled(&next, options.minimum_step_length) {
            // a converged micro step still ends the curve closer to the edge
            if polygon.last().is_some_and(|last| last.distance(&next) > T::zero()) {
                polygon.push(next);
            }
            log::debug!("trace stalled after {} samples", polygon.len());
            break;
        }

        if let Some(index) = polygon.find_closure(&next, options.equality_epsilon) {
            polygon.close_at(index, &next);
            log::debug!("trace looped with {} samples", polygon.len());
            break;
        }

        polygon.push(next);
        current = next;
        step = recover_step(step, delta);
    }

    polygon
}

/// Trace the whole curve through `seed`: backwards first, then forwards.
/// A looped pass is the complete curve; otherwise both passes are joined at the seed.
pub fn trace_bidirectional<T: FloatingPoint + ArgminFloat>(
    a: &dyn ParametricSurface<T>,
    b: &dyn ParametricSurface<T>,
    seed: &IntersectionParametrisation<T>,
    options: &TracingOptions<T>,
) -> PolygonIntersection<T> {
    let backward = trace(a, b, seed, -options.tracking_distance, options);
    if backward.is_looped() {
        return backward;
    }

    let forward = trace(a, b, seed, options.tracking_distance, options);
    if forward.is_looped() {
        return forward;
    }

    PolygonIntersection::join(backward, forward)
}

/// Find the intersection curve of `a` and `b` passing closest to `near`.
/// Both surfaces are seeded by `seeder`, refined onto the curve, then traced in both directions.
pub fn find_intersection_polygon<T: FloatingPoint + ArgminFloat>(
    a: &dyn ParametricSurface<T>,
    b: &dyn ParametricSurface<T>,
    near: &Point3<T>,
    seeder: &dyn NearestPoint<T>,
    options: &TracingOptions<T>,
) -> Option<PolygonIntersection<T>> {
    let seed_a = seeder.find_nearest(a, near);
    let seed_b = seeder.find_nearest(b, near);
    let Some(seed) = find_intersection_point(a, b, &seed_a, &seed_b, options) else {
        log::debug!("no intersection point found near the seeds");
        return None;
    };
    Some(trace_bidirectional(a, b, &seed, options))
}
