use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::prelude::*;

fn plane_and_sphere() -> (PlaneSurface<f64>, SphereSurface<f64>) {
    (
        PlaneSurface::centered(Point3::origin(), Vector3::x(), Vector3::y(), 2.0),
        SphereSurface::new(Point3::origin(), 1.0),
    )
}

#[test]
fn test_point_solver_converges_onto_circle() {
    let (plane, sphere) = plane_and_sphere();
    let options = TracingOptions::default();
    let seeds = [
        ((0.8, 0.55), (0.05, 0.45)),
        ((0.3, 0.4), (0.55, 0.6)),
        ((0.5, 0.8), (0.22, 0.52)),
    ];
    for ((u1, v1), (u2, v2)) in seeds {
        let p = find_intersection_point(
            &plane,
            &sphere,
            &plane.parametrisation(u1, v1),
            &sphere.parametrisation(u2, v2),
            &options,
        )
        .unwrap();
        let on_plane = plane.evaluate(p.a());
        let on_sphere = sphere.evaluate(p.b());
        assert_relative_eq!(on_plane, on_sphere, epsilon = options.equality_epsilon);
        assert_relative_eq!(on_plane.coords.norm(), 1.0, epsilon = 1e-3);
        assert_relative_eq!(on_sphere.z, 0.0, epsilon = 1e-3);
    }
}

#[test]
fn test_point_solver_reports_absence_for_disjoint_surfaces() {
    let plane = PlaneSurface::centered(Point3::new(0., 0., 2.), Vector3::x(), Vector3::y(), 2.0);
    let sphere = SphereSurface::new(Point3::origin(), 1.0);
    let options = TracingOptions::default();
    let found = find_intersection_polygon(
        &plane,
        &sphere,
        &Point3::new(0., 0., 1.5),
        &GridNearestPoint::default(),
        &options,
    );
    assert!(found.is_none());
}

#[test]
fn test_point_solver_rejects_seed_outside_domain() {
    let (plane, sphere) = plane_and_sphere();
    let options = TracingOptions::default();
    let found = find_intersection_point(
        &plane,
        &sphere,
        &plane.parametrisation(1.2, 0.5),
        &sphere.parametrisation(0.0, 0.5),
        &options,
    );
    assert!(found.is_none());
}

#[test]
fn test_march_advances_by_tracking_distance() {
    let (plane, sphere) = plane_and_sphere();
    let options = TracingOptions::default();
    let current = IntersectionParametrisation::new(
        plane.parametrisation(0.75, 0.5),
        sphere.parametrisation(0.0, 0.5),
    );
    let next = march(&plane, &sphere, &current, 0.05, &options).unwrap();
    let p0 = plane.evaluate(current.a());
    let p1 = plane.evaluate(next.a());

    // the tangent at (1, 0, 0) is along -y
    let tangent = curve_tangent(&plane, &sphere, &current);
    assert_relative_eq!(tangent, -Vector3::y(), epsilon = 1e-12);
    assert_relative_eq!((p1 - p0).dot(&tangent), 0.05, epsilon = 1e-6);
    assert_relative_eq!(p1.coords.norm(), 1.0, epsilon = 1e-6);

    let back = march(&plane, &sphere, &current, -0.05, &options).unwrap();
    assert!(plane.evaluate(back.a()).y > 0.);
}

#[test]
fn test_plane_sphere_loop() {
    let (plane, sphere) = plane_and_sphere();
    let options = TracingOptions::default();
    let polygon = find_intersection_polygon(
        &plane,
        &sphere,
        &Point3::new(1., 0., 0.),
        &GridNearestPoint::default(),
        &options,
    )
    .unwrap();

    assert!(polygon.is_looped());
    assert!(polygon.len() > 100);

    let first = polygon.first().unwrap();
    let last = polygon.last().unwrap();
    assert!(first.wrapped_distance(last) < options.equality_epsilon);

    let points = polygon.points(&plane, IntersectionSide::A);
    for p in points.iter() {
        assert!((p.coords.norm() - 1.0).abs() < options.tracking_distance);
        assert_relative_eq!(p.z, 0.0);
    }
    for (p, q) in points.iter().zip(points.iter().skip(1)) {
        assert!((q - p).norm() < 2.0 * options.tracking_distance);
    }

    // the sphere side wraps around its periodic u axis once
    let (first_box, _) = first.b().wrap_box();
    let (last_box, _) = last.b().wrap_box();
    assert_eq!((first_box - last_box).abs(), 1);
}

#[test]
fn test_cylinder_open_curve_ends_at_domain_edges() {
    let plane = PlaneSurface::centered(Point3::origin(), Vector3::y(), Vector3::z(), 2.0);
    let cylinder = CylinderSurface::new(Point3::new(0., 0., -1.), 1.0, 2.0);
    let options: TracingOptions<f64> = TracingOptions::default();
    let polygon = find_intersection_polygon(
        &plane,
        &cylinder,
        &Point3::new(0., 1., 0.),
        &GridNearestPoint::default(),
        &options,
    )
    .unwrap();

    assert!(!polygon.is_looped());
    let start = polygon.first().unwrap().b().v();
    let end = polygon.last().unwrap().b().v();
    let (low, high) = (start.min(end), start.max(end));
    assert!(low < options.minimum_step_length, "curve stops at v = {low}");
    assert!(
        high > 1. - options.minimum_step_length,
        "curve stops at v = {high}"
    );

    for p in polygon.points(&cylinder, IntersectionSide::B) {
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_open_curves_near_edges_never_loop() {
    let plane = PlaneSurface::centered(Point3::origin(), Vector3::y(), Vector3::z(), 2.0);
    let options = TracingOptions::default();
    for k in 0..40 {
        let height = 1.5 + 0.53 * k as f64 / 39.0;
        let cylinder = CylinderSurface::new(Point3::new(0., 0., -1.), 1.0, height);
        let polygon = find_intersection_polygon(
            &plane,
            &cylinder,
            &Point3::new(0., 1., 0.),
            &GridNearestPoint::default(),
            &options,
        )
        .unwrap();

        assert!(!polygon.is_looped(), "height {height} looped");
        // the full line, not a fragment near one edge
        assert!(polygon.len() as f64 > 0.8 * height / options.tracking_distance);

        let start = polygon.first().unwrap().b().v();
        let end = polygon.last().unwrap().b().v();
        let (low, high) = (start.min(end), start.max(end));
        assert!(low < 2.0 * options.minimum_step_length, "height {height}: v = {low}");
        assert!(
            high > 1. - 2.0 * options.minimum_step_length,
            "height {height}: v = {high}"
        );
    }
}

#[test]
fn test_trace_is_deterministic() {
    let (plane, sphere) = plane_and_sphere();
    let options = TracingOptions::default().with_tracking_distance(0.1);
    let seed = IntersectionParametrisation::new(
        plane.parametrisation(0.75, 0.5),
        sphere.parametrisation(0.0, 0.5),
    );
    let a = trace_bidirectional(&plane, &sphere, &seed, &options);
    let b = trace_bidirectional(&plane, &sphere, &seed, &options);
    assert_eq!(a, b);
    assert!(a.is_looped());
}

#[test]
fn test_maximum_samples_caps_a_single_direction() {
    let (plane, sphere) = plane_and_sphere();
    let options = TracingOptions::default().with_maximum_samples(10);
    let seed = IntersectionParametrisation::new(
        plane.parametrisation(0.75, 0.5),
        sphere.parametrisation(0.0, 0.5),
    );
    let polygon = trace(&plane, &sphere, &seed, 0.05, &options);
    assert_eq!(polygon.len(), 10);
    assert!(!polygon.is_looped());
}

#[test]
fn test_join_requires_samples() {
    let joined = PolygonIntersection::<f64>::try_join(
        PolygonIntersection::new(),
        PolygonIntersection::new(),
    );
    assert!(joined.is_err());
}
