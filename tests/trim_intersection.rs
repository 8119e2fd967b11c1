use nalgebra::{Point3, Vector3};
use surfsect::prelude::*;

/// Punch the hole a sphere leaves in a plane and bake it.
#[test]
fn test_plane_with_spherical_hole() {
    let plane = PlaneSurface::centered(Point3::new(0., 0., 0.5), Vector3::x(), Vector3::y(), 2.0);
    let sphere = SphereSurface::new(Point3::origin(), 1.0);
    let options: TracingOptions<f64> = TracingOptions::default();

    let polygon = find_intersection_polygon(
        &plane,
        &sphere,
        &Point3::new(0.8, 0.3, 0.5),
        &GridNearestPoint::default(),
        &options,
    )
    .unwrap();
    assert!(polygon.is_looped());

    let radius = 0.75_f64.sqrt();
    for p in polygon.points(&sphere, IntersectionSide::B) {
        assert!((p.z - 0.5).abs() < 1e-3);
        assert!((Vector3::new(p.x, p.y, 0.).norm() - radius).abs() < 1e-3);
    }

    let mut classifier = TrimClassifier::new(TrimMode::Outside);
    classifier
        .add_polygon(&polygon, IntersectionSide::A, &options)
        .unwrap();
    let baked = BakedTrimmer::try_bake(&classifier, 64, 64).unwrap();

    // the hole has a radius of radius / 4 in the plane's unit domain
    let hole = radius / 4.0;
    let margin = 0.02;
    for j in 0..64 {
        for i in 0..64 {
            let u = (i as f64 + 0.5) / 64.0;
            let v = (j as f64 + 0.5) / 64.0;
            let d = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt();
            let kept = baked.verify_parametrisation(u, v);
            assert_eq!(kept, classifier.verify_parametrisation(u, v));
            if d < hole - margin {
                assert!(!kept, "({u}, {v}) lies in the hole");
            } else if d > hole + margin {
                assert!(kept, "({u}, {v}) lies on the remaining plane");
            }
        }
    }
}

/// A plane slicing a cylinder: a closed curve on the plane, a seam-wrapping curve on the cylinder.
#[test]
fn test_plane_slicing_cylinder() {
    let plane = PlaneSurface::centered(Point3::origin(), Vector3::x(), Vector3::y(), 2.0);
    let cylinder = CylinderSurface::new(Point3::new(0., 0., -1.), 1.0, 2.0);
    let options: TracingOptions<f64> = TracingOptions::default();

    let polygon = find_intersection_polygon(
        &plane,
        &cylinder,
        &Point3::new(0., -1., 0.),
        &GridNearestPoint::default(),
        &options,
    )
    .unwrap();
    assert!(polygon.is_looped());
    for sample in polygon.iter() {
        assert!((sample.b().v() - 0.5).abs() < 1e-6);
    }

    let mut plane_trim = TrimClassifier::new(TrimMode::Inside);
    plane_trim
        .add_polygon(&polygon, IntersectionSide::A, &options)
        .unwrap();
    assert!(plane_trim.verify_parametrisation(0.5, 0.5));
    assert!(!plane_trim.verify_parametrisation(0.1, 0.9));

    // the cylinder side is split at its seam
    let area =
        TrimmingArea::try_from_polygon(&polygon, IntersectionSide::B, options.snap_threshold)
            .unwrap();
    let seam_vertices = area
        .vertices()
        .iter()
        .filter(|p| p.x == 0.0 || p.x == 1.0)
        .count();
    assert!(seam_vertices >= 2);
    assert!(area.vertices().iter().all(|p| (0.0..=1.0).contains(&p.x)));
}
