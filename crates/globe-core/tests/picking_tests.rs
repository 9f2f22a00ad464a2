use glam::{Mat4, Vec3};

use globe_core::locations::STUDY_DESTINATIONS;
use globe_core::paths::build_connections;
use globe_core::picking::{pick_marker, pick_path, pointer_ndc, Ray};

#[test]
fn ndc_maps_corners_and_center() {
    assert_eq!(pointer_ndc(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
    assert_eq!(pointer_ndc(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
    assert_eq!(pointer_ndc(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
}

#[test]
fn ray_hits_sphere_ahead_of_it() {
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
    let t = ray.hit_sphere(Vec3::new(0.0, 0.0, 5.0), 2.0).expect("hit");
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn ray_misses_sphere_off_axis() {
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::X };
    assert!(ray.hit_sphere(Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_ignores_sphere_behind_origin() {
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
    assert!(ray.hit_sphere(Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
}

#[test]
fn segment_distance_perpendicular_case() {
    // Ray along +Z, segment along X at z=5, y=2: closest approach is 2.
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
    let d = ray.segment_distance(Vec3::new(-1.0, 2.0, 5.0), Vec3::new(1.0, 2.0, 5.0));
    assert!((d - 2.0).abs() < 1e-5);
}

#[test]
fn segment_distance_clamps_to_segment_end() {
    // Segment entirely off to one side; nearest point is an endpoint.
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
    let d = ray.segment_distance(Vec3::new(3.0, 0.0, 5.0), Vec3::new(6.0, 0.0, 5.0));
    assert!((d - 3.0).abs() < 1e-5);
}

#[test]
fn segment_distance_behind_ray_uses_origin() {
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
    // Segment behind the origin: distance measured from the origin itself.
    let d = ray.segment_distance(Vec3::new(-1.0, 1.0, -5.0), Vec3::new(1.0, 1.0, -5.0));
    let expect = Vec3::new(0.0, 1.0, -5.0).length();
    assert!((d - expect).abs() < 1e-5);
}

#[test]
fn nearest_marker_wins_when_spheres_overlap_along_ray() {
    let positions = vec![Vec3::new(0.0, 0.0, 8.0), Vec3::new(0.0, 0.05, 4.0)];
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
    assert_eq!(pick_marker(&ray, &positions), Some(1));
}

#[test]
fn pick_marker_misses_empty_space() {
    let positions = vec![Vec3::new(0.0, 0.0, 8.0)];
    let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Y };
    assert_eq!(pick_marker(&ray, &positions), None);
}

#[test]
fn ray_through_an_arc_midpoint_picks_that_path() {
    let paths = build_connections(STUDY_DESTINATIONS, &Mat4::IDENTITY);
    let mid = paths[0].curve.point_at(0.5);
    // Aim straight at the midpoint from well outside the globe.
    let origin = mid * 3.0;
    let ray = Ray { origin, dir: (mid - origin).normalize() };
    assert_eq!(pick_path(&ray, &paths), Some(0));
}

#[test]
fn ray_missing_the_globe_picks_nothing() {
    let paths = build_connections(STUDY_DESTINATIONS, &Mat4::IDENTITY);
    let ray = Ray { origin: Vec3::new(50.0, 50.0, 50.0), dir: Vec3::Y };
    assert_eq!(pick_path(&ray, &paths), None);
}
