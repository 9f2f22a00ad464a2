use glam::{Mat4, Vec3};
use globe_core::constants::GLOBE_RADIUS;
use globe_core::geo::{centering_yaw, lat_lon_to_vec3, lat_lon_to_vec3_in};
use globe_core::locations::STUDY_DESTINATIONS;

#[test]
fn projection_lands_on_sphere_for_every_destination() {
    for loc in STUDY_DESTINATIONS {
        let p = lat_lon_to_vec3(loc.lat, loc.lon, GLOBE_RADIUS);
        assert!(
            (p.length() - GLOBE_RADIUS).abs() < 1e-4,
            "{} off the sphere: |p| = {}",
            loc.name,
            p.length()
        );
    }
}

#[test]
fn north_pole_is_straight_up() {
    let p = lat_lon_to_vec3(90.0, 0.0, GLOBE_RADIUS);
    assert!((p.x).abs() < 1e-4);
    assert!((p.y - GLOBE_RADIUS).abs() < 1e-4);
    assert!((p.z).abs() < 1e-4);
}

#[test]
fn equator_points_have_zero_height() {
    for lon in [-180.0, -90.0, 0.0, 45.0, 179.0] {
        let p = lat_lon_to_vec3(0.0, lon, GLOBE_RADIUS);
        assert!(p.y.abs() < 1e-4, "lon {lon} gave y {}", p.y);
    }
}

#[test]
fn distinct_coordinates_project_to_distinct_points() {
    let mut points: Vec<Vec3> = STUDY_DESTINATIONS
        .iter()
        .map(|l| lat_lon_to_vec3(l.lat, l.lon, GLOBE_RADIUS))
        .collect();
    while let Some(p) = points.pop() {
        for q in &points {
            assert!(p.distance(*q) > 0.01);
        }
    }
}

#[test]
fn world_transform_tracks_rotation_and_scale() {
    let world = Mat4::from_scale(Vec3::splat(2.0)) * Mat4::from_rotation_y(1.0);
    let raw = lat_lon_to_vec3(40.0, -74.0, GLOBE_RADIUS);
    let moved = lat_lon_to_vec3_in(&world, 40.0, -74.0, GLOBE_RADIUS);
    assert!((moved.length() - 2.0 * raw.length()).abs() < 1e-3);
    assert!(moved.distance(raw * 2.0) > 0.1); // rotation actually applied
}

#[test]
fn centering_yaw_faces_longitude_toward_camera() {
    // Rotating the globe by the centering yaw should bring the location's
    // projected point to positive z (toward the default camera).
    for loc in STUDY_DESTINATIONS {
        let yaw = centering_yaw(loc.lon);
        let world = Mat4::from_rotation_y(yaw);
        let p = lat_lon_to_vec3_in(&world, 0.0, loc.lon, GLOBE_RADIUS);
        assert!(p.z > 0.0, "{} ended up at z {}", loc.name, p.z);
        assert!(p.x.abs() < 1e-3, "{} not centered: x {}", loc.name, p.x);
    }
}
