use glam::{Mat4, Vec3};
use globe_core::camera::OrbitCamera;
use globe_core::constants::{CONNECTION_OPACITY_FLOOR, INFO_CARD_OFFSET_PX};
use globe_core::overlay::{
    card_position, connection_opacity, flight_opacity, label_opacity, place_label,
    project_to_screen,
};

fn test_view_proj() -> Mat4 {
    let cam = OrbitCamera::new();
    cam.view_proj(16.0 / 9.0)
}

#[test]
fn point_in_front_of_camera_projects_near_screen_center() {
    let cam = OrbitCamera::new();
    let vp = cam.view_proj(1.0);
    // A point on the eye-target line lands dead center.
    let (x, y, z) = project_to_screen(cam.eye * 0.5, &vp, 800.0, 600.0).unwrap();
    assert!((x - 400.0).abs() < 1.0);
    assert!((y - 300.0).abs() < 1.0);
    assert!(z < 1.0);
}

#[test]
fn point_behind_camera_is_rejected() {
    let cam = OrbitCamera::new();
    let vp = cam.view_proj(1.0);
    assert!(project_to_screen(cam.eye * 2.0, &vp, 800.0, 600.0).is_none());
}

#[test]
fn label_fades_out_by_half_scroll() {
    assert!((label_opacity(0.0) - 1.0).abs() < 1e-6);
    assert!((label_opacity(0.25) - 0.5).abs() < 1e-6);
    assert_eq!(label_opacity(0.5), 0.0);
    assert_eq!(label_opacity(1.0), 0.0);
}

#[test]
fn hidden_label_hides_its_card() {
    let vp = test_view_proj();
    let cam = OrbitCamera::new();
    let behind = cam.eye * 2.0;
    let label = place_label(behind, &vp, 800.0, 600.0, 0.0);
    assert!(!label.visible);
    assert_eq!(label.opacity, 0.0);
    assert!(card_position(&label).is_none());
}

#[test]
fn card_hangs_below_a_visible_label() {
    let vp = test_view_proj();
    let cam = OrbitCamera::new();
    let label = place_label(cam.eye * 0.5, &vp, 800.0, 600.0, 0.1);
    assert!(label.visible);
    let (cx, cy) = card_position(&label).unwrap();
    assert_eq!(cx, label.x);
    assert!((cy - (label.y + INFO_CARD_OFFSET_PX)).abs() < 1e-4);
}

#[test]
fn connection_opacity_never_drops_below_floor() {
    for i in 0..28 {
        for step in 0..200 {
            let t = step as f64 * 33.0;
            let o = connection_opacity(false, t, i, 1.0);
            assert!(o >= CONNECTION_OPACITY_FLOOR - 1e-6);
            assert!(o <= CONNECTION_OPACITY_FLOOR + 0.1 + 1e-6);
        }
    }
}

#[test]
fn connection_opacity_floor_is_reached_at_full_scroll() {
    // With the scroll fade at zero base, any non-positive oscillation clamps.
    let hit_floor = (0..200).any(|step| {
        let o = connection_opacity(false, step as f64 * 33.0, 0, 1.0);
        (o - CONNECTION_OPACITY_FLOOR).abs() < 1e-6
    });
    assert!(hit_floor);
}

#[test]
fn highlighted_connections_ignore_scroll() {
    let a = connection_opacity(true, 1234.0, 3, 0.0);
    let b = connection_opacity(true, 1234.0, 3, 1.0);
    assert_eq!(a, b);
    assert!(a > 0.3); // 0.6 +/- 0.3
}

#[test]
fn flight_opacity_keeps_a_visible_floor() {
    assert!((flight_opacity(0.8, 0.0) - 0.8).abs() < 1e-6);
    assert_eq!(flight_opacity(0.8, 1.0), 0.2);
    assert!(flight_opacity(0.8, 0.9) >= 0.2);
}
