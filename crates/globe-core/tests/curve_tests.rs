use glam::Vec3;
use globe_core::curve::{CatmullRom3, CurveError};

#[test]
fn rejects_fewer_than_two_points() {
    assert!(matches!(
        CatmullRom3::new(vec![]),
        Err(CurveError::TooFewPoints(0))
    ));
    assert!(matches!(
        CatmullRom3::new(vec![Vec3::ZERO]),
        Err(CurveError::TooFewPoints(1))
    ));
}

#[test]
fn passes_through_every_control_point() {
    let pts = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 2.0, 0.0),
        Vec3::new(3.0, 1.0, -1.0),
        Vec3::new(4.0, 0.0, 2.0),
    ];
    let curve = CatmullRom3::new(pts.clone()).unwrap();
    let n = pts.len() - 1;
    for (i, p) in pts.iter().enumerate() {
        let t = i as f32 / n as f32;
        assert!(
            curve.point_at(t).distance(*p) < 1e-4,
            "control point {i} missed"
        );
    }
}

#[test]
fn endpoint_parameters_clamp() {
    let curve =
        CatmullRom3::new(vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)]).unwrap();
    assert!(curve.point_at(-0.5).distance(Vec3::ZERO) < 1e-4);
    assert!(curve.point_at(1.5).distance(Vec3::new(2.0, 1.0, 0.0)) < 1e-4);
}

#[test]
fn tangent_is_unit_length_and_forward() {
    let curve = CatmullRom3::new(vec![
        Vec3::ZERO,
        Vec3::new(1.0, 0.5, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
    ])
    .unwrap();
    for k in 0..=10 {
        let t = k as f32 / 10.0;
        let tan = curve.tangent_at(t);
        assert!((tan.length() - 1.0).abs() < 1e-4);
        assert!(tan.x > 0.0, "curve runs in +x but tangent.x = {}", tan.x);
    }
}

#[test]
fn degenerate_chain_yields_finite_tangent() {
    // All control points coincide; the derivative collapses.
    let curve = CatmullRom3::new(vec![Vec3::ONE, Vec3::ONE, Vec3::ONE]).unwrap();
    let tan = curve.tangent_at(0.5);
    assert!(tan.is_finite());
    assert!((tan.length() - 1.0).abs() < 1e-4);
}
