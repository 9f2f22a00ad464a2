// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn pointer_maps_through_bounding_rect() {
    // Canvas CSS box 800x600 at (100, 50), backing store at 2x DPR.
    let (x, y) = css_to_canvas_px(500.0, 350.0, 100.0, 50.0, 800.0, 600.0, 1600.0, 1200.0);
    assert_eq!((x, y), (800.0, 600.0));
}

#[test]
fn pointer_at_rect_origin_is_canvas_origin() {
    let (x, y) = css_to_canvas_px(100.0, 50.0, 100.0, 50.0, 800.0, 600.0, 1600.0, 1200.0);
    assert_eq!((x, y), (0.0, 0.0));
}

#[test]
fn pointer_with_degenerate_rect_is_zero() {
    let (x, y) = css_to_canvas_px(500.0, 350.0, 100.0, 50.0, 0.0, 600.0, 1600.0, 1200.0);
    assert_eq!((x, y), (0.0, 0.0));
}

#[test]
fn dpr_caps_high_density_displays() {
    assert_eq!(capped_dpr(3.0, 2.0), 2.0);
    assert_eq!(capped_dpr(2.0, 2.0), 2.0);
    assert_eq!(capped_dpr(1.5, 2.0), 1.5);
}

#[test]
fn dpr_never_drops_below_half() {
    assert_eq!(capped_dpr(0.1, 2.0), 0.5);
    assert_eq!(capped_dpr(0.0, 2.0), 0.5);
}

#[test]
fn throttle_accepts_first_frame() {
    let mut t = FrameThrottle::new(16.7);
    assert!(t.ready(0.0));
}

#[test]
fn throttle_skips_frames_inside_interval() {
    let mut t = FrameThrottle::new(16.7);
    assert!(t.ready(1000.0));
    // A 120 Hz display delivers frames ~8.3ms apart; every other one drops.
    assert!(!t.ready(1008.3));
    assert!(t.ready(1016.7));
    assert!(!t.ready(1025.0));
    assert!(t.ready(1033.4));
}

#[test]
fn throttle_reference_only_advances_on_accept() {
    let mut t = FrameThrottle::new(16.7);
    assert!(t.ready(0.0));
    assert!(!t.ready(10.0));
    assert!(!t.ready(16.0));
    // 16.7ms after the last ACCEPTED frame, not the last attempt.
    assert!(t.ready(16.7));
}

#[test]
fn throttle_passes_normal_60hz_cadence() {
    let mut t = FrameThrottle::new(16.7);
    let mut accepted = 0;
    for i in 0..60 {
        if t.ready(i as f64 * 16.8) {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 60);
}
