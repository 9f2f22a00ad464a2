//! Screen-space placement and fade laws for labels, info cards and the
//! connection shimmer. Pure math; the DOM side lives in the web crate.

use glam::{Mat4, Vec3};

use crate::constants::{
    CONNECTION_BASE_OPACITY, CONNECTION_OPACITY_FLOOR, FLIGHT_OPACITY_FLOOR,
    INFO_CARD_OFFSET_PX, LABEL_FADE_RATE,
};

/// Where a location's label lands on screen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub visible: bool,
}

/// Project a world point through `view_proj` to pixel coordinates. Returns
/// `None` when the point is behind the camera (w <= 0), meaning the label
/// must be hidden outright rather than placed at a mirrored position.
pub fn project_to_screen(
    world: Vec3,
    view_proj: &Mat4,
    width: f32,
    height: f32,
) -> Option<(f32, f32, f32)> {
    let clip = *view_proj * world.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let x = (ndc.x * 0.5 + 0.5) * width;
    let y = (-ndc.y * 0.5 + 0.5) * height;
    Some((x, y, ndc.z))
}

/// Labels fade linearly with scroll, gone entirely at scroll 0.5.
#[inline]
pub fn label_opacity(scroll: f32) -> f32 {
    (1.0 - LABEL_FADE_RATE * scroll).max(0.0)
}

/// Per-frame label placement: the near-side test is `ndc.z < 1`, matching
/// the depth at which the far limb of the globe occludes the point.
pub fn place_label(
    world: Vec3,
    view_proj: &Mat4,
    width: f32,
    height: f32,
    scroll: f32,
) -> LabelPlacement {
    match project_to_screen(world, view_proj, width, height) {
        Some((x, y, z)) if z < 1.0 => LabelPlacement {
            x,
            y,
            opacity: label_opacity(scroll),
            visible: true,
        },
        _ => LabelPlacement { x: 0.0, y: 0.0, opacity: 0.0, visible: false },
    }
}

/// The info card hangs a fixed distance below its label and is only shown
/// while the label itself is visible.
#[inline]
pub fn card_position(label: &LabelPlacement) -> Option<(f32, f32)> {
    label.visible.then_some((label.x, label.y + INFO_CARD_OFFSET_PX))
}

/// Idle shimmer plus scroll fade for connection path `index`. Highlighted
/// paths ignore the scroll fade and shimmer brighter and faster.
pub fn connection_opacity(highlighted: bool, time_ms: f64, index: usize, scroll: f32) -> f32 {
    let i = index as f64;
    if highlighted {
        (0.6 + 0.3 * (time_ms * 0.002 + i * 0.5).sin()) as f32
    } else {
        let base = (CONNECTION_BASE_OPACITY - CONNECTION_BASE_OPACITY * scroll).max(0.0);
        let osc = (0.1 * (time_ms * 0.001 + i * 0.5).sin()) as f32;
        (base + osc).max(CONNECTION_OPACITY_FLOOR)
    }
}

/// Flights fade with scroll but keep a visible floor so the animation never
/// disappears entirely.
#[inline]
pub fn flight_opacity(base: f32, scroll: f32) -> f32 {
    (base * (1.0 - scroll)).max(FLIGHT_OPACITY_FLOOR)
}
