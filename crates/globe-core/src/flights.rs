//! Flight entities cycling along connection arcs.

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::constants::{FLIGHT_HIDE_DOT, FLIGHT_SPEED_MIN, FLIGHT_SPEED_SPAN};

/// One airplane traveling a connection path forever.
#[derive(Clone, Debug)]
pub struct Flight {
    /// Index of the connection path this flight follows.
    pub path: usize,
    pub start: &'static str,
    pub end: &'static str,
    /// Fractional distance along the path, always in [0, 1).
    pub progress: f32,
    /// Progress increment per frame.
    pub speed: f32,
    pub highlighted: bool,
    pub visible: bool,
}

impl Flight {
    /// Spawn with random initial progress and speed so flights on different
    /// paths are visually desynchronized.
    pub fn spawn(path: usize, start: &'static str, end: &'static str, rng: &mut impl Rng) -> Self {
        Self {
            path,
            start,
            end,
            progress: rng.gen_range(0.0..1.0),
            speed: FLIGHT_SPEED_MIN + rng.gen_range(0.0..FLIGHT_SPEED_SPAN),
            highlighted: false,
            visible: true,
        }
    }

    #[inline]
    pub fn touches(&self, name: &str) -> bool {
        self.start == name || self.end == name
    }

    /// Advance one frame; progress wraps modulo 1 so the cycle never ends.
    #[inline]
    pub fn advance(&mut self) {
        self.progress += self.speed;
        if self.progress >= 1.0 {
            self.progress -= 1.0;
        }
    }

    /// Highlighted flights fly at double speed. The flag guard keeps repeated
    /// applies from compounding, so un-highlighting restores the exact
    /// pre-highlight speed.
    pub fn set_highlight(&mut self, on: bool) {
        if on && !self.highlighted {
            self.speed *= 2.0;
        } else if !on && self.highlighted {
            self.speed /= 2.0;
        }
        self.highlighted = on;
    }

    /// Recomputed from scratch every frame; no hysteresis near the threshold.
    #[inline]
    pub fn update_visibility(&mut self, camera_eye: Vec3, position: Vec3) {
        let dot = camera_eye.normalize_or_zero().dot(position.normalize_or_zero());
        self.visible = dot >= FLIGHT_HIDE_DOT;
    }
}

/// Orient the airplane model at `position` to face along `tangent`, nose on
/// the model's +Z axis, belly toward the globe.
pub fn flight_transform(position: Vec3, tangent: Vec3) -> Mat4 {
    let z = if tangent.length_squared() > 1e-12 {
        tangent.normalize()
    } else {
        Vec3::X
    };
    let up = if position.length_squared() > 1e-12 {
        position.normalize()
    } else {
        Vec3::Y
    };
    let mut x = up.cross(z);
    if x.length_squared() < 1e-8 {
        x = Vec3::X;
    }
    let x = x.normalize();
    let y = z.cross(x);
    Mat4::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), position.extend(1.0))
}
