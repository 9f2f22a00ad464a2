//! Orbit camera with inertial damping, one-shot fly-to animation and the
//! scroll-driven dolly.

use glam::{Mat4, Vec3};

use crate::constants::{
    AUTO_ROTATE_SPEED, CAMERA_DAMPING, CAMERA_FAR, CAMERA_FOV_Y, CAMERA_INITIAL_EYE,
    CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_NEAR, CAMERA_ROTATE_SPEED,
    CAMERA_ZOOM_SPEED, FLY_TO_DURATION_MS, SCROLL_EYE_LERP,
};

/// Quadratic ease-in-out; `t` in [0,1].
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// In-flight camera move. Start state is captured at trigger time, so a
/// fly-to started mid-flight interpolates from wherever the camera is.
#[derive(Clone, Copy, Debug)]
pub struct FlyTo {
    from_eye: Vec3,
    from_target: Vec3,
    to_eye: Vec3,
    to_target: Vec3,
    start_ms: f64,
}

/// Orbit camera in the spirit of drei's controls: pointer drags and wheel
/// ticks accumulate into velocities that decay by the damping factor each
/// frame, so motion coasts to a stop.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub auto_rotate: bool,
    yaw_vel: f32,
    pitch_vel: f32,
    zoom_vel: f32,
    fly: Option<FlyTo>,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            eye: CAMERA_INITIAL_EYE,
            target: Vec3::ZERO,
            auto_rotate: false,
            yaw_vel: 0.0,
            pitch_vel: 0.0,
            zoom_vel: 0.0,
            fly: None,
        }
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Pointer drag in device pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_vel += dx * 0.005 * CAMERA_ROTATE_SPEED;
        self.pitch_vel += dy * 0.005 * CAMERA_ROTATE_SPEED;
    }

    /// Wheel delta; positive zooms out.
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_vel += delta * 0.001 * CAMERA_ZOOM_SPEED;
    }

    pub fn is_flying(&self) -> bool {
        self.fly.is_some()
    }

    /// Begin a 1000ms eased move toward `surface_point`. The look-at target
    /// lands on the sphere surface along the point's direction; the eye keeps
    /// its current orbit radius and approach direction.
    pub fn start_fly_to(&mut self, surface_point: Vec3, surface_radius: f32, now_ms: f64) {
        let to_target = surface_point.normalize_or_zero() * surface_radius;
        let dir = (self.eye - self.target).normalize_or_zero();
        let dir = if dir.length_squared() > 0.0 { dir } else { Vec3::Z };
        let to_eye = to_target + dir * self.distance();
        self.fly = Some(FlyTo {
            from_eye: self.eye,
            from_target: self.target,
            to_eye,
            to_target,
            start_ms: now_ms,
        });
    }

    fn step_fly(&mut self, now_ms: f64) -> bool {
        let Some(fly) = self.fly else { return false };
        let t = ((now_ms - fly.start_ms) / FLY_TO_DURATION_MS).clamp(0.0, 1.0) as f32;
        let e = ease_in_out_quad(t);
        self.eye = fly.from_eye.lerp(fly.to_eye, e);
        self.target = fly.from_target.lerp(fly.to_target, e);
        if t >= 1.0 {
            self.fly = None;
        }
        true
    }

    /// Per-frame update. `scroll_eye` is the scroll choreography's desired
    /// eye position when `Some`; autorotation and manual deltas apply on top.
    pub fn update(&mut self, now_ms: f64, scroll_eye: Option<Vec3>) {
        if self.step_fly(now_ms) {
            return;
        }
        if let Some(want) = scroll_eye {
            self.eye = self.eye.lerp(want, SCROLL_EYE_LERP);
        }

        let mut yaw = self.yaw_vel;
        if self.auto_rotate {
            // revolutions per minute, matching drei's autoRotateSpeed at 60fps
            yaw += AUTO_ROTATE_SPEED * std::f32::consts::TAU / (60.0 * 60.0);
        }
        let offset = self.eye - self.target;
        let radius = offset.length().max(1e-6);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta -= yaw;
        phi = (phi + self.pitch_vel).clamp(0.05, std::f32::consts::PI - 0.05);
        let radius = (radius * (1.0 + self.zoom_vel))
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);

        self.eye = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );

        let keep = 1.0 - CAMERA_DAMPING;
        self.yaw_vel *= keep;
        self.pitch_vel *= keep;
        self.zoom_vel *= keep;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(CAMERA_FOV_Y, aspect.max(1e-3), CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Eye position the scroll choreography steers toward at progress `s`.
#[inline]
pub fn scroll_eye_target(s: f32) -> Vec3 {
    Vec3::new(4.0 - 4.0 * s, -s, 10.0 - 8.5 * s)
}
