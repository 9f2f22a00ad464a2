//! Location markers: four visual parts per destination plus idle/selected
//! pulse animation. Positions are re-derived from lat/lon every frame so a
//! marker can never drift from its geographic coordinate.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

use crate::constants::*;
use crate::locations::Location;

#[derive(Clone, Debug)]
pub struct MarkerState {
    pub name: &'static str,
    pub lat: f32,
    pub lon: f32,
    pub color: [f32; 3],
    /// Random phase offset so idle pulses are desynchronized.
    pub pulse_phase: f32,
    pub ring_angle: f32,
    pub is_selected: bool,
    pub is_hovered: bool,
}

/// Per-frame animation outputs for one marker.
#[derive(Clone, Copy, Debug)]
pub struct MarkerVisual {
    pub core_scale: f32,
    pub halo_scale: f32,
    pub ring_angle: f32,
    pub ring_opacity: f32,
}

impl MarkerState {
    pub fn new(location: &Location, rng: &mut impl Rng) -> Self {
        Self {
            name: location.name,
            lat: location.lat,
            lon: location.lon,
            color: hex_rgb(location.color),
            pulse_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            ring_angle: 0.0,
            is_selected: false,
            is_hovered: false,
        }
    }

    /// Advance the idle/selected animation and return this frame's visuals.
    ///
    /// Selected markers pulse wider and faster and spin their ring harder;
    /// ring opacity oscillates between tighter, brighter bounds.
    pub fn animate(&mut self, time_ms: f64) -> MarkerVisual {
        let (amp, rate, spin, op_base, op_amp, op_rate) = if self.is_selected {
            (PULSE_AMP_SELECTED, PULSE_RATE_SELECTED, RING_SPIN_SELECTED, 0.6, 0.3, 0.003)
        } else {
            (PULSE_AMP_IDLE, PULSE_RATE_IDLE, RING_SPIN_IDLE, 0.2, 0.1, 0.002)
        };
        self.ring_angle += spin;

        let halo_scale = 1.0 + amp * ((time_ms * rate) as f32 + self.pulse_phase).sin();
        let ring_opacity = op_base + op_amp * ((time_ms * op_rate) as f32).sin();
        MarkerVisual {
            core_scale: if self.is_hovered { MARKER_HOVER_SCALE } else { 1.0 },
            halo_scale,
            ring_angle: self.ring_angle,
            ring_opacity,
        }
    }

    /// Effective display color: selected markers switch to the highlight hue.
    #[inline]
    pub fn display_color(&self) -> [f32; 3] {
        if self.is_selected {
            hex_rgb(HIGHLIGHT_COLOR)
        } else {
            self.color
        }
    }
}

/// Orientation frame for a marker group at `position`: look at the origin,
/// then rotate 90 degrees about local X so the spike points radially outward.
pub fn marker_transform(position: Vec3) -> Mat4 {
    let out = if position.length_squared() > 1e-12 {
        position.normalize()
    } else {
        Vec3::Y
    };
    // Basis with +Z pointing away from the globe center, matching a look-at
    // whose eye is the marker and whose target is the origin.
    let mut x = Vec3::Y.cross(out);
    if x.length_squared() < 1e-8 {
        x = Vec3::X; // polar fallback
    }
    let x = x.normalize();
    let y = out.cross(x);
    let look = Mat4::from_cols(x.extend(0.0), y.extend(0.0), out.extend(0.0), position.extend(1.0));
    look * Mat4::from_quat(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2))
}

/// Model matrices for all four marker parts, in canonical child order.
#[derive(Clone, Copy, Debug)]
pub struct MarkerParts {
    pub core: Mat4,
    pub halo: Mat4,
    pub spike: Mat4,
    pub ring: Mat4,
}

pub fn marker_parts(position: Vec3, visual: &MarkerVisual) -> MarkerParts {
    let group = marker_transform(position);
    let core = group * Mat4::from_scale(Vec3::splat(MARKER_CORE_RADIUS * visual.core_scale));
    let halo = group * Mat4::from_scale(Vec3::splat(MARKER_HALO_RADIUS * visual.halo_scale));
    // Spike is a unit-height cylinder along local Y, lifted to sit on the surface.
    let spike = group
        * Mat4::from_translation(Vec3::new(0.0, MARKER_SPIKE_HEIGHT * 0.5, 0.0))
        * Mat4::from_scale(Vec3::new(MARKER_SPIKE_RADIUS, MARKER_SPIKE_HEIGHT, MARKER_SPIKE_RADIUS));
    // Ring lies tangent to the sphere and spins in its own plane.
    let ring = group
        * Mat4::from_quat(Quat::from_rotation_y(visual.ring_angle))
        * Mat4::from_quat(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
    MarkerParts { core, halo, spike, ring }
}
