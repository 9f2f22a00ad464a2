use glam::Vec3;

// Shared visual/interaction tuning constants used by the web frontend and tests.

// Globe
pub const GLOBE_RADIUS: f32 = 3.5;
pub const CLOUD_RADIUS: f32 = 3.55;
pub const ATMOSPHERE_RADIUS: f32 = 3.58;
pub const GLOBE_INITIAL_YAW: f32 = std::f32::consts::PI / 8.0;
pub const CLOUD_DRIFT_PER_FRAME: f32 = 0.0002; // slow idle yaw of the cloud shell

// Connection arcs
pub const ARC_SEGMENTS: usize = 50; // 51 sampled points per arc
pub const ARC_ELEVATION: f32 = 0.3; // vertical bulge before renormalization
pub const ARC_BASE_RADIUS: f32 = 3.6; // arc sits proud of the globe surface
pub const ARC_BULGE: f32 = 0.5; // extra radius at the arc midpoint
pub const TUBE_RADIUS: f32 = 0.02;
pub const TUBE_RADIAL_SEGMENTS: usize = 8;
pub const TUBE_SEGMENTS: usize = 20;

// Connection colors and opacity laws
pub const CONNECTION_COLOR: u32 = 0x4ade80;
pub const HIGHLIGHT_COLOR: u32 = 0xffd700;
pub const CONNECTION_BASE_OPACITY: f32 = 0.4;
pub const CONNECTION_OPACITY_FLOOR: f32 = 0.1; // never fully invisible under scroll fade

// Markers (canonical child order: core 0, halo 1, spike 2, ring 3)
pub const MARKER_CORE_RADIUS: f32 = 0.08;
pub const MARKER_HALO_RADIUS: f32 = 0.1;
pub const MARKER_SPIKE_RADIUS: f32 = 0.01;
pub const MARKER_SPIKE_HEIGHT: f32 = 0.3;
pub const MARKER_RING_INNER: f32 = 0.14;
pub const MARKER_RING_OUTER: f32 = 0.17;
pub const MARKER_CORE_OPACITY: f32 = 0.8;
pub const MARKER_HALO_OPACITY: f32 = 0.4;
pub const MARKER_SPIKE_OPACITY: f32 = 0.6;
pub const MARKER_HOVER_SCALE: f32 = 1.3;

// Marker idle/selected animation (time in milliseconds)
pub const PULSE_AMP_IDLE: f32 = 0.3;
pub const PULSE_AMP_SELECTED: f32 = 0.5;
pub const PULSE_RATE_IDLE: f64 = 0.003;
pub const PULSE_RATE_SELECTED: f64 = 0.005;
pub const RING_SPIN_IDLE: f32 = 0.005; // radians per frame
pub const RING_SPIN_SELECTED: f32 = 0.02;

// Flights
pub const FLIGHT_SPEED_MIN: f32 = 0.0003; // progress units per frame
pub const FLIGHT_SPEED_SPAN: f32 = 0.0005;
pub const FLIGHT_HIDE_DOT: f32 = -0.2; // far-hemisphere cull threshold
pub const FLIGHT_OPACITY_FLOOR: f32 = 0.2;

// Camera
pub const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_INITIAL_EYE: Vec3 = Vec3::new(4.0, 0.0, 10.0);
pub const CAMERA_MIN_DISTANCE: f32 = 5.0;
pub const CAMERA_MAX_DISTANCE: f32 = 15.0;
pub const CAMERA_DAMPING: f32 = 0.07;
pub const CAMERA_ROTATE_SPEED: f32 = 0.5;
pub const CAMERA_ZOOM_SPEED: f32 = 0.8;
pub const AUTO_ROTATE_SPEED: f32 = 0.4; // orbit revolutions per minute at 60 fps
pub const AUTO_ROTATE_SCROLL_LIMIT: f32 = 0.3;

// One-shot camera/globe animations
pub const FLY_TO_DURATION_MS: f64 = 1000.0;
pub const INTRO_SPIN_DURATION_MS: f64 = 2000.0;
pub const INTRO_SPIN_DELAY_MS: f64 = 500.0;

// Scroll choreography: eye interpolates toward (4-4s, -s, 10-8.5s)
pub const SCROLL_EYE_LERP: f32 = 0.05; // per-frame smoothing toward the scroll target
pub const SCROLL_SCALE_GAIN: f32 = 0.15; // globe grows slightly as scroll zooms in
pub const LABEL_FADE_RATE: f32 = 2.0; // label opacity = max(0, 1 - rate * scroll)

// Overlay
pub const INFO_CARD_OFFSET_PX: f32 = 40.0; // card sits below its label
pub const TOOLTIP_OFFSET_PX: f32 = 10.0;

// Picking
pub const MARKER_PICK_RADIUS: f32 = 0.17; // covers all four marker parts
pub const PATH_PICK_RADIUS: f32 = 0.06; // a little wider than the tube itself

// Frame loop
pub const MIN_FRAME_MS: f64 = 16.7; // ~60 Hz throttle

/// Unpack a 0xRRGGBB color into linear-ish [0,1] RGB components.
#[inline]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
