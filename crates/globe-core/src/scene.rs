//! Scene controller: owns every animated entity and the interaction state
//! machine, independent of the DOM and GPU so the whole thing runs in native
//! tests.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{ease_in_out_quad, scroll_eye_target, OrbitCamera};
use crate::constants::{
    AUTO_ROTATE_SCROLL_LIMIT, CLOUD_DRIFT_PER_FRAME, GLOBE_INITIAL_YAW, GLOBE_RADIUS,
    INTRO_SPIN_DELAY_MS, INTRO_SPIN_DURATION_MS, SCROLL_SCALE_GAIN,
};
use crate::flights::{flight_transform, Flight};
use crate::geo::{centering_yaw, lat_lon_to_vec3_in};
use crate::locations::{Location, STUDY_DESTINATIONS};
use crate::markers::{MarkerState, MarkerVisual};
use crate::paths::{build_connections, ConnectionPath, PathIndex};
use crate::picking::{pick_marker, pick_path, pointer_ndc, Ray};
use crate::selection::Interaction;

/// Content tab of the surrounding page; only the programs tab idles with
/// auto-rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveTab {
    Programs,
    Consultation,
}

impl ActiveTab {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "programs" => Some(Self::Programs),
            "consultation" => Some(Self::Consultation),
            _ => None,
        }
    }
}

/// What the pointer is over this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hover {
    Marker(usize),
    Path(usize),
    Nothing,
}

enum IntroPhase {
    Waiting,
    Spinning { start_ms: f64, from: f32, to: f32 },
    Done,
}

/// Snapshot of one flight for the renderer.
#[derive(Clone, Copy, Debug)]
pub struct FlightPose {
    pub transform: Mat4,
    pub visible: bool,
    pub highlighted: bool,
}

pub struct Scene {
    pub markers: Vec<MarkerState>,
    /// World-space marker positions, refreshed every frame.
    pub marker_positions: Vec<Vec3>,
    pub marker_visuals: Vec<MarkerVisual>,
    /// Connection arcs in globe-local space; the world matrix applies at
    /// render time.
    pub paths: Vec<ConnectionPath>,
    pub path_index: PathIndex,
    pub flights: Vec<Flight>,
    pub flight_poses: Vec<FlightPose>,
    pub camera: OrbitCamera,
    pub interaction: Interaction,
    pub active_tab: ActiveTab,
    pub scroll: f32,
    pub globe_yaw: f32,
    pub cloud_yaw: f32,
    pub globe_scale: f32,
    /// Set whenever the connection set changes; the renderer consumes it and
    /// rebuilds (disposing the previous GPU meshes first).
    pub paths_dirty: bool,
    intro: IntroPhase,
    mounted_ms: Option<f64>,
    rng: StdRng,
}

impl Scene {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let locations = STUDY_DESTINATIONS;
        let markers: Vec<MarkerState> =
            locations.iter().map(|loc| MarkerState::new(loc, &mut rng)).collect();
        let paths = build_connections(locations, &Mat4::IDENTITY);
        let path_index = PathIndex::build(&paths);
        // Pointer events can arrive before the first frame tick, so marker
        // positions must be valid from construction.
        let world = Mat4::from_rotation_y(GLOBE_INITIAL_YAW);
        let marker_positions = markers
            .iter()
            .map(|m| lat_lon_to_vec3_in(&world, m.lat, m.lon, GLOBE_RADIUS))
            .collect();
        let flights: Vec<Flight> = paths
            .iter()
            .enumerate()
            .map(|(i, p)| Flight::spawn(i, p.start, p.end, &mut rng))
            .collect();

        log::info!(
            "[scene] {} locations, {} paths, {} flights",
            locations.len(),
            paths.len(),
            flights.len()
        );

        Self {
            marker_positions,
            marker_visuals: Vec::new(),
            markers,
            paths,
            path_index,
            flights,
            flight_poses: Vec::new(),
            camera: OrbitCamera::new(),
            interaction: Interaction::default(),
            active_tab: ActiveTab::Programs,
            scroll: 0.0,
            globe_yaw: GLOBE_INITIAL_YAW,
            cloud_yaw: 0.0,
            globe_scale: 1.0,
            paths_dirty: true,
            intro: IntroPhase::Waiting,
            mounted_ms: None,
            rng,
        }
    }

    pub fn locations(&self) -> &'static [Location] {
        STUDY_DESTINATIONS
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.globe_scale)) * Mat4::from_rotation_y(self.globe_yaw)
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    pub fn set_scroll(&mut self, progress: f32) {
        self.scroll = progress.clamp(0.0, 1.0);
        self.globe_scale = 1.0 + SCROLL_SCALE_GAIN * self.scroll;
    }

    fn step_intro(&mut self, now_ms: f64) {
        let mounted = *self.mounted_ms.get_or_insert(now_ms);
        match self.intro {
            IntroPhase::Waiting => {
                if now_ms - mounted >= INTRO_SPIN_DELAY_MS {
                    let to = centering_yaw(STUDY_DESTINATIONS[0].lon);
                    self.intro = IntroPhase::Spinning {
                        start_ms: now_ms,
                        from: self.globe_yaw,
                        to,
                    };
                }
            }
            IntroPhase::Spinning { start_ms, from, to } => {
                let t = (((now_ms - start_ms) / INTRO_SPIN_DURATION_MS).min(1.0)) as f32;
                self.globe_yaw = from + (to - from) * ease_in_out_quad(t);
                if t >= 1.0 {
                    self.intro = IntroPhase::Done;
                    self.paths_dirty = true;
                }
            }
            IntroPhase::Done => {}
        }
    }

    /// Per-frame update: intro spin, marker pulse, flight motion, camera.
    pub fn advance(&mut self, now_ms: f64) {
        self.step_intro(now_ms);
        self.cloud_yaw += CLOUD_DRIFT_PER_FRAME;

        let world = self.world_matrix();
        for (i, m) in self.markers.iter().enumerate() {
            self.marker_positions[i] = lat_lon_to_vec3_in(&world, m.lat, m.lon, GLOBE_RADIUS);
        }
        self.marker_visuals.clear();
        for m in self.markers.iter_mut() {
            self.marker_visuals.push(m.animate(now_ms));
        }

        self.flight_poses.clear();
        for f in self.flights.iter_mut() {
            f.advance();
            let path = &self.paths[f.path];
            let pos = world.transform_point3(path.curve.point_at(f.progress));
            let tangent = world
                .transform_vector3(path.curve.tangent_at(f.progress))
                .normalize_or_zero();
            f.update_visibility(self.camera.eye, pos);
            self.flight_poses.push(FlightPose {
                transform: flight_transform(pos, tangent),
                visible: f.visible,
                highlighted: f.highlighted,
            });
        }

        self.camera.auto_rotate = self.active_tab == ActiveTab::Programs
            && self.interaction.selected.is_none()
            && self.scroll < AUTO_ROTATE_SCROLL_LIMIT;
        let scroll_eye = (self.scroll > 0.0).then(|| scroll_eye_target(self.scroll));
        self.camera.update(now_ms, scroll_eye);
    }

    fn pointer_ray(&self, px: f32, py: f32, width: f32, height: f32) -> Ray {
        let (nx, ny) = pointer_ndc(px, py, width, height);
        Ray::from_ndc(nx, ny, &self.camera.view_proj(width / height.max(1.0)))
    }

    fn local_ray(&self, ray: &Ray) -> Ray {
        let inv = self.world_matrix().inverse();
        Ray {
            origin: inv.transform_point3(ray.origin),
            dir: inv.transform_vector3(ray.dir).normalize_or_zero(),
        }
    }

    /// Hit test a pointer position: markers take priority over paths.
    pub fn hit_test(&self, px: f32, py: f32, width: f32, height: f32) -> Hover {
        let ray = self.pointer_ray(px, py, width, height);
        if let Some(i) = pick_marker(&ray, &self.marker_positions) {
            return Hover::Marker(i);
        }
        match pick_path(&self.local_ray(&ray), &self.paths) {
            Some(i) => Hover::Path(i),
            None => Hover::Nothing,
        }
    }

    /// Pointer move: refresh hover state, returning the hit for tooltip and
    /// cursor handling.
    pub fn pointer_move(&mut self, px: f32, py: f32, width: f32, height: f32) -> Hover {
        let hover = self.hit_test(px, py, width, height);
        let idx = match hover {
            Hover::Marker(i) => Some(i),
            _ => None,
        };
        self.interaction.set_hover(&mut self.markers, idx);
        hover
    }

    /// Click: toggle selection on a hit marker (flying the camera to a fresh
    /// selection), clear selection on a miss.
    pub fn click(&mut self, px: f32, py: f32, width: f32, height: f32, now_ms: f64) {
        match self.hit_test(px, py, width, height) {
            Hover::Marker(i) => {
                let selected = self.interaction.toggle_select(
                    i,
                    &mut self.markers,
                    &mut self.paths,
                    &mut self.flights,
                );
                if selected == Some(i) {
                    self.camera.start_fly_to(
                        self.marker_positions[i],
                        GLOBE_RADIUS * self.globe_scale,
                        now_ms,
                    );
                }
            }
            _ => self.deselect(),
        }
    }

    pub fn deselect(&mut self) {
        self.interaction
            .deselect(&mut self.markers, &mut self.paths, &mut self.flights);
    }

    /// Rebuild the connection set from scratch, reapplying the active
    /// selection's highlights. The renderer must dispose its tube meshes when
    /// it sees `paths_dirty`.
    pub fn rebuild_connections(&mut self) {
        self.paths = build_connections(STUDY_DESTINATIONS, &Mat4::IDENTITY);
        self.path_index = PathIndex::build(&self.paths);
        self.flights = self
            .paths
            .iter()
            .enumerate()
            .map(|(i, p)| Flight::spawn(i, p.start, p.end, &mut self.rng))
            .collect();
        if let Some(sel) = self.interaction.selected {
            let name = self.markers[sel].name;
            for p in self.paths.iter_mut() {
                p.highlighted = p.touches(name);
            }
            for f in self.flights.iter_mut() {
                if f.touches(name) {
                    f.set_highlight(true);
                }
            }
        }
        self.paths_dirty = true;
    }
}
