use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use globe_core::constants::{
    hex_rgb, CONNECTION_COLOR, HIGHLIGHT_COLOR, MARKER_CORE_OPACITY, MARKER_HALO_OPACITY,
    MARKER_SPIKE_OPACITY, MIN_FRAME_MS,
};
use globe_core::markers::marker_parts;
use globe_core::overlay::{connection_opacity, flight_opacity};
use globe_core::scene::Scene;

use crate::input::FrameThrottle;
use crate::overlay::OverlaySet;
use crate::render::{DrawList, GpuState, Instance};

const FLIGHT_BODY_COLOR: [f32; 3] = [0.92, 0.94, 0.97];

#[inline]
fn rgba(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub overlay: Rc<OverlaySet>,
    pub paused: Rc<Cell<bool>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuState<'a>>,

    pub throttle: FrameThrottle,
    pub epoch: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        scene: Rc<RefCell<Scene>>,
        overlay: Rc<OverlaySet>,
        paused: Rc<Cell<bool>>,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        Self {
            scene,
            overlay,
            paused,
            canvas,
            gpu: None,
            throttle: FrameThrottle::new(MIN_FRAME_MS),
            epoch: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    pub fn frame(&mut self) {
        if self.paused.get() {
            return;
        }
        let now_ms = self.now_ms();
        if !self.throttle.ready(now_ms) {
            return;
        }

        let mut scene = self.scene.borrow_mut();
        scene.advance(now_ms);

        let width = self.canvas.width().max(1);
        let height = self.canvas.height().max(1);
        let aspect = width as f32 / height as f32;
        let view_proj = scene.camera.view_proj(aspect);
        let world = scene.world_matrix();

        let mut dl = DrawList {
            view_proj,
            model: world,
            eye: scene.camera.eye,
            time_s: (now_ms / 1000.0) as f32,
            shell_opacity: 1.0,
            cloud_yaw: scene.cloud_yaw,
            ..Default::default()
        };

        // Marker parts: two spheres, a spike and a ring per location.
        for (i, marker) in scene.markers.iter().enumerate() {
            let Some(visual) = scene.marker_visuals.get(i) else { continue };
            let parts = marker_parts(scene.marker_positions[i], visual);
            let color = marker.display_color();
            let emissive = if marker.is_selected { 0.25 } else { 0.0 };
            dl.spheres
                .push(Instance::new(parts.core, rgba(color, MARKER_CORE_OPACITY), emissive));
            dl.spheres
                .push(Instance::new(parts.halo, rgba(marker.color, MARKER_HALO_OPACITY), 0.0));
            dl.spikes
                .push(Instance::new(parts.spike, rgba(color, MARKER_SPIKE_OPACITY), 0.0));
            dl.rings
                .push(Instance::new(parts.ring, rgba(color, visual.ring_opacity), emissive));
        }

        // Airplanes. Far-hemisphere poses were already culled by the scene.
        for pose in &scene.flight_poses {
            if !pose.visible {
                continue;
            }
            let (color, emissive) = if pose.highlighted {
                (hex_rgb(HIGHLIGHT_COLOR), 0.2)
            } else {
                (FLIGHT_BODY_COLOR, 0.0)
            };
            let alpha = flight_opacity(1.0, scene.scroll);
            dl.planes.push(Instance::new(pose.transform, rgba(color, alpha), emissive));
        }

        // Connection tubes live in globe-local space; the world matrix is the
        // per-instance model.
        for (i, path) in scene.paths.iter().enumerate() {
            let alpha = connection_opacity(path.highlighted, now_ms, i, scene.scroll);
            let color = if path.highlighted {
                hex_rgb(HIGHLIGHT_COLOR)
            } else {
                hex_rgb(CONNECTION_COLOR)
            };
            dl.tubes.push(Instance::new(world, rgba(color, alpha), 0.0));
        }

        if let Some(g) = &mut self.gpu {
            if scene.paths_dirty {
                g.rebuild_tubes(&scene.paths);
                scene.paths_dirty = false;
            }
            g.resize_if_needed(width, height);
            if let Err(e) = g.render(&dl) {
                log::error!("[render] frame error: {e:?}");
            }
        }

        // Labels and cards position in CSS pixels.
        let rect = self.canvas.get_bounding_client_rect();
        self.overlay
            .update(&scene, &view_proj, rect.width() as f32, rect.height() as f32);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {e:?}");
            None
        }
    }
}

/// Drive the frame loop off requestAnimationFrame. The first time the loop
/// observes `alive == false` it takes itself out of the shared cell, breaking
/// the closure's self-cycle so the context it captured is released.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>, alive: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive.get() {
            // The closure shim defers deallocation until this call returns,
            // so dropping ourselves here is fine.
            let _ = tick_clone.borrow_mut().take();
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
