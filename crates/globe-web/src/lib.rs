#![cfg(target_arch = "wasm32")]

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use globe_core::locations::STUDY_DESTINATIONS;
use globe_core::scene::Scene;

use crate::dom::{create_canvas, set_cursor, window_document};
use crate::frame::FrameContext;
use crate::overlay::OverlaySet;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web loaded");
    Ok(())
}

struct Mounted {
    ctx: Rc<RefCell<FrameContext<'static>>>,
    wiring: events::EventWiring,
    overlay: Rc<OverlaySet>,
    canvas: web::HtmlCanvasElement,
}

/// The interactive study-destination globe. Construct once, `mount` it into a
/// container element, feed it tab and scroll state, and `teardown` when the
/// hosting view unmounts.
#[wasm_bindgen]
pub struct GlobeApp {
    scene: Rc<RefCell<Scene>>,
    paused: Rc<Cell<bool>>,
    alive: Rc<Cell<bool>>,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl GlobeApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GlobeApp {
        let seed = js_sys::Date::now() as u64;
        GlobeApp {
            scene: Rc::new(RefCell::new(Scene::new(seed))),
            paused: Rc::new(Cell::new(false)),
            alive: Rc::new(Cell::new(false)),
            mounted: None,
        }
    }

    /// Build the canvas, overlay and render loop inside `container_id`.
    /// A missing container disables the globe without failing the page.
    pub fn mount(&mut self, container_id: &str) -> Result<(), JsValue> {
        if self.mounted.is_some() {
            log::warn!("[mount] already mounted; ignoring");
            return Ok(());
        }
        let Some(document) = window_document() else { return Ok(()) };
        let Some(container_el) = document.get_element_by_id(container_id) else {
            log::warn!("[mount] container #{container_id} not found, globe disabled");
            return Ok(());
        };
        let container: web::HtmlElement = container_el
            .dyn_into()
            .map_err(|_| JsValue::from_str("container is not an HTML element"))?;
        // Labels, cards and tooltip position absolutely against the container.
        container.style().set_property("position", "relative")?;

        let canvas = create_canvas(&document, &container)?;
        let overlay = Rc::new(OverlaySet::build(&document, &container, STUDY_DESTINATIONS)?);

        let ctx = Rc::new(RefCell::new(FrameContext::new(
            self.scene.clone(),
            overlay.clone(),
            self.paused.clone(),
            canvas.clone(),
        )));

        // Input events share the frame loop's clock so animation start times
        // line up with what `advance` sees.
        let epoch = ctx.borrow().epoch;
        let wiring = events::wire(
            &canvas,
            self.scene.clone(),
            overlay.clone(),
            self.paused.clone(),
            move || epoch.elapsed().as_secs_f64() * 1000.0,
        );
        log::info!("[mount] {} listeners attached", wiring.listener_count());

        let ctx_for_gpu = ctx.clone();
        let canvas_for_gpu = canvas.clone();
        spawn_local(async move {
            if let Some(gpu) = frame::init_gpu(&canvas_for_gpu).await {
                ctx_for_gpu.borrow_mut().gpu = Some(gpu);
                log::info!("[mount] WebGPU renderer ready");
            }
        });

        self.alive.set(true);
        frame::start_loop(ctx.clone(), self.alive.clone());
        self.mounted = Some(Mounted { ctx, wiring, overlay, canvas });
        Ok(())
    }

    /// Mirror the page's active tab ("programs" or "consultation").
    pub fn set_active_tab(&self, tab: &str) {
        events::apply_active_tab(&self.scene, tab);
    }

    /// Scroll progress of the hosting section, clamped to [0, 1].
    pub fn set_scroll_progress(&self, progress: f32) {
        self.scene.borrow_mut().set_scroll(progress);
    }

    /// Release everything mount created. Safe to call more than once; only
    /// the first call does any work.
    pub fn teardown(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            log::warn!("[teardown] nothing mounted");
            return;
        };
        self.alive.set(false);
        // Listener guards detach their DOM callbacks here.
        drop(mounted.wiring);
        mounted.overlay.remove();
        if let Some(mut gpu) = mounted.ctx.borrow_mut().gpu.take() {
            gpu.dispose();
        }
        mounted.canvas.remove();
        set_cursor("auto");
        log::info!("[teardown] globe released");
    }
}
