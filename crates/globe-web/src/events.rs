//! Event wiring for the globe canvas. Every listener is held in a guard that
//! unregisters it on drop, so teardown leaves no dangling callbacks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use globe_core::locations::STUDY_DESTINATIONS;
use globe_core::scene::{ActiveTab, Hover, Scene};

use crate::dom::{set_cursor, sync_canvas_backing_size};
use crate::input::css_to_canvas_px;
use crate::overlay::OverlaySet;

/// An event listener that removes itself when dropped.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: &'static str,
    callback: js_sys::Function,
    // Keeps the closure memory alive for as long as the listener is attached.
    _closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    pub fn add(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let callback: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        let _ = target.add_event_listener_with_callback(event, &callback);
        Self {
            target: target.clone(),
            event,
            callback,
            _closure: closure,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, &self.callback);
    }
}

pub struct EventWiring {
    guards: Vec<ListenerGuard>,
}

struct PointerTracker {
    down: bool,
    last: (f32, f32),
    drag_distance: f32,
}

fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    css_to_canvas_px(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
        canvas.width() as f32,
        canvas.height() as f32,
    )
}

fn tooltip_for(scene: &Scene, hover: Hover) -> Option<String> {
    match hover {
        Hover::Marker(i) => {
            let loc = &STUDY_DESTINATIONS[i];
            Some(format!("{} - {}", loc.name, loc.programs.join(", ")))
        }
        Hover::Path(i) => {
            let p = &scene.paths[i];
            Some(format!("Connection: {} \u{2194} {}", p.start, p.end))
        }
        Hover::Nothing => None,
    }
}

fn handle_pointer(scene: &mut Scene, overlay: &OverlaySet, canvas: &web::HtmlCanvasElement, x: f32, y: f32) {
    let hover = scene.pointer_move(x, y, canvas.width() as f32, canvas.height() as f32);
    match tooltip_for(scene, hover) {
        Some(text) => {
            // Tooltips track the pointer in CSS pixels.
            let rect = canvas.get_bounding_client_rect();
            let css_x = x / canvas.width() as f32 * rect.width() as f32;
            let css_y = y / canvas.height() as f32 * rect.height() as f32;
            overlay.show_tooltip(&text, css_x, css_y);
            set_cursor("pointer");
        }
        None => {
            overlay.hide_tooltip();
            set_cursor("auto");
        }
    }
}

/// Attach all interaction listeners. `now_ms` supplies a monotonic timestamp
/// for animation starts.
pub fn wire(
    canvas: &web::HtmlCanvasElement,
    scene: Rc<RefCell<Scene>>,
    overlay: Rc<OverlaySet>,
    paused: Rc<Cell<bool>>,
    now_ms: impl Fn() -> f64 + Clone + 'static,
) -> EventWiring {
    let mut guards = Vec::new();
    let tracker = Rc::new(RefCell::new(PointerTracker {
        down: false,
        last: (0.0, 0.0),
        drag_distance: 0.0,
    }));

    // Pointer move: hover decorations, tooltip, and orbit drag.
    {
        let scene = scene.clone();
        let overlay = overlay.clone();
        let canvas = canvas.clone();
        let tracker = tracker.clone();
        guards.push(ListenerGuard::add(
            canvas.clone().unchecked_ref(),
            "pointermove",
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else { return };
                let (x, y) = pointer_canvas_px(ev, &canvas);
                let mut t = tracker.borrow_mut();
                if t.down {
                    let dx = x - t.last.0;
                    let dy = y - t.last.1;
                    t.drag_distance += (dx * dx + dy * dy).sqrt();
                    scene.borrow_mut().camera.rotate(dx, dy);
                }
                t.last = (x, y);
                drop(t);
                handle_pointer(&mut scene.borrow_mut(), &overlay, &canvas, x, y);
            },
        ));
    }

    // Pointer down/up track dragging so a drag does not count as a click.
    {
        let tracker = tracker.clone();
        let canvas_el = canvas.clone();
        guards.push(ListenerGuard::add(
            canvas.clone().unchecked_ref(),
            "pointerdown",
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else { return };
                let mut t = tracker.borrow_mut();
                t.down = true;
                t.drag_distance = 0.0;
                t.last = pointer_canvas_px(ev, &canvas_el);
                ev.prevent_default();
            },
        ));
    }
    {
        let tracker = tracker.clone();
        guards.push(ListenerGuard::add(
            canvas.clone().unchecked_ref(),
            "pointerup",
            move |_ev: web::Event| {
                tracker.borrow_mut().down = false;
            },
        ));
    }

    // Click: select/deselect (suppressed after a real drag).
    {
        let scene = scene.clone();
        let canvas = canvas.clone();
        let tracker = tracker.clone();
        let now = now_ms.clone();
        guards.push(ListenerGuard::add(
            canvas.clone().unchecked_ref(),
            "click",
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else { return };
                if tracker.borrow().drag_distance > 5.0 {
                    return;
                }
                let (x, y) = pointer_canvas_px(ev, &canvas);
                scene.borrow_mut().click(
                    x,
                    y,
                    canvas.width() as f32,
                    canvas.height() as f32,
                    now(),
                );
            },
        ));
    }

    // Single-finger tap selects like a click.
    {
        let scene = scene.clone();
        let canvas = canvas.clone();
        let now = now_ms.clone();
        guards.push(ListenerGuard::add(
            canvas.clone().unchecked_ref(),
            "touchstart",
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else { return };
                let touches = ev.touches();
                if touches.length() != 1 {
                    return;
                }
                let Some(touch) = touches.get(0) else { return };
                let rect = canvas.get_bounding_client_rect();
                let (x, y) = css_to_canvas_px(
                    touch.client_x() as f32,
                    touch.client_y() as f32,
                    rect.left() as f32,
                    rect.top() as f32,
                    rect.width() as f32,
                    rect.height() as f32,
                    canvas.width() as f32,
                    canvas.height() as f32,
                );
                ev.prevent_default();
                scene.borrow_mut().click(
                    x,
                    y,
                    canvas.width() as f32,
                    canvas.height() as f32,
                    now(),
                );
            },
        ));
    }

    // Wheel zoom.
    {
        let scene = scene.clone();
        guards.push(ListenerGuard::add(
            canvas.clone().unchecked_ref(),
            "wheel",
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else { return };
                scene.borrow_mut().camera.zoom(ev.delta_y() as f32);
                ev.prevent_default();
            },
        ));
    }

    if let Some(window) = web::window() {
        // Escape clears the selection.
        {
            let scene = scene.clone();
            guards.push(ListenerGuard::add(
                window.unchecked_ref(),
                "keydown",
                move |ev: web::Event| {
                    let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else { return };
                    if ev.key() == "Escape" {
                        scene.borrow_mut().deselect();
                    }
                },
            ));
        }

        // Keep the backing store matched to the CSS size.
        {
            let canvas = canvas.clone();
            guards.push(ListenerGuard::add(
                window.unchecked_ref(),
                "resize",
                move |_ev: web::Event| {
                    sync_canvas_backing_size(&canvas);
                },
            ));
        }

        // Pause all animation work while the tab is hidden.
        if let Some(document) = window.document() {
            let paused = paused.clone();
            let doc = document.clone();
            guards.push(ListenerGuard::add(
                document.unchecked_ref(),
                "visibilitychange",
                move |_ev: web::Event| {
                    let hidden = doc.visibility_state() == web::VisibilityState::Hidden;
                    paused.set(hidden);
                    log::info!("[events] visibility changed, paused={hidden}");
                },
            ));
        }
    }

    EventWiring { guards }
}

impl EventWiring {
    pub fn listener_count(&self) -> usize {
        self.guards.len()
    }
}

/// Map the page's tab name onto the scene.
pub fn apply_active_tab(scene: &Rc<RefCell<Scene>>, tab: &str) {
    match ActiveTab::from_name(tab) {
        Some(t) => scene.borrow_mut().set_active_tab(t),
        None => log::warn!("[events] unknown tab {tab:?}"),
    }
}
