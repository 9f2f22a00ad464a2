use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::DPR_CAP;
use crate::input::capped_dpr;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Keep the canvas backing store matched to its CSS size times the (capped)
/// device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = capped_dpr(w.device_pixel_ratio(), DPR_CAP);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Create a canvas filling the container and append it.
pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> Result<web::HtmlCanvasElement, wasm_bindgen::JsValue> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| wasm_bindgen::JsValue::from_str("canvas element cast failed"))?;
    canvas
        .style()
        .set_property("width", "100%")
        .and_then(|_| canvas.style().set_property("height", "100%"))
        .and_then(|_| canvas.style().set_property("display", "block"))?;
    container.append_child(&canvas)?;
    sync_canvas_backing_size(&canvas);
    Ok(canvas)
}

/// Create an absolutely-positioned overlay div with the given classes.
pub fn create_overlay_div(
    document: &web::Document,
    container: &web::HtmlElement,
    class_name: &str,
) -> Result<web::HtmlElement, wasm_bindgen::JsValue> {
    let el: web::HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| wasm_bindgen::JsValue::from_str("div element cast failed"))?;
    el.set_class_name(class_name);
    el.style().set_property("opacity", "0")?;
    container.append_child(&el)?;
    Ok(el)
}

#[inline]
pub fn set_cursor(cursor: &str) {
    if let Some(doc) = window_document() {
        if let Some(body) = doc.body() {
            let _ = body.style().set_property("cursor", cursor);
        }
    }
}
