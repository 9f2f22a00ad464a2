//! DOM overlay: one floating label and info card per destination plus a
//! shared tooltip, repositioned every frame from the projected marker
//! positions.

use glam::Mat4;
use wasm_bindgen::JsValue;
use web_sys as web;

use globe_core::constants::TOOLTIP_OFFSET_PX;
use globe_core::locations::Location;
use globe_core::overlay::{card_position, place_label};
use globe_core::scene::Scene;

use crate::constants::{CARD_CLASS, LABEL_BG_HOVER, LABEL_BG_IDLE, LABEL_CLASS, TOOLTIP_CLASS};
use crate::dom::create_overlay_div;

pub struct LocationOverlay {
    pub name: &'static str,
    pub label: web::HtmlElement,
    pub card: web::HtmlElement,
}

pub struct OverlaySet {
    entries: Vec<LocationOverlay>,
    tooltip: web::HtmlElement,
}

fn card_html(location: &Location) -> String {
    let programs: String = location
        .programs
        .iter()
        .map(|p| format!("<li>{p}</li>"))
        .collect();
    format!(
        "<h3 class=\"text-lg font-bold mb-2\">{}</h3>\
         <p class=\"text-sm mb-2\">{}</p>\
         <h4 class=\"text-sm font-semibold mt-3 mb-1\">Programs:</h4>\
         <ul class=\"text-xs list-disc list-inside\">{}</ul>",
        location.name, location.description, programs
    )
}

impl OverlaySet {
    pub fn build(
        document: &web::Document,
        container: &web::HtmlElement,
        locations: &[Location],
    ) -> Result<Self, JsValue> {
        let mut entries = Vec::with_capacity(locations.len());
        for loc in locations {
            let label = create_overlay_div(document, container, LABEL_CLASS)?;
            label.set_text_content(Some(loc.name));
            label.style().set_property("transition", "opacity 0.3s ease")?;

            let card = create_overlay_div(document, container, CARD_CLASS)?;
            card.set_inner_html(&card_html(loc));
            card.style()
                .set_property("transition", "opacity 0.3s ease, transform 0.3s ease")?;

            entries.push(LocationOverlay { name: loc.name, label, card });
        }
        let tooltip = create_overlay_div(document, container, TOOLTIP_CLASS)?;
        Ok(Self { entries, tooltip })
    }

    /// Reposition labels and cards from this frame's scene state.
    pub fn update(&self, scene: &Scene, view_proj: &Mat4, width: f32, height: f32) {
        let selected = scene.interaction.selected;
        let hovered = scene.interaction.hovered;
        for (i, entry) in self.entries.iter().enumerate() {
            let placement =
                place_label(scene.marker_positions[i], view_proj, width, height, scene.scroll);
            let style = entry.label.style();
            if placement.visible {
                let _ = style.set_property("opacity", &placement.opacity.to_string());
                let _ = style.set_property("left", &format!("{}px", placement.x));
                let _ = style.set_property("top", &format!("{}px", placement.y));
            } else {
                let _ = style.set_property("opacity", "0");
            }
            let _ = style.set_property(
                "font-weight",
                if hovered == Some(i) { "bold" } else { "normal" },
            );
            let _ = style.set_property(
                "background-color",
                if hovered == Some(i) { LABEL_BG_HOVER } else { LABEL_BG_IDLE },
            );

            // The card shows only while its own label is visible.
            let card = entry.card.style();
            if let Some((cx, cy)) = card_position(&placement).filter(|_| selected == Some(i)) {
                let _ = card.set_property("left", &format!("{cx}px"));
                let _ = card.set_property("top", &format!("{cy}px"));
                let _ = card.set_property("opacity", "1");
                let _ = card.set_property("transform", "translate(-50%, 0)");
            } else {
                let _ = card.set_property("opacity", "0");
                let _ = card.set_property("transform", "translate(-50%, 20px)");
            }
        }
    }

    pub fn show_tooltip(&self, text: &str, x: f32, y: f32) {
        self.tooltip.set_text_content(Some(text));
        let style = self.tooltip.style();
        let _ = style.set_property("left", &format!("{}px", x + TOOLTIP_OFFSET_PX));
        let _ = style.set_property("top", &format!("{}px", y + TOOLTIP_OFFSET_PX));
        let _ = style.set_property("opacity", "1");
    }

    pub fn hide_tooltip(&self) {
        let _ = self.tooltip.style().set_property("opacity", "0");
    }

    /// Detach every element; called exactly once at teardown.
    pub fn remove(&self) {
        for e in &self.entries {
            e.label.remove();
            e.card.remove();
        }
        self.tooltip.remove();
    }
}
