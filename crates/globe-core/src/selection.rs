//! Hover and selection state shared by the pointer handlers and the frame
//! loop.

use crate::flights::Flight;
use crate::markers::MarkerState;
use crate::paths::ConnectionPath;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: Option<usize>,
    pub selected: Option<usize>,
}

impl Interaction {
    /// Update the hovered marker; returns true when the hover target changed
    /// so the caller can refresh the cursor and tooltip.
    pub fn set_hover(&mut self, markers: &mut [MarkerState], idx: Option<usize>) -> bool {
        if idx == self.hovered {
            return false;
        }
        if let Some(prev) = self.hovered {
            markers[prev].is_hovered = false;
        }
        if let Some(next) = idx {
            markers[next].is_hovered = true;
        }
        self.hovered = idx;
        true
    }

    /// Click on marker `idx`: clicking the selected marker deselects it,
    /// anything else becomes the sole selection. Highlight state on paths and
    /// flights is rewritten to match. Returns the new selection.
    pub fn toggle_select(
        &mut self,
        idx: usize,
        markers: &mut [MarkerState],
        paths: &mut [ConnectionPath],
        flights: &mut [Flight],
    ) -> Option<usize> {
        let next = if self.selected == Some(idx) { None } else { Some(idx) };
        self.apply_selection(next, markers, paths, flights);
        self.selected
    }

    /// Clear the selection (click on empty space, Escape).
    pub fn deselect(
        &mut self,
        markers: &mut [MarkerState],
        paths: &mut [ConnectionPath],
        flights: &mut [Flight],
    ) {
        self.apply_selection(None, markers, paths, flights);
    }

    fn apply_selection(
        &mut self,
        next: Option<usize>,
        markers: &mut [MarkerState],
        paths: &mut [ConnectionPath],
        flights: &mut [Flight],
    ) {
        for m in markers.iter_mut() {
            m.is_selected = false;
        }
        let name = next.map(|i| {
            markers[i].is_selected = true;
            markers[i].name
        });
        for p in paths.iter_mut() {
            p.highlighted = name.is_some_and(|n| p.touches(n));
        }
        for f in flights.iter_mut() {
            f.set_highlight(name.is_some_and(|n| f.touches(n)));
        }
        self.selected = next;
        log::debug!("[select] now {:?}", name);
    }
}
