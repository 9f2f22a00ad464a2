// DOM wiring and presentation constants for the globe hero section.

// Backing-store resolution cap; anything above 2x wastes fill rate on
// high-density screens.
pub const DPR_CAP: f64 = 2.0;

pub const LABEL_CLASS: &str = "absolute pointer-events-none text-white text-xs px-2 py-1 \
     rounded-lg bg-black/60 whitespace-nowrap transform -translate-x-1/2 -translate-y-1/2";
pub const CARD_CLASS: &str = "absolute pointer-events-auto bg-black/80 text-white p-4 \
     rounded-lg shadow-lg transform -translate-x-1/2 -translate-y-1/2 z-10 max-w-xs";
pub const TOOLTIP_CLASS: &str =
    "absolute pointer-events-none bg-black/80 text-white text-xs px-2 py-1 rounded-md z-10";

// Label hover styling mirrors the marker hover state.
pub const LABEL_BG_IDLE: &str = "rgba(0, 0, 0, 0.6)";
pub const LABEL_BG_HOVER: &str = "rgba(0, 0, 0, 0.8)";

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};
