// Pure pointer/frame-pacing math, kept free of web-sys so it runs in
// host-side tests.

/// Map a client-space (CSS px) pointer position into canvas backing-store
/// pixels given the canvas bounding rect.
#[inline]
pub fn css_to_canvas_px(
    client_x: f32,
    client_y: f32,
    rect_left: f32,
    rect_top: f32,
    rect_w: f32,
    rect_h: f32,
    canvas_w: f32,
    canvas_h: f32,
) -> (f32, f32) {
    let x_css = client_x - rect_left;
    let y_css = client_y - rect_top;
    if rect_w <= 0.0 || rect_h <= 0.0 {
        return (0.0, 0.0);
    }
    ((x_css / rect_w) * canvas_w, (y_css / rect_h) * canvas_h)
}

/// Clamp the device pixel ratio used for the backing store.
#[inline]
pub fn capped_dpr(dpr: f64, cap: f64) -> f64 {
    if dpr > cap {
        cap
    } else if dpr < 0.5 {
        0.5
    } else {
        dpr
    }
}

/// ~60 Hz frame gate: animation frames arriving faster than the minimum
/// interval are skipped entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameThrottle {
    last_ms: Option<f64>,
    min_interval_ms: f64,
}

impl FrameThrottle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            last_ms: None,
            min_interval_ms,
        }
    }

    /// True when enough time has passed to process this frame; advances the
    /// reference timestamp only when the frame is accepted.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.min_interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}
