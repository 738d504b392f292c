/// Live navigation state for one open image.
///
/// `origin_x`/`origin_y` are the top-left of the visible region in level-0
/// pixels. `width`/`height` are the display surface in screen pixels, which
/// equal pixels of the current `level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportState {
    pub origin_x: i64,
    pub origin_y: i64,
    pub level: usize,
    pub width: u32,
    pub height: u32,
    /// Keyboard pan increment in level-0 pixels.
    pub step_size: i64,
}

/// A position on the display surface, in screen pixels from its top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
