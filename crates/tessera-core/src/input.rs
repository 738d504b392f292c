//! Host-facing input mapping on top of [`Viewport`].
//!
//! A host forwards raw interaction events to a [`Navigator`]; each call
//! returns the next [`RegionRequest`] to decode, or `None` when nothing
//! visible changed and the host should do nothing.

use crate::config::{NavigationConfig, ZoomAnchor};
use crate::consts::WHEEL_DELTA_PER_NOTCH;
use crate::geometry::PyramidGeometry;
use crate::viewport::{RegionRequest, ScreenPoint, Viewport};

/// Navigation keys. `w`/`a`/`s`/`d` pan, `e` zooms in, `q` zooms out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Left,
    Down,
    Right,
    ZoomIn,
    ZoomOut,
}

impl NavKey {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::Up),
            'a' => Some(Self::Left),
            's' => Some(Self::Down),
            'd' => Some(Self::Right),
            'e' => Some(Self::ZoomIn),
            'q' => Some(Self::ZoomOut),
            _ => None,
        }
    }
}

impl std::str::FromStr for NavKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| format!("unknown key '{s}'")),
            _ => Err(format!("expected a single key, got '{s}'")),
        }
    }
}

/// Turns fractional wheel input into whole zoom steps.
///
/// Partial notches accumulate until a full notch is crossed; the remainder
/// carries over. Reversing direction drops the remainder.
#[derive(Clone, Debug, Default)]
pub struct WheelAccumulator {
    residual: f64,
}

impl WheelAccumulator {
    /// Add `notches` (positive = zoom in) and return the whole steps crossed.
    pub fn push(&mut self, notches: f64) -> i32 {
        if !notches.is_finite() || notches == 0.0 {
            return 0;
        }
        if self.residual != 0.0 && self.residual.signum() != notches.signum() {
            self.residual = 0.0;
        }
        self.residual += notches;
        let whole = self.residual.trunc();
        self.residual -= whole;
        whole as i32
    }

    pub fn residual(&self) -> f64 {
        self.residual
    }

    pub fn reset(&mut self) {
        self.residual = 0.0;
    }
}

/// Convert a raw wheel delta (120 per detent) to notches.
pub fn notches_from_raw_delta(delta: f64) -> f64 {
    delta / WHEEL_DELTA_PER_NOTCH
}

pub struct Navigator {
    viewport: Viewport,
    wheel: WheelAccumulator,
    points_per_notch: f64,
}

impl Navigator {
    pub fn new(geometry: PyramidGeometry, width: u32, height: u32, nav: &NavigationConfig) -> Self {
        Self {
            viewport: Viewport::new(geometry, width, height, nav),
            wheel: WheelAccumulator::default(),
            points_per_notch: nav.wheel_points_per_notch,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The request that describes what should currently be on screen.
    pub fn current_request(&self) -> RegionRequest {
        self.viewport.current_request()
    }

    pub fn on_key(&mut self, key: NavKey) -> Option<RegionRequest> {
        match key {
            NavKey::Up => Some(self.viewport.pan(0, -1)),
            NavKey::Down => Some(self.viewport.pan(0, 1)),
            NavKey::Left => Some(self.viewport.pan(-1, 0)),
            NavKey::Right => Some(self.viewport.pan(1, 0)),
            NavKey::ZoomIn => self.viewport.zoom_by(1, None),
            NavKey::ZoomOut => self.viewport.zoom_by(-1, None),
        }
    }

    /// Like [`Navigator::on_key`] for a typed character; unmapped
    /// characters are ignored.
    pub fn on_char(&mut self, c: char) -> Option<RegionRequest> {
        NavKey::from_char(c).and_then(|key| self.on_key(key))
    }

    /// Wheel input in notches (positive = zoom in) at a screen position.
    pub fn on_wheel(&mut self, notches: f64, screen_x: f64, screen_y: f64) -> Option<RegionRequest> {
        let steps = self.wheel.push(notches);
        if steps == 0 {
            return None;
        }
        self.viewport
            .zoom_by(steps, Some(ScreenPoint::new(screen_x, screen_y)))
    }

    /// Smooth-scroll input in points, converted with the configured
    /// points-per-notch ratio.
    pub fn on_scroll_points(&mut self, points: f64, screen_x: f64, screen_y: f64) -> Option<RegionRequest> {
        self.on_wheel(points / self.points_per_notch, screen_x, screen_y)
    }

    /// Pointer drag delta in screen pixels, already oriented so that a
    /// positive value moves the origin right/down.
    pub fn on_drag_delta(&mut self, dx: f64, dy: f64) -> Option<RegionRequest> {
        self.viewport.drag_pan(dx, dy)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) -> Option<RegionRequest> {
        self.viewport.resize(width, height)
    }

    pub fn zoom_to_level(&mut self, level: usize, anchor: Option<ScreenPoint>) -> Option<RegionRequest> {
        self.viewport.zoom_to_level(level, anchor)
    }

    pub fn set_zoom_anchor(&mut self, anchor: ZoomAnchor) {
        self.viewport.set_zoom_anchor(anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_accumulates_partial_notches() {
        let mut acc = WheelAccumulator::default();
        assert_eq!(acc.push(0.4), 0);
        assert_eq!(acc.push(0.4), 0);
        assert_eq!(acc.push(0.4), 1);
        assert!((acc.residual() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_direction_change_drops_residual() {
        let mut acc = WheelAccumulator::default();
        assert_eq!(acc.push(0.75), 0);
        assert_eq!(acc.push(-0.5), 0);
        assert!((acc.residual() + 0.5).abs() < 1e-9);
        assert_eq!(acc.push(-0.5), -1);
    }

    #[test]
    fn test_wheel_multiple_notches() {
        let mut acc = WheelAccumulator::default();
        assert_eq!(acc.push(notches_from_raw_delta(360.0)), 3);
        assert_eq!(acc.push(f64::NAN), 0);
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(NavKey::from_char('W'), Some(NavKey::Up));
        assert_eq!(NavKey::from_char('e'), Some(NavKey::ZoomIn));
        assert_eq!(NavKey::from_char('x'), None);
        assert_eq!("q".parse::<NavKey>(), Ok(NavKey::ZoomOut));
        assert!("qq".parse::<NavKey>().is_err());
    }
}
