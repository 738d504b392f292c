//! The viewport coordinate engine.
//!
//! [`Viewport`] owns the pyramid geometry and the live [`ViewportState`],
//! and applies pan, drag, zoom and resize transitions to it. Every
//! transition leaves the origin inside
//! `[0, level0_extent - viewport_extent * downsample]` on each axis (or at 0
//! when the image is smaller than the viewport) and yields the
//! [`RegionRequest`] a decoder should fulfil next.

mod request;
mod state;
mod tracker;

pub use request::RegionRequest;
pub use state::{ScreenPoint, ViewportState};
pub use tracker::{Completion, RequestTracker};

use tracing::debug;

use crate::config::{NavigationConfig, ZoomAnchor};
use crate::geometry::PyramidGeometry;

pub struct Viewport {
    geometry: PyramidGeometry,
    state: ViewportState,
    base_step: u32,
    zoom_anchor: ZoomAnchor,
    next_request_id: u64,
    current: RegionRequest,
}

impl Viewport {
    /// Start at the coarsest level with the origin at (0, 0).
    ///
    /// Zero-sized viewports are widened to one pixel. The initial request
    /// is available from [`Viewport::current_request`].
    pub fn new(geometry: PyramidGeometry, width: u32, height: u32, nav: &NavigationConfig) -> Self {
        let level = geometry.coarsest_level();
        let base_step = nav.base_step.max(1);
        let state = ViewportState {
            origin_x: 0,
            origin_y: 0,
            level,
            width: width.max(1),
            height: height.max(1),
            step_size: step_for(base_step, geometry.downsample(level)),
        };

        let mut viewport = Self {
            geometry,
            state,
            base_step,
            zoom_anchor: nav.zoom_anchor,
            next_request_id: 0,
            current: RegionRequest::from_state(0, &state),
        };
        viewport.clamp_origin();
        viewport.emit();
        viewport
    }

    pub fn geometry(&self) -> &PyramidGeometry {
        &self.geometry
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The most recently emitted request.
    pub fn current_request(&self) -> RegionRequest {
        self.current
    }

    pub fn zoom_anchor(&self) -> ZoomAnchor {
        self.zoom_anchor
    }

    /// Takes effect on the next zoom; the current origin is left alone.
    pub fn set_zoom_anchor(&mut self, anchor: ZoomAnchor) {
        self.zoom_anchor = anchor;
    }

    /// Largest legal origin on each axis for the current level and size.
    pub fn max_origin(&self) -> (i64, i64) {
        let base = self.geometry.base_dimensions();
        let downsample = self.geometry.downsample(self.state.level);
        (
            max_origin_axis(base.width, self.state.width, downsample),
            max_origin_axis(base.height, self.state.height, downsample),
        )
    }

    /// Move by one keyboard step per axis. Only the sign of each direction
    /// component is used. Always emits, even when clamping absorbs the move.
    pub fn pan(&mut self, direction_x: i32, direction_y: i32) -> RegionRequest {
        let step = self.state.step_size;
        self.state.origin_x = self
            .state
            .origin_x
            .saturating_add(i64::from(direction_x.signum()) * step);
        self.state.origin_y = self
            .state
            .origin_y
            .saturating_add(i64::from(direction_y.signum()) * step);
        self.clamp_origin();
        self.emit()
    }

    /// Move by a pointer delta given in screen pixels.
    ///
    /// Returns `None` when the clamped origin did not change.
    pub fn drag_pan(&mut self, delta_x: f64, delta_y: f64) -> Option<RegionRequest> {
        let downsample = self.geometry.downsample(self.state.level);
        let before = (self.state.origin_x, self.state.origin_y);

        // Huge deltas saturate; the clamp below brings them back in range.
        self.state.origin_x = self.state.origin_x.saturating_add(scaled_delta(delta_x, downsample));
        self.state.origin_y = self.state.origin_y.saturating_add(scaled_delta(delta_y, downsample));
        self.clamp_origin();

        if (self.state.origin_x, self.state.origin_y) == before {
            return None;
        }
        Some(self.emit())
    }

    /// Change level by `delta` steps; positive zooms in (towards level 0).
    ///
    /// `anchor` is the screen point to zoom about, the viewport centre when
    /// `None`. Returns `None` when the level is already at the limit.
    pub fn zoom_by(&mut self, delta: i32, anchor: Option<ScreenPoint>) -> Option<RegionRequest> {
        let target = self
            .geometry
            .clamp_level(self.state.level as i64 - i64::from(delta));
        self.zoom_to_level(target, anchor)
    }

    /// Jump to `level` (clamped into range) about `anchor`.
    pub fn zoom_to_level(&mut self, level: usize, anchor: Option<ScreenPoint>) -> Option<RegionRequest> {
        let new_level = self.geometry.clamp_level(level.min(i64::MAX as usize) as i64);
        if new_level == self.state.level {
            return None;
        }

        let old_ds = self.geometry.downsample(self.state.level);
        let new_ds = self.geometry.downsample(new_level);
        let half_w = f64::from(self.state.width) / 2.0;
        let half_h = f64::from(self.state.height) / 2.0;
        let (ax, ay) = self.resolve_anchor(anchor);

        let (new_x, new_y) = match self.zoom_anchor {
            ZoomAnchor::KeepPoint => (
                self.state.origin_x as f64 + ax * (old_ds - new_ds),
                self.state.origin_y as f64 + ay * (old_ds - new_ds),
            ),
            ZoomAnchor::Recenter => (
                self.state.origin_x as f64 + ax * old_ds - half_w * new_ds,
                self.state.origin_y as f64 + ay * old_ds - half_h * new_ds,
            ),
        };

        debug!(
            from = self.state.level,
            to = new_level,
            anchor_x = ax,
            anchor_y = ay,
            "Zoom level change"
        );

        self.state.origin_x = new_x.floor() as i64;
        self.state.origin_y = new_y.floor() as i64;
        self.state.level = new_level;
        self.state.step_size = step_for(self.base_step, new_ds);
        self.clamp_origin();
        Some(self.emit())
    }

    /// Resize the display surface. The origin only moves if the larger
    /// surface would now reach past the image edge.
    ///
    /// Returns `None` when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<RegionRequest> {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.state.width && height == self.state.height {
            return None;
        }
        self.state.width = width;
        self.state.height = height;
        self.clamp_origin();
        Some(self.emit())
    }

    fn resolve_anchor(&self, anchor: Option<ScreenPoint>) -> (f64, f64) {
        let w = f64::from(self.state.width);
        let h = f64::from(self.state.height);
        match anchor {
            Some(p) if p.x.is_finite() && p.y.is_finite() => (p.x.clamp(0.0, w), p.y.clamp(0.0, h)),
            _ => (w / 2.0, h / 2.0),
        }
    }

    fn clamp_origin(&mut self) {
        let (max_x, max_y) = self.max_origin();
        self.state.origin_x = self.state.origin_x.clamp(0, max_x);
        self.state.origin_y = self.state.origin_y.clamp(0, max_y);
    }

    fn emit(&mut self) -> RegionRequest {
        self.next_request_id += 1;
        self.current = RegionRequest::from_state(self.next_request_id, &self.state);
        debug!(request = %self.current, "Region request");
        self.current
    }
}

fn step_for(base_step: u32, downsample: f64) -> i64 {
    (f64::from(base_step) * downsample).floor() as i64
}

fn max_origin_axis(full: u64, extent: u32, downsample: f64) -> i64 {
    let bound = full as f64 - f64::from(extent) * downsample;
    if bound <= 0.0 {
        0
    } else {
        bound.floor() as i64
    }
}

/// Screen delta converted to level-0 pixels, truncated towards zero.
fn scaled_delta(delta: f64, downsample: f64) -> i64 {
    if !delta.is_finite() {
        return 0;
    }
    (delta * downsample).trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_origin_axis_clamps_to_zero() {
        assert_eq!(max_origin_axis(500, 750, 1.0), 0);
        assert_eq!(max_origin_axis(4000, 750, 4.0), 1000);
        assert_eq!(max_origin_axis(4001, 750, 2.5), 2126);
    }

    #[test]
    fn test_scaled_delta_truncates() {
        assert_eq!(scaled_delta(1.6, 2.0), 3);
        assert_eq!(scaled_delta(-1.6, 2.0), -3);
        assert_eq!(scaled_delta(f64::NAN, 2.0), 0);
        assert_eq!(scaled_delta(1e300, 2.0), i64::MAX);
        assert_eq!(scaled_delta(-1e300, 2.0), i64::MIN);
    }

    #[test]
    fn test_step_for_rounds_down() {
        assert_eq!(step_for(64, 4.0), 256);
        assert_eq!(step_for(64, 3.99), 255);
    }
}
