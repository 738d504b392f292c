//! Where the visible region sits on a thumbnail of the whole image.

use crate::consts::OVERVIEW_MIN_BOX_SIDE;
use crate::geometry::PyramidGeometry;
use crate::viewport::ViewportState;

/// Rectangle in thumbnail pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverviewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Map the visible region onto a `thumb_width x thumb_height` thumbnail.
///
/// Position comes from the level-0 origin, size from the viewport relative
/// to the current level's extent. Sides under one thumbnail pixel are drawn
/// at [`OVERVIEW_MIN_BOX_SIDE`] instead.
pub fn overview_rect(
    geometry: &PyramidGeometry,
    state: &ViewportState,
    thumb_width: f32,
    thumb_height: f32,
) -> OverviewRect {
    let base = geometry.base_dimensions();
    let level = geometry.dimensions(state.level);

    let x = state.origin_x as f32 / base.width as f32 * thumb_width;
    let y = state.origin_y as f32 / base.height as f32 * thumb_height;
    let mut width = state.width as f32 / level.width as f32 * thumb_width;
    let mut height = state.height as f32 / level.height as f32 * thumb_height;

    if width < 1.0 {
        width = OVERVIEW_MIN_BOX_SIDE;
    }
    if height < 1.0 {
        height = OVERVIEW_MIN_BOX_SIDE;
    }

    OverviewRect {
        x,
        y,
        width,
        height,
    }
}
