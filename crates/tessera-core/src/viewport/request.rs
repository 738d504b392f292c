use crate::viewport::ViewportState;

/// Exactly which pixels to decode next.
///
/// The origin is in level-0 pixel coordinates regardless of `level`; the
/// size is in pixels of `level`. `id` increases with every request a
/// viewport emits, so consumers can tell newer results from stale ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionRequest {
    pub id: u64,
    pub origin_x: i64,
    pub origin_y: i64,
    pub level: usize,
    pub width: u32,
    pub height: u32,
}

impl RegionRequest {
    pub(crate) fn from_state(id: u64, state: &ViewportState) -> Self {
        Self {
            id,
            origin_x: state.origin_x,
            origin_y: state.origin_y,
            level: state.level,
            width: state.width,
            height: state.height,
        }
    }

    /// True when both requests describe the same pixels, ignoring `id`.
    pub fn same_region(&self, other: &RegionRequest) -> bool {
        self.origin_x == other.origin_x
            && self.origin_y == other.origin_y
            && self.level == other.level
            && self.width == other.width
            && self.height == other.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for RegionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} origin=({}, {}) level={} size={}x{}",
            self.id, self.origin_x, self.origin_y, self.level, self.width, self.height
        )
    }
}
