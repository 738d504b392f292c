/// Pan distance per keystroke, in pixels of the current level.
/// Multiplied by the level downsample to get a level-0 step.
pub const BASE_STEP_PIXELS: u32 = 64;

/// Raw wheel delta reported for one detent by most mouse drivers.
pub const WHEEL_DELTA_PER_NOTCH: f64 = 120.0;

/// Default scroll distance (in points) treated as one wheel notch for
/// smooth-scroll devices such as trackpads.
pub const DEFAULT_WHEEL_POINTS_PER_NOTCH: f64 = 50.0;

/// Default viewport width in screen pixels.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 750;

/// Default viewport height in screen pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 750;

/// Minimum pixel count (w*h) to copy region rows in parallel with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Bytes per decoded RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Pyramid building stops once the longer side of a level drops below this.
pub const DEFAULT_MIN_LEVEL_DIMENSION: u32 = 256;

/// Upper bound on generated pyramid levels, level 0 included.
pub const DEFAULT_MAX_LEVELS: usize = 12;

/// Smallest side (in thumbnail pixels) of the overview box. Used when the
/// viewport covers less than one thumbnail pixel.
pub const OVERVIEW_MIN_BOX_SIDE: f32 = 5.0;
