use serde::{Deserialize, Serialize};

use crate::consts::{
    BASE_STEP_PIXELS, DEFAULT_MAX_LEVELS, DEFAULT_MIN_LEVEL_DIMENSION,
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, DEFAULT_WHEEL_POINTS_PER_NOTCH,
};
use crate::error::{Result, TesseraError};

/// Top-level viewer configuration, loadable from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub pyramid: PyramidBuildConfig,
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(TesseraError::InvalidConfig(format!(
                "viewport size must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.navigation.base_step == 0 {
            return Err(TesseraError::InvalidConfig("base_step must be > 0".into()));
        }
        if !(self.navigation.wheel_points_per_notch > 0.0) {
            return Err(TesseraError::InvalidConfig(
                "wheel_points_per_notch must be > 0".into(),
            ));
        }
        if self.pyramid.min_level_dimension == 0 || self.pyramid.max_levels == 0 {
            return Err(TesseraError::InvalidConfig(
                "min_level_dimension and max_levels must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Initial display surface size in screen pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// How a zoom step places the new origin relative to the anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomAnchor {
    /// The level-0 point under the anchor moves to the viewport centre:
    /// `origin + anchor * ds_old - (extent / 2) * ds_new`.
    #[default]
    Recenter,
    /// The level-0 point under the anchor stays under the anchor:
    /// `origin + anchor * (ds_old - ds_new)`.
    KeepPoint,
}

impl std::fmt::Display for ZoomAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeepPoint => write!(f, "Keep Point"),
            Self::Recenter => write!(f, "Recenter"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Keyboard pan step in current-level pixels.
    pub base_step: u32,
    pub zoom_anchor: ZoomAnchor,
    /// Smooth-scroll distance counted as one wheel notch.
    pub wheel_points_per_notch: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_step: BASE_STEP_PIXELS,
            zoom_anchor: ZoomAnchor::default(),
            wheel_points_per_notch: DEFAULT_WHEEL_POINTS_PER_NOTCH,
        }
    }
}

/// Resampling filter used when generating coarser levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Triangle,
    Lanczos3,
}

impl ResampleFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Triangle => write!(f, "Triangle"),
            Self::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// Controls how [`ImagePyramid`](crate::source::image_pyramid::ImagePyramid)
/// generates its levels from a flat raster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidBuildConfig {
    pub min_level_dimension: u32,
    pub max_levels: usize,
    pub filter: ResampleFilter,
}

impl Default for PyramidBuildConfig {
    fn default() -> Self {
        Self {
            min_level_dimension: DEFAULT_MIN_LEVEL_DIMENSION,
            max_levels: DEFAULT_MAX_LEVELS,
            filter: ResampleFilter::default(),
        }
    }
}
