//! A navigator paired with the source it requests regions from.

use std::path::Path;

use tracing::warn;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::input::{NavKey, Navigator};
use crate::source::image_pyramid::ImagePyramid;
use crate::source::{PyramidSource, RegionBuffer};
use crate::viewport::RegionRequest;

pub struct ViewerSession<S: PyramidSource> {
    source: S,
    navigator: Navigator,
}

impl ViewerSession<ImagePyramid> {
    /// Open `path` and return the session plus the initial request
    /// (coarsest level, origin at 0,0).
    pub fn on_open(path: &Path, config: &ViewerConfig) -> Result<(Self, RegionRequest)> {
        config.validate()?;
        let source = ImagePyramid::open(path, &config.pyramid)?;
        Ok(Self::new(source, config))
    }
}

impl<S: PyramidSource> ViewerSession<S> {
    pub fn new(source: S, config: &ViewerConfig) -> (Self, RegionRequest) {
        let navigator = Navigator::new(
            source.geometry().clone(),
            config.viewport.width,
            config.viewport.height,
            &config.navigation,
        );
        let initial = navigator.current_request();
        (Self { source, navigator }, initial)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn on_key(&mut self, key: NavKey) -> Option<RegionRequest> {
        self.navigator.on_key(key)
    }

    pub fn on_wheel(&mut self, notches: f64, screen_x: f64, screen_y: f64) -> Option<RegionRequest> {
        self.navigator.on_wheel(notches, screen_x, screen_y)
    }

    pub fn on_drag_delta(&mut self, dx: f64, dy: f64) -> Option<RegionRequest> {
        self.navigator.on_drag_delta(dx, dy)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) -> Option<RegionRequest> {
        self.navigator.on_resize(width, height)
    }

    /// Decode a request. Navigation state is never touched, so a failure
    /// leaves the session ready for the next interaction.
    pub fn decode(&self, request: &RegionRequest) -> Result<RegionBuffer> {
        self.source.decode_region(request).inspect_err(|e| {
            warn!(request = %request, error = %e, "Region decode failed");
        })
    }
}
