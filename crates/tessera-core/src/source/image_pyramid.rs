//! In-memory pyramid generated from a flat raster.
//!
//! Any format the `image` crate reads can be opened; level 0 is the file at
//! full resolution and each further level halves the previous one (rounding
//! up) until the longer side would fall below the configured minimum.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::PyramidBuildConfig;
use crate::consts::{PARALLEL_PIXEL_THRESHOLD, RGBA_CHANNELS};
use crate::error::{Result, TesseraError};
use crate::geometry::{LevelDimensions, PyramidGeometry};
use crate::viewport::RegionRequest;

use super::{PyramidSource, RegionBuffer};

pub struct ImagePyramid {
    path: Option<PathBuf>,
    levels: Vec<RgbaImage>,
    geometry: PyramidGeometry,
}

impl ImagePyramid {
    /// Open an image file and build its pyramid.
    pub fn open(path: &Path, config: &PyramidBuildConfig) -> Result<Self> {
        let img = image::open(path).map_err(|source| TesseraError::ImageOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut pyramid = Self::from_image(img.to_rgba8(), config)?;
        pyramid.path = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            levels = pyramid.geometry.level_count(),
            "Opened pyramid"
        );
        Ok(pyramid)
    }

    /// Build a pyramid from an already decoded RGBA image.
    pub fn from_image(base: RgbaImage, config: &PyramidBuildConfig) -> Result<Self> {
        if base.width() == 0 || base.height() == 0 {
            return Err(TesseraError::InvalidGeometry(format!(
                "source image is {}x{}",
                base.width(),
                base.height()
            )));
        }

        let levels = build_levels(base, config);
        let geometry = geometry_for(&levels)?;
        Ok(Self {
            path: None,
            levels,
            geometry,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Pixels of one level, for callers that need direct access.
    pub fn level_image(&self, level: usize) -> Option<&RgbaImage> {
        self.levels.get(level)
    }
}

impl PyramidSource for ImagePyramid {
    fn geometry(&self) -> &PyramidGeometry {
        &self.geometry
    }

    fn decode_region(&self, request: &RegionRequest) -> Result<RegionBuffer> {
        let level_img = self.levels.get(request.level).ok_or(TesseraError::LevelOutOfRange {
            level: request.level,
            count: self.levels.len(),
        })?;
        if request.width == 0 || request.height == 0 {
            return Err(TesseraError::Decode(format!(
                "empty region {}x{}",
                request.width, request.height
            )));
        }

        let downsample = self.geometry.downsample(request.level);
        let left = (request.origin_x as f64 / downsample).floor() as i64;
        let top = (request.origin_y as f64 / downsample).floor() as i64;

        let mut region = RegionBuffer::transparent(request.width, request.height);
        let row_bytes = request.width as usize * RGBA_CHANNELS;
        let copy = |(row, dst): (usize, &mut [u8])| {
            copy_row(level_img, left, top + row as i64, dst);
        };

        if request.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
            region
                .pixels
                .par_chunks_mut(row_bytes)
                .enumerate()
                .for_each(copy);
        } else {
            region.pixels.chunks_mut(row_bytes).enumerate().for_each(copy);
        }

        debug!(request = %request, level_x = left, level_y = top, "Decoded region");
        Ok(region)
    }
}

/// Copy the overlap of source row `src_y`, starting at column `left`, into
/// `dst`. Pixels outside the level stay untouched.
fn copy_row(img: &RgbaImage, left: i64, src_y: i64, dst: &mut [u8]) {
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    if src_y < 0 || src_y >= h {
        return;
    }
    let dst_w = (dst.len() / RGBA_CHANNELS) as i64;
    let start = left.max(0);
    let end = (left + dst_w).min(w);
    if start >= end {
        return;
    }

    let src_row = src_y as usize * w as usize * RGBA_CHANNELS;
    let src = &img.as_raw()[src_row + start as usize * RGBA_CHANNELS..src_row + end as usize * RGBA_CHANNELS];
    let dst_start = (start - left) as usize * RGBA_CHANNELS;
    dst[dst_start..dst_start + src.len()].copy_from_slice(src);
}

fn build_levels(base: RgbaImage, config: &PyramidBuildConfig) -> Vec<RgbaImage> {
    let filter = config.filter.to_image_filter();
    let mut levels = vec![base];

    while levels.len() < config.max_levels.max(1) {
        let Some(last) = levels.last() else { break };
        let longest = last.width().max(last.height());
        if longest / 2 < config.min_level_dimension {
            break;
        }
        let w = last.width().div_ceil(2);
        let h = last.height().div_ceil(2);
        let next = image::imageops::resize(last, w, h, filter);
        debug!(level = levels.len(), width = w, height = h, "Built pyramid level");
        levels.push(next);
    }

    levels
}

/// Downsample factors are the mean of the width and height ratios to level 0.
fn geometry_for(levels: &[RgbaImage]) -> Result<PyramidGeometry> {
    let (w0, h0) = (f64::from(levels[0].width()), f64::from(levels[0].height()));
    let dims = levels
        .iter()
        .map(|l| LevelDimensions::new(u64::from(l.width()), u64::from(l.height())))
        .collect();
    let downsamples = levels
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                1.0
            } else {
                (w0 / f64::from(l.width()) + h0 / f64::from(l.height())) / 2.0
            }
        })
        .collect();
    PyramidGeometry::new(dims, downsamples)
}
