pub mod image_pyramid;

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::consts::RGBA_CHANNELS;
use crate::error::{Result, TesseraError};
use crate::geometry::PyramidGeometry;
use crate::viewport::RegionRequest;

/// Decoded RGBA pixels for one region request, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RegionBuffer {
    /// Wrap raw RGBA bytes, checking the length matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * RGBA_CHANNELS;
        if pixels.len() != expected {
            return Err(TesseraError::Decode(format!(
                "buffer holds {} bytes, {width}x{height} RGBA needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * RGBA_CHANNELS],
        }
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(|| {
            TesseraError::Decode(format!(
                "buffer does not match {}x{} RGBA",
                self.width, self.height
            ))
        })
    }

    /// Save as an 8-bit RGBA PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_rgba_image()?
            .save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// A pyramidal image that can decode arbitrary regions of any level.
pub trait PyramidSource: Send {
    fn geometry(&self) -> &PyramidGeometry;

    /// Decode the region described by `request`.
    ///
    /// The origin is in level-0 pixels; the returned buffer is always
    /// `request.width x request.height`, with pixels outside the image
    /// left transparent.
    fn decode_region(&self, request: &RegionRequest) -> Result<RegionBuffer>;

    /// The entire coarsest level, for overview displays.
    fn thumbnail(&self) -> Result<RegionBuffer> {
        let geometry = self.geometry();
        let level = geometry.coarsest_level();
        let dims = geometry.dimensions(level);
        let width = u32::try_from(dims.width)
            .map_err(|_| TesseraError::Decode(format!("thumbnail width {} too large", dims.width)))?;
        let height = u32::try_from(dims.height)
            .map_err(|_| TesseraError::Decode(format!("thumbnail height {} too large", dims.height)))?;
        self.decode_region(&RegionRequest {
            id: 0,
            origin_x: 0,
            origin_y: 0,
            level,
            width,
            height,
        })
    }
}
