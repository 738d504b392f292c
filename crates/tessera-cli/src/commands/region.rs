use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tessera_core::geometry::PyramidGeometry;
use tessera_core::source::image_pyramid::ImagePyramid;
use tessera_core::source::PyramidSource;
use tessera_core::viewport::RegionRequest;

#[derive(Args)]
pub struct RegionArgs {
    /// Input image file
    pub file: PathBuf,

    /// Left edge in level-0 pixels
    #[arg(long, default_value = "0")]
    pub x: i64,

    /// Top edge in level-0 pixels
    #[arg(long, default_value = "0")]
    pub y: i64,

    /// Pyramid level to read from (0 = full resolution)
    #[arg(long, default_value = "0", conflicts_with = "downsample")]
    pub level: usize,

    /// Pick the finest level whose downsample does not exceed this factor
    #[arg(long)]
    pub downsample: Option<f64>,

    /// Region width in pixels of the chosen level
    #[arg(long, default_value = "750")]
    pub width: u32,

    /// Region height in pixels of the chosen level
    #[arg(long, default_value = "750")]
    pub height: u32,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "region.png")]
    pub output: PathBuf,
}

pub fn run(args: &RegionArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("Region width and height must be > 0");
    }

    let config = super::load_config(args.config.as_deref())?;
    let pyramid = ImagePyramid::open(&args.file, &config.pyramid)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    let level = resolve_level(pyramid.geometry(), args.level, args.downsample);
    let request = RegionRequest {
        id: 0,
        origin_x: args.x,
        origin_y: args.y,
        level,
        width: args.width,
        height: args.height,
    };
    println!("Decoding {request}");

    let region = pyramid.decode_region(&request)?;
    region
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}

/// An explicit downsample wins over `--level`; non-positive or non-finite
/// factors fall back to full resolution.
fn resolve_level(geometry: &PyramidGeometry, level: usize, downsample: Option<f64>) -> usize {
    match downsample {
        Some(d) if d.is_finite() && d > 0.0 => geometry.best_level_for_downsample(d),
        Some(_) => 0,
        None => level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PyramidGeometry {
        PyramidGeometry::from_levels(&[(4000, 3000), (2000, 1500), (1000, 750)], &[1.0, 2.0, 4.0])
            .unwrap()
    }

    #[test]
    fn test_downsample_picks_finest_fitting_level() {
        let g = geometry();
        assert_eq!(resolve_level(&g, 0, Some(3.0)), 1);
        assert_eq!(resolve_level(&g, 0, Some(4.0)), 2);
        assert_eq!(resolve_level(&g, 0, Some(64.0)), 2);
        assert_eq!(resolve_level(&g, 2, Some(1.5)), 0);
    }

    #[test]
    fn test_level_used_without_downsample() {
        let g = geometry();
        assert_eq!(resolve_level(&g, 1, None), 1);
        assert_eq!(resolve_level(&g, 2, Some(f64::NAN)), 0);
    }
}
