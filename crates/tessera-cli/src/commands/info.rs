use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tessera_core::source::image_pyramid::ImagePyramid;
use tessera_core::source::PyramidSource;

use crate::summary::print_geometry_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let pyramid = ImagePyramid::open(&args.file, &config.pyramid)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    print_geometry_summary(&args.file, pyramid.geometry(), &config);
    Ok(())
}
