use std::path::PathBuf;

use tessera_core::config::{PyramidBuildConfig, ViewerConfig};
use tessera_core::geometry::PyramidGeometry;
use tessera_core::source::RegionBuffer;
use tessera_core::viewport::RegionRequest;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Open an image and build its pyramid.
    Open {
        path: PathBuf,
        pyramid: PyramidBuildConfig,
        generation: u64,
    },

    /// Decode one region of the currently open pyramid.
    Decode {
        request: RegionRequest,
        generation: u64,
    },

    /// Decode a region again and save it as PNG.
    SaveRegion { request: RegionRequest, path: PathBuf },
}

/// Results sent back to the UI thread by the worker and by file dialogs.
pub enum WorkerResult {
    /// A file was picked in the open dialog.
    OpenPicked {
        path: PathBuf,
    },
    Opened {
        path: PathBuf,
        geometry: PyramidGeometry,
        thumbnail: Option<RegionBuffer>,
        generation: u64,
    },
    Region {
        request: RegionRequest,
        region: RegionBuffer,
        generation: u64,
    },
    DecodeFailed {
        request: RegionRequest,
        message: String,
        generation: u64,
    },
    RegionSaved {
        path: PathBuf,
    },
    ConfigImported {
        config: ViewerConfig,
    },
    Error {
        message: String,
    },
}
