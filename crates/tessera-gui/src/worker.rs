use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use tessera_core::config::PyramidBuildConfig;
use tessera_core::source::image_pyramid::ImagePyramid;
use tessera_core::source::PyramidSource;
use tessera_core::viewport::RegionRequest;
use tracing::{debug, info, warn};

use crate::messages::{WorkerCommand, WorkerResult};

/// Pyramid owned by the worker thread, tagged with the open generation.
struct OpenPyramid {
    source: Box<dyn PyramidSource>,
    generation: u64,
}

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("tessera-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut current: Option<OpenPyramid> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Open {
                path,
                pyramid,
                generation,
            } => {
                if let Some(opened) = handle_open(&path, &pyramid, generation, &tx, &ctx) {
                    current = Some(opened);
                }
            }
            WorkerCommand::Decode {
                request,
                generation,
            } => {
                handle_decode(current.as_ref(), request, generation, &tx, &ctx);
            }
            WorkerCommand::SaveRegion { request, path } => {
                handle_save_region(current.as_ref(), &request, &path, &tx, &ctx);
            }
        }
    }
}

fn handle_open(
    path: &Path,
    config: &PyramidBuildConfig,
    generation: u64,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Option<OpenPyramid> {
    let start = Instant::now();
    let pyramid = match ImagePyramid::open(path, config) {
        Ok(p) => p,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to open file: {e}"));
            return None;
        }
    };
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "Pyramid ready");

    let thumbnail = match pyramid.thumbnail() {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(error = %e, "Thumbnail decode failed");
            None
        }
    };

    send(
        tx,
        ctx,
        WorkerResult::Opened {
            path: path.to_path_buf(),
            geometry: pyramid.geometry().clone(),
            thumbnail,
            generation,
        },
    );

    Some(OpenPyramid {
        source: Box::new(pyramid),
        generation,
    })
}

fn handle_decode(
    current: Option<&OpenPyramid>,
    request: RegionRequest,
    generation: u64,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(open) = current.filter(|o| o.generation == generation) else {
        debug!(id = request.id, generation, "Dropping decode for a closed pyramid");
        return;
    };

    match open.source.decode_region(&request) {
        Ok(region) => send(
            tx,
            ctx,
            WorkerResult::Region {
                request,
                region,
                generation,
            },
        ),
        Err(e) => send(
            tx,
            ctx,
            WorkerResult::DecodeFailed {
                request,
                message: e.to_string(),
                generation,
            },
        ),
    }
}

fn handle_save_region(
    current: Option<&OpenPyramid>,
    request: &RegionRequest,
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(open) = current else {
        send_error(tx, ctx, "No image open");
        return;
    };

    let result = open
        .source
        .decode_region(request)
        .and_then(|region| region.save_png(path));
    match result {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::RegionSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save view: {e}")),
    }
}
