use std::path::PathBuf;
use std::sync::mpsc;

use tessera_core::config::ViewerConfig;
use tessera_core::input::Navigator;
use tessera_core::source::RegionBuffer;
use tessera_core::viewport::{RegionRequest, RequestTracker};
use tracing::{debug, warn};

use crate::convert::region_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportDisplay};
use crate::worker;

pub struct TesseraApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportDisplay,
    pub config: ViewerConfig,
    pub navigator: Option<Navigator>,
    pub tracker: RequestTracker,
    pub show_about: bool,
}

impl TesseraApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportDisplay {
                show_overview: true,
                ..Default::default()
            },
            config: ViewerConfig::default(),
            navigator: None,
            tracker: RequestTracker::new(),
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::OpenPicked { path } => self.open_path(path),
                WorkerResult::Opened {
                    path,
                    geometry,
                    thumbnail,
                    generation,
                } => {
                    if generation != self.ui_state.generation {
                        continue;
                    }
                    let base = geometry.base_dimensions();
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, {} levels)",
                        path.display(),
                        base.width,
                        base.height,
                        geometry.level_count()
                    ));
                    self.ui_state.opening = false;
                    self.ui_state.file_path = Some(path);

                    self.viewport.thumbnail = thumbnail
                        .as_ref()
                        .map(|t| load_texture(ctx, "thumbnail", t, egui::TextureOptions::LINEAR));

                    let [width, height] = self.ui_state.surface_size.unwrap_or([
                        self.config.viewport.width,
                        self.config.viewport.height,
                    ]);
                    let navigator = Navigator::new(geometry, width, height, &self.config.navigation);
                    let initial = navigator.current_request();
                    self.navigator = Some(navigator);
                    self.tracker.reset();
                    self.submit_request(initial);
                }
                WorkerResult::Region {
                    request,
                    region,
                    generation,
                } => {
                    if generation != self.ui_state.generation {
                        continue;
                    }
                    let completion = self.tracker.complete(request.id);
                    if completion.apply {
                        self.viewport.texture = Some(load_texture(
                            ctx,
                            "viewport",
                            &region,
                            egui::TextureOptions::NEAREST,
                        ));
                        self.viewport.displayed = Some(request);
                    } else {
                        debug!(id = request.id, "Discarding superseded region");
                    }
                    if let Some(next) = completion.next {
                        self.dispatch(next);
                    }
                }
                WorkerResult::DecodeFailed {
                    request,
                    message,
                    generation,
                } => {
                    if generation != self.ui_state.generation {
                        continue;
                    }
                    warn!(id = request.id, %message, "Region decode failed");
                    self.ui_state.add_log(format!("ERROR: decode {request} failed: {message}"));
                    if let Some(next) = self.tracker.fail(request.id) {
                        self.dispatch(next);
                    }
                }
                WorkerResult::RegionSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::ConfigImported { config } => match config.validate() {
                    Ok(()) => {
                        if let Some(nav) = self.navigator.as_mut() {
                            nav.set_zoom_anchor(config.navigation.zoom_anchor);
                        }
                        self.config = config;
                        self.ui_state
                            .add_log("Config imported; pyramid settings apply on next open".into());
                    }
                    Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
                },
                WorkerResult::Error { message } => {
                    self.ui_state.opening = false;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    /// Start opening `path`. Anything still in flight for the previous
    /// image is ignored once it arrives.
    pub fn open_path(&mut self, path: PathBuf) {
        self.ui_state.generation += 1;
        self.ui_state.opening = true;
        self.ui_state.add_log(format!("Opening {}...", path.display()));
        self.navigator = None;
        self.tracker.reset();
        self.viewport.clear();
        self.send_command(WorkerCommand::Open {
            path,
            pyramid: self.config.pyramid.clone(),
            generation: self.ui_state.generation,
        });
    }

    /// Hand a freshly emitted request to the tracker; it reaches the worker
    /// now or once the running decode finishes.
    pub fn submit_request(&mut self, request: RegionRequest) {
        if let Some(request) = self.tracker.submit(request) {
            self.dispatch(request);
        }
    }

    /// Forward an optional navigation result.
    pub fn navigate(&mut self, request: Option<RegionRequest>) {
        if let Some(request) = request {
            self.submit_request(request);
        }
    }

    /// Record the measured surface size in physical pixels.
    pub fn set_surface_size(&mut self, size: [u32; 2]) {
        if self.ui_state.surface_size == Some(size) {
            return;
        }
        self.ui_state.surface_size = Some(size);
        let request = self
            .navigator
            .as_mut()
            .and_then(|nav| nav.on_resize(size[0], size[1]));
        self.navigate(request);
    }

    fn dispatch(&self, request: RegionRequest) {
        self.send_command(WorkerCommand::Decode {
            request,
            generation: self.ui_state.generation,
        });
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for TesseraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Tessera")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Tessera");
                        ui.label("Pyramidal Image Viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        ui.label("W/A/S/D pan, E/Q zoom, wheel zooms at the cursor, drag pans");
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn load_texture(
    ctx: &egui::Context,
    name: &str,
    region: &RegionBuffer,
    options: egui::TextureOptions,
) -> egui::TextureHandle {
    ctx.load_texture(name, region_to_color_image(region), options)
}
