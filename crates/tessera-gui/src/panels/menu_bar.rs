use tessera_core::config::{ViewerConfig, ZoomAnchor};

use crate::app::TesseraApp;
use crate::messages::{WorkerCommand, WorkerResult};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp", "gif"];

pub fn show(ctx: &egui::Context, app: &mut TesseraApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                let can_save = app.navigator.is_some();
                if ui
                    .add_enabled(
                        can_save,
                        egui::Button::new("Save View As...").shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    save_view(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut app.viewport.show_overview, "Overview");
                ui.separator();

                ui.label("Zoom anchor");
                for anchor in [ZoomAnchor::Recenter, ZoomAnchor::KeepPoint] {
                    if ui
                        .radio(app.config.navigation.zoom_anchor == anchor, anchor.to_string())
                        .clicked()
                    {
                        app.config.navigation.zoom_anchor = anchor;
                        if let Some(nav) = app.navigator.as_mut() {
                            nav.set_zoom_anchor(anchor);
                        }
                    }
                }

                if let Some(level_count) = app
                    .navigator
                    .as_ref()
                    .map(|nav| nav.viewport().geometry().level_count())
                {
                    ui.separator();
                    ui.menu_button("Go to Level", |ui| {
                        for level in 0..level_count {
                            if ui.button(format!("Level {level}")).clicked() {
                                ui.close();
                                let request = app
                                    .navigator
                                    .as_mut()
                                    .and_then(|nav| nav.zoom_to_level(level, None));
                                app.navigate(request);
                            }
                        }
                    });
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.config = ViewerConfig::default();
                    if let Some(nav) = app.navigator.as_mut() {
                        nav.set_zoom_anchor(app.config.navigation.zoom_anchor);
                    }
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            save_view(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// The dialog runs on its own thread and reports back through the result
/// channel, so the pick arrives as a regular worker result.
fn open_file(app: &mut TesseraApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = result_tx.send(WorkerResult::OpenPicked { path });
        }
    });
}

fn save_view(app: &mut TesseraApp) {
    let Some(request) = app.navigator.as_ref().map(|nav| nav.current_request()) else {
        return;
    };
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(format!("region_{}_{}_L{}.png", request.origin_x, request.origin_y, request.level))
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveRegion { request, path });
        }
    });
}

fn import_config(app: &mut TesseraApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        let result = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str::<ViewerConfig>(&content).map_err(|e| e.to_string()));
        let _ = match result {
            Ok(config) => result_tx.send(WorkerResult::ConfigImported { config }),
            Err(message) => result_tx.send(WorkerResult::Error {
                message: format!("Failed to import {}: {message}", path.display()),
            }),
        };
    });
}

fn export_config(app: &mut TesseraApp) {
    let config = app.config.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("tessera.toml")
            .save_file()
        {
            if let Ok(content) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, content);
            }
        }
    });
}
