use crate::app::TesseraApp;

pub fn show(ctx: &egui::Context, app: &mut TesseraApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed at 4 lines and scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if app.ui_state.opening {
                ui.spinner();
                ui.label("Building pyramid...");
                ui.separator();
            }

            if let Some(nav) = app.navigator.as_ref() {
                let viewport = nav.viewport();
                let state = viewport.state();
                let geometry = viewport.geometry();
                ui.label(format!(
                    "Level {}/{}",
                    state.level,
                    geometry.coarsest_level()
                ));
                ui.separator();
                ui.label(format!("Downsample {:.2}", geometry.downsample(state.level)));
                ui.separator();
                ui.label(format!("Origin ({}, {})", state.origin_x, state.origin_y));
                ui.separator();
                ui.label(format!("Step {}", state.step_size));
                ui.separator();
                ui.label(format!("{}x{}", state.width, state.height));
                ui.separator();
            }

            ui.label(format!("Anchor: {}", app.config.navigation.zoom_anchor));

            if app.tracker.is_busy() {
                ui.separator();
                ui.label("Decoding...");
            }
        });

        ui.add_space(2.0);
    });
}
