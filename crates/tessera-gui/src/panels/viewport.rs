use tessera_core::input::NavKey;

use crate::app::TesseraApp;
use crate::panels::overview;

pub fn show(ctx: &egui::Context, app: &mut TesseraApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            paint_background(ui, rect);

            // The navigator works in physical pixels so decoded regions map 1:1
            // onto the screen.
            let ppp = ctx.pixels_per_point();
            app.set_surface_size([
                (rect.width() * ppp).round().max(1.0) as u32,
                (rect.height() * ppp).round().max(1.0) as u32,
            ]);

            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

            if app.navigator.is_none() {
                show_placeholder(ui, app.ui_state.opening);
                return;
            }

            handle_keys(ctx, app);
            handle_wheel(ui, &response, app, rect, ppp);
            handle_drag(&response, app, ppp);

            if response.double_clicked() {
                let request = app.navigator.as_mut().and_then(|nav| {
                    let coarsest = nav.viewport().geometry().coarsest_level();
                    nav.zoom_to_level(coarsest, None)
                });
                app.navigate(request);
            }

            draw_region(ui, rect, app, ppp);
            if app.viewport.show_overview {
                overview::draw(ui, rect, app);
            }
        });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn nav_key(key: egui::Key) -> Option<NavKey> {
    match key {
        egui::Key::W => Some(NavKey::Up),
        egui::Key::A => Some(NavKey::Left),
        egui::Key::S => Some(NavKey::Down),
        egui::Key::D => Some(NavKey::Right),
        egui::Key::E => Some(NavKey::ZoomIn),
        egui::Key::Q => Some(NavKey::ZoomOut),
        _ => None,
    }
}

fn handle_keys(ctx: &egui::Context, app: &mut TesseraApp) {
    if ctx.wants_keyboard_input() {
        return;
    }
    let keys: Vec<NavKey> = ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if !modifiers.command => nav_key(*key),
                _ => None,
            })
            .collect()
    });

    for key in keys {
        let request = app.navigator.as_mut().and_then(|nav| nav.on_key(key));
        app.navigate(request);
    }
}

fn handle_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut TesseraApp, rect: egui::Rect, ppp: f32) {
    if !response.hovered() {
        return;
    }
    let anchor = ui
        .input(|i| i.pointer.hover_pos())
        .map(|pos| (pos - rect.min) * ppp)
        .unwrap_or_else(|| rect.size() * ppp / 2.0);

    let wheel: Vec<(egui::MouseWheelUnit, f32)> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::MouseWheel { unit, delta, .. } => Some((*unit, delta.y)),
                _ => None,
            })
            .collect()
    });

    for (unit, delta) in wheel {
        let (x, y) = (f64::from(anchor.x), f64::from(anchor.y));
        let request = app.navigator.as_mut().and_then(|nav| match unit {
            egui::MouseWheelUnit::Point => nav.on_scroll_points(f64::from(delta), x, y),
            egui::MouseWheelUnit::Line | egui::MouseWheelUnit::Page => nav.on_wheel(f64::from(delta), x, y),
        });
        app.navigate(request);
    }
}

/// Dragging moves the image with the pointer, so the origin moves the
/// other way.
fn handle_drag(response: &egui::Response, app: &mut TesseraApp, ppp: f32) {
    if !response.dragged_by(egui::PointerButton::Primary) {
        return;
    }
    let delta = response.drag_delta() * ppp;
    if delta == egui::Vec2::ZERO {
        return;
    }
    let request = app
        .navigator
        .as_mut()
        .and_then(|nav| nav.on_drag_delta(-f64::from(delta.x), -f64::from(delta.y)));
    app.navigate(request);
}

fn draw_region(ui: &egui::Ui, rect: egui::Rect, app: &TesseraApp, ppp: f32) {
    let (Some(texture), Some(displayed)) = (app.viewport.texture.as_ref(), app.viewport.displayed) else {
        return;
    };
    let size = egui::vec2(displayed.width as f32, displayed.height as f32) / ppp;
    let img_rect = egui::Rect::from_min_size(rect.min, size);
    ui.painter().image(
        texture.id(),
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn show_placeholder(ui: &mut egui::Ui, opening: bool) {
    let text = if opening {
        "Building pyramid..."
    } else {
        "Open an image to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
