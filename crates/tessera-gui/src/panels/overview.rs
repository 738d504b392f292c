use tessera_core::overview::overview_rect;

use crate::app::TesseraApp;

const MAX_SIDE: f32 = 200.0;
const MARGIN: f32 = 10.0;

/// Thumbnail of the whole image in the bottom-right corner, with the
/// visible region outlined.
pub fn draw(ui: &egui::Ui, rect: egui::Rect, app: &TesseraApp) {
    let (Some(thumbnail), Some(nav)) = (app.viewport.thumbnail.as_ref(), app.navigator.as_ref()) else {
        return;
    };
    let [tw, th] = thumbnail.size();
    if tw == 0 || th == 0 {
        return;
    }

    let scale = (MAX_SIDE / tw.max(th) as f32).min(1.0);
    let size = egui::vec2(tw as f32, th as f32) * scale;
    if size.x + MARGIN * 2.0 > rect.width() || size.y + MARGIN * 2.0 > rect.height() {
        return;
    }
    let thumb_rect = egui::Rect::from_min_size(rect.max - size - egui::vec2(MARGIN, MARGIN), size);

    let painter = ui.painter_at(rect);
    painter.rect_filled(thumb_rect.expand(1.0), 0.0, egui::Color32::from_black_alpha(160));
    painter.image(
        thumbnail.id(),
        thumb_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let viewport = nav.viewport();
    let visible = overview_rect(viewport.geometry(), viewport.state(), size.x, size.y);
    let box_rect = egui::Rect::from_min_size(
        thumb_rect.min + egui::vec2(visible.x, visible.y),
        egui::vec2(visible.width, visible.height),
    )
    .intersect(thumb_rect);

    painter.rect_stroke(
        box_rect,
        0.0,
        egui::Stroke::new(1.5, egui::Color32::RED),
        egui::StrokeKind::Inside,
    );
}
