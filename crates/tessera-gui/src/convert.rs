use tessera_core::source::RegionBuffer;

/// Convert a decoded RGBA region into an egui ColorImage.
pub fn region_to_color_image(region: &RegionBuffer) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [region.width as usize, region.height as usize],
        &region.pixels,
    )
}
