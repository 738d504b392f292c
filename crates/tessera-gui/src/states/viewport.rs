use tessera_core::viewport::RegionRequest;

/// What the central panel currently shows.
#[derive(Default)]
pub struct ViewportDisplay {
    pub texture: Option<egui::TextureHandle>,
    /// Request whose pixels are in `texture`.
    pub displayed: Option<RegionRequest>,
    pub thumbnail: Option<egui::TextureHandle>,
    pub show_overview: bool,
}

impl ViewportDisplay {
    pub fn clear(&mut self) {
        self.texture = None;
        self.displayed = None;
        self.thumbnail = None;
    }
}
