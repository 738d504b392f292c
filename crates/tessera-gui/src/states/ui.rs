use std::path::PathBuf;

const MAX_LOG_LINES: usize = 200;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,

    /// Increments on every open; results from older generations are ignored.
    pub generation: u64,

    /// True while the worker is building a pyramid.
    pub opening: bool,

    /// Last measured size of the viewport surface in physical pixels.
    pub surface_size: Option<[u32; 2]>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }
}
