use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TesseraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pyramid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Failed to open pyramid {}: {source}", path.display())]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to decode region: {0}")]
    Decode(String),

    #[error("Level {level} out of range (levels: {count})")]
    LevelOutOfRange { level: usize, count: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, TesseraError>;
