//! Error types for frame recording

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecorderError>;

#[derive(Debug, Error)]
pub enum RecorderError {
    /// GIF encoding failed
    #[error("gif encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// File system error on the given path
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Frame log serialization failed
    #[error("frame log serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Output path has no file name to derive a temporary name from
    #[error("output path {} has no file name", .0.display())]
    InvalidPath(PathBuf),

    /// Nothing was recorded
    #[error("no frames recorded")]
    Empty,
}

impl RecorderError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| RecorderError::Io { path, source }
    }
}
