//! Recording sinks for QR tetris runs
//!
//! - [`GifRecorder`]: animated GIF, one image per frame, looping
//! - [`FrameLog`]: JSON dump of every frame
//!
//! Both keep frames in memory and only write when asked, through a
//! `.partial` file that is renamed into place once complete.

pub mod error;
pub mod gif;
pub mod log;
pub mod output;

pub use error::{RecorderError, Result};
pub use gif::{GifOptions, GifRecorder, DEFAULT_BORDER, DEFAULT_SCALE};
pub use log::{grid_rows, FrameLog, FrameRecord};
pub use output::{partial_path, write_atomic, PartialGuard};
