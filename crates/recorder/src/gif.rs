//! Animated GIF recording
//!
//! Frames are rasterised as they arrive and kept in memory; nothing touches
//! the file system until [`GifRecorder::finish`] is called after a run has
//! succeeded.

use std::path::Path;
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, ImageBuffer, Rgba, RgbaImage};

use qr_tetris_core::{Frame, FrameSink, Grid, SinkError};

use crate::error::{RecorderError, Result};
use crate::output::write_atomic;

/// Pixel size of one module
pub const DEFAULT_SCALE: u32 = 10;

/// Light margin around the code, in modules
pub const DEFAULT_BORDER: u32 = 4;

/// How a grid is rasterised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifOptions {
    pub scale: u32,
    pub border: u32,
    pub dark: [u8; 4],
    pub light: [u8; 4],
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            border: DEFAULT_BORDER,
            dark: [0, 0, 0, 255],
            light: [255, 255, 255, 255],
        }
    }
}

impl GifOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the module size in pixels (at least 1)
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_colors(mut self, dark: [u8; 4], light: [u8; 4]) -> Self {
        self.dark = dark;
        self.light = light;
        self
    }

    /// Side of the rendered image in pixels
    pub fn image_size(&self, grid_size: usize) -> u32 {
        (grid_size as u32 + 2 * self.border) * self.scale
    }

    /// Rasterise one grid
    pub fn render(&self, grid: &Grid) -> RgbaImage {
        let side = self.image_size(grid.size());
        let mut img: RgbaImage = ImageBuffer::from_pixel(side, side, Rgba(self.light));

        for (y, row) in grid.rows().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if !filled {
                    continue;
                }
                let px = (x as u32 + self.border) * self.scale;
                let py = (y as u32 + self.border) * self.scale;
                for dy in 0..self.scale {
                    for dx in 0..self.scale {
                        img.put_pixel(px + dx, py + dy, Rgba(self.dark));
                    }
                }
            }
        }

        img
    }
}

/// Frame sink that builds an animated GIF
#[derive(Debug, Default)]
pub struct GifRecorder {
    options: GifOptions,
    frames: Vec<(RgbaImage, Duration)>,
}

impl GifRecorder {
    pub fn new(options: GifOptions) -> Self {
        Self {
            options,
            frames: Vec::new(),
        }
    }

    pub fn options(&self) -> &GifOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Encode every recorded frame, looping forever
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.frames.is_empty() {
            return Err(RecorderError::Empty);
        }

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            encoder.set_repeat(Repeat::Infinite)?;
            for (img, duration) in &self.frames {
                let delay = Delay::from_saturating_duration(*duration);
                encoder.encode_frame(image::Frame::from_parts(img.clone(), 0, 0, delay))?;
            }
        }
        Ok(bytes)
    }

    /// Encode and write to `path`, returning the number of frames
    pub fn finish(self, path: &Path) -> Result<usize> {
        let bytes = self.encode()?;
        write_atomic(path, &bytes)?;
        tracing::info!(path = %path.display(), frames = self.frames.len(), bytes = bytes.len(), "wrote gif");
        Ok(self.frames.len())
    }
}

impl FrameSink for GifRecorder {
    fn accept(&mut self, frame: &Frame) -> std::result::Result<(), SinkError> {
        let img = self.options.render(&frame.grid);
        self.frames.push((img, frame.duration));
        Ok(())
    }
}
