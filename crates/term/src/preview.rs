//! Live terminal preview of an animation run.

use std::thread;

use anyhow::Result;
use crossterm::terminal;

use crate::core::{Frame, FrameSink, SinkError};
use crate::fb::FrameBuffer;
use crate::qr_view::{QrView, Viewport};
use crate::renderer::TerminalRenderer;

/// Frame sink that draws every frame and holds it for its duration.
pub struct Preview {
    view: QrView,
    renderer: TerminalRenderer,
    fb: FrameBuffer,
    shown: usize,
}

impl Preview {
    pub fn new() -> Self {
        Self {
            view: QrView::default(),
            renderer: TerminalRenderer::new(),
            fb: FrameBuffer::new(0, 0),
            shown: 0,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        self.shown += 1;
        let caption = format!(
            "frame {}{}  {} ms",
            self.shown,
            if frame.fast { " (drop)" } else { "" },
            frame.duration.as_millis()
        );
        self.view
            .render_into(&frame.grid, Some(&caption), Viewport::new(w, h), &mut self.fb);
        self.renderer.draw(&self.fb)?;
        tracing::trace!(frame = self.shown, fast = frame.fast, "previewed frame");

        thread::sleep(frame.duration);
        Ok(())
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for Preview {
    fn accept(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.show(frame).map_err(SinkError::from)
    }
}
