//! QrView: maps a module grid into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Grid;
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const DARK: CellStyle = CellStyle::solid(Rgb(0, 0, 0));
const LIGHT: CellStyle = CellStyle::solid(Rgb(255, 255, 255));
const CAPTION: CellStyle = CellStyle::new(Rgb(160, 160, 170), Rgb(0, 0, 0));

/// Draws a QR grid with its quiet zone.
pub struct QrView {
    /// Module width in terminal columns.
    cell_w: u16,
    /// Module height in terminal rows.
    cell_h: u16,
    /// Light border around the code, in modules.
    border: u16,
    anchor_y: AnchorY,
}

impl Default for QrView {
    fn default() -> Self {
        // Two columns per module keeps modules roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
            border: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl QrView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            ..Self::default()
        }
    }

    pub fn with_border(mut self, border: u16) -> Self {
        self.border = border;
        self
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the drawn code including the quiet zone, in terminal cells.
    pub fn frame_size(&self, grid: &Grid) -> (u16, u16) {
        let modules = grid.size() as u16 + 2 * self.border;
        (modules * self.cell_w, modules * self.cell_h)
    }

    /// Render `grid` into an existing framebuffer, with an optional caption
    /// line under the code.
    pub fn render_into(
        &self,
        grid: &Grid,
        caption: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.reset(viewport.width, viewport.height, CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(grid);
        let total_h = frame_h + u16::from(caption.is_some());
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        // Quiet zone, then dark modules on top.
        fb.fill(Rect::new(start_x, start_y, frame_w, frame_h), LIGHT.into_cell(' '));
        for (y, row) in grid.rows().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    let px = start_x + (x as u16 + self.border) * self.cell_w;
                    let py = start_y + (y as u16 + self.border) * self.cell_h;
                    fb.fill(Rect::new(px, py, self.cell_w, self.cell_h), DARK.into_cell(' '));
                }
            }
        }

        if let Some(text) = caption {
            let text_w = text.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(text_w) / 2;
            fb.write_text(x, start_y + frame_h, text, CAPTION);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, grid: &Grid, caption: Option<&str>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(grid, caption, viewport, &mut fb);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_includes_border() {
        let view = QrView::default();
        assert_eq!(view.frame_size(&Grid::new(21)), (50, 25));
    }

    #[test]
    fn dark_module_is_two_cells_wide() {
        let mut grid = Grid::new(3);
        grid.set(0, 0, true);
        let view = QrView::new(2, 1).with_border(1).with_anchor_y(AnchorY::Top);
        let fb = view.render(&grid, None, Viewport::new(10, 5));

        assert_eq!(fb.get(2, 1).unwrap().style, DARK);
        assert_eq!(fb.get(3, 1).unwrap().style, DARK);
        assert_eq!(fb.get(4, 1).unwrap().style, LIGHT);
        assert_eq!(fb.get(0, 0).unwrap().style, LIGHT);
    }
}
