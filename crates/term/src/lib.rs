//! Terminal output for QR tetris animations.
//!
//! Frames are drawn into a simple framebuffer and flushed to the terminal
//! with crossterm, diffing against the previous frame. The ASCII renderer
//! is for dumping a single grid to stdout.
//!
//! - [`qr_view`]: grid to framebuffer (pure, no I/O)
//! - [`renderer`]: framebuffer to terminal
//! - [`preview`]: a [`FrameSink`](core::FrameSink) tying the two together
//! - [`ascii`]: half-block text rendering

pub mod ascii;
pub mod fb;
pub mod preview;
pub mod qr_view;
pub mod renderer;

pub use qr_tetris_core as core;
pub use qr_tetris_types as types;

pub use ascii::render_ascii;
pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use preview::Preview;
pub use qr_view::{AnchorY, QrView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
