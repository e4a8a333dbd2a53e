//! QR Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds QR symbol
//! generation, which is the only part that needs the `qrcode` crate.

pub mod qr;

pub use qr_tetris_core as core;
pub use qr_tetris_recorder as recorder;
pub use qr_tetris_term as term;
pub use qr_tetris_types as types;
