//! QR symbol generation

use anyhow::{Context, Result};
use qrcode::{Color, EcLevel, QrCode};

use crate::core::Grid;

/// Encode `data` as a QR symbol, dark modules set
///
/// The grid covers the symbol only; the quiet zone is added by renderers.
pub fn encode(data: &str, level: EcLevel) -> Result<Grid> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), level)
        .with_context(|| format!("cannot encode {} bytes as a QR code", data.len()))?;
    let size = code.width();
    let cells = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();
    let grid = Grid::from_cells(size, cells)?;
    tracing::debug!(size, ?level, "encoded qr symbol");
    Ok(grid)
}

/// Encode with the highest error correction level
pub fn encode_default(data: &str) -> Result<Grid> {
    encode(data, EcLevel::H)
}
