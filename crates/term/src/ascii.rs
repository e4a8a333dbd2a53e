//! Half-block text rendering, two module rows per text line.

use crate::core::Grid;

/// Glyphs indexed by `top | bottom << 1`.
const GLYPHS: [char; 4] = [' ', '▀', '▄', '█'];

/// Render `grid` as text with a `border`-module quiet zone.
///
/// Without `invert` dark modules are drawn as ink. On a dark terminal the
/// code then reads as a negative, so `invert` swaps ink and background; the
/// quiet zone is inked too so scanners see a light margin.
pub fn render_ascii(grid: &Grid, border: usize, invert: bool) -> String {
    let n = grid.size() as i64;
    let b = border as i64;
    let module = |x: i64, y: i64| -> bool {
        let inside = x >= 0 && y >= 0 && x < n && y < n;
        let dark = inside && grid.is_filled(x as i32, y as i32);
        let in_frame = x >= -b && y >= -b && x < n + b && y < n + b;
        if invert {
            in_frame && !dark
        } else {
            dark
        }
    };

    let mut out = String::new();
    let mut y = -b;
    while y < n + b {
        for x in -b..n + b {
            let idx = usize::from(module(x, y)) | usize::from(module(x, y + 1)) << 1;
            out.push(GLYPHS[idx]);
        }
        out.push('\n');
        y += 2;
    }
    out
}
