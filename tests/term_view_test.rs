//! Terminal rendering tests (framebuffer and ASCII; no real terminal)

use qr_tetris::core::Grid;
use qr_tetris::term::{encode_full_into, render_ascii, AnchorY, QrView, Viewport};

fn diagonal(size: usize) -> Grid {
    let mut grid = Grid::new(size);
    for i in 0..size as i32 {
        grid.set(i, i, true);
    }
    grid
}

#[test]
fn test_qr_view_centers_code() {
    let grid = diagonal(5);
    let view = QrView::new(2, 1).with_border(1);
    assert_eq!(view.frame_size(&grid), (14, 7));

    let fb = view.render(&grid, None, Viewport::new(24, 11));
    // Centered: x offset (24 - 14) / 2 = 5, y offset (11 - 7) / 2 = 2.
    let dark = fb.get(5 + 2, 2 + 1).unwrap().style;
    let light = fb.get(5, 2).unwrap().style;
    assert_ne!(dark, light);
    assert_eq!(fb.get(5 + 3, 2 + 1).unwrap().style, dark);
    assert_eq!(fb.get(5 + 4, 2 + 1).unwrap().style, light);
}

#[test]
fn test_caption_sits_under_code() {
    let grid = diagonal(3);
    let view = QrView::new(2, 1).with_border(0).with_anchor_y(AnchorY::Top);
    let fb = view.render(&grid, Some("hi"), Viewport::new(6, 5));
    assert_eq!(fb.line(3), "  hi  ");
}

#[test]
fn test_viewport_smaller_than_code_does_not_panic() {
    let grid = diagonal(21);
    let fb = QrView::default().render(&grid, Some("frame 1"), Viewport::new(10, 4));
    assert_eq!((fb.width(), fb.height()), (10, 4));
}

#[test]
fn test_full_encode_contains_every_glyph() {
    let grid = diagonal(2);
    let view = QrView::new(1, 1).with_border(0).with_anchor_y(AnchorY::Top);
    let fb = view.render(&grid, Some("ok"), Viewport::new(2, 3));

    let mut out = Vec::new();
    encode_full_into(&fb, &mut out).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("ok"));
}

#[test]
fn test_ascii_rows_pair_up() {
    let text = render_ascii(&diagonal(4), 0, false);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["▀▄  ", "  ▀▄"]);
}

#[test]
fn test_ascii_inverted_with_border() {
    let text = render_ascii(&Grid::new(2), 1, true);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["████", "████"]);
}
