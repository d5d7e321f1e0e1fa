//! Pixel-exact text height measurement.
//!
//! Font metrics describe the em box, not the ink. Card text is positioned by
//! its ink: the string is drawn onto a scratch surface the size of the card
//! and the rows holding any coverage are found by scanning.

use crate::LayoutError;
use crate::fonts::ResolvedFont;
use crate::text::painter::{TextBaseline, fill_text};
use ogcard_types::{CANVAS_HEIGHT, CANVAS_WIDTH, Color};
use std::cell::RefCell;
use tiny_skia::Pixmap;

/// Where measured text is anchored on the scratch surface.
const MEASURE_ANCHOR: (f32, f32) = (25.0, 5.0);

thread_local! {
    static SCRATCH_SURFACE: RefCell<Option<Pixmap>> = const { RefCell::new(None) };
}

/// Tight vertical extent of rendered text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphBox {
    /// `last_row - first_row`; zero when nothing was drawn.
    pub height: f32,
    /// First and last rows with coverage.
    pub rows: Option<(u32, u32)>,
}

/// Measures the ink height of `text` drawn with `font` at a top baseline.
pub fn measure_height(font: &ResolvedFont, text: &str) -> Result<GlyphBox, LayoutError> {
    if text.is_empty() {
        return Ok(GlyphBox::default());
    }

    SCRATCH_SURFACE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let mut surface = match slot.take() {
            Some(mut surface) => {
                surface.fill(tiny_skia::Color::TRANSPARENT);
                surface
            }
            None => Pixmap::new(CANVAS_WIDTH, CANVAS_HEIGHT).ok_or(LayoutError::InvalidSurface {
                width: CANVAS_WIDTH,
                height: CANVAS_HEIGHT,
            })?,
        };

        let (x, y) = MEASURE_ANCHOR;
        fill_text(&mut surface, font, text, x, y, TextBaseline::Top, Color::BLACK);

        let rows = scan_vertical_extent(&surface);
        *slot = Some(surface);
        let height = rows.map(|(first, last)| (last - first) as f32).unwrap_or(0.0);
        log::trace!("Measured '{}' at {}px: {:?}", text, font.size_px, rows);
        Ok(GlyphBox { height, rows })
    })
}

/// First row from the top and last row from the bottom holding any pixel
/// with non-zero alpha.
pub fn scan_vertical_extent(pixmap: &Pixmap) -> Option<(u32, u32)> {
    let width = pixmap.width() as usize;
    let has_ink = |row: &[tiny_skia::PremultipliedColorU8]| row.iter().any(|p| p.alpha() > 0);

    let mut rows = pixmap.pixels().chunks_exact(width);
    let first = rows.position(has_ink)?;
    let last = pixmap.pixels().chunks_exact(width).rposition(has_ink)?;
    Some((first as u32, last as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::system_font;
    use tiny_skia::{Paint, Rect, Transform};

    fn fill_rect(pixmap: &mut Pixmap, y: f32, h: f32) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 0, 0, 255);
        let rect = Rect::from_xywh(3.0, y, 10.0, h).unwrap();
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    #[test]
    fn test_scan_blank_surface() {
        let pixmap = Pixmap::new(50, 40).unwrap();
        assert_eq!(scan_vertical_extent(&pixmap), None);
    }

    #[test]
    fn test_scan_finds_rect_rows() {
        let mut pixmap = Pixmap::new(50, 40).unwrap();
        fill_rect(&mut pixmap, 7.0, 5.0);
        assert_eq!(scan_vertical_extent(&pixmap), Some((7, 11)));
    }

    #[test]
    fn test_scan_spans_separate_shapes() {
        let mut pixmap = Pixmap::new(50, 40).unwrap();
        fill_rect(&mut pixmap, 2.0, 1.0);
        fill_rect(&mut pixmap, 30.0, 4.0);
        assert_eq!(scan_vertical_extent(&pixmap), Some((2, 33)));
    }

    #[test]
    fn test_empty_and_blank_text_measure_zero() {
        let Some(font) = system_font(30.0) else {
            eprintln!("skipping: no system sans-serif font found");
            return;
        };
        assert_eq!(measure_height(&font, "").unwrap().height, 0.0);
        let blank = measure_height(&font, "    ").unwrap();
        assert_eq!(blank.height, 0.0);
        assert!(blank.rows.is_none());
    }

    #[test]
    fn test_measure_is_idempotent() {
        let Some(font) = system_font(93.0) else {
            eprintln!("skipping: no system sans-serif font found");
            return;
        };
        let first = measure_height(&font, "Hello World").unwrap();
        let second = measure_height(&font, "Hello World").unwrap();
        assert_eq!(first, second);
        assert!(first.height > 0.0);
    }

    #[test]
    fn test_descenders_add_height() {
        let Some(font) = system_font(60.0) else {
            eprintln!("skipping: no system sans-serif font found");
            return;
        };
        let flat = measure_height(&font, "xxx").unwrap().height;
        let tall = measure_height(&font, "Hxp").unwrap().height;
        assert!(tall > flat);
        // The scratch surface starts clean for every measurement.
        assert_eq!(measure_height(&font, "xxx").unwrap().height, flat);
    }
}
