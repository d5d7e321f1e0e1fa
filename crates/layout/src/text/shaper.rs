use crate::fonts::ResolvedFont;
use rustybuzz::{Feature, UnicodeBuffer};
use std::cell::RefCell;
use std::sync::OnceLock;
use ttf_parser::Tag;

// Reuse buffer to avoid allocations in the tight loop
thread_local! {
    static SCRATCH_BUFFER: RefCell<Option<UnicodeBuffer>> = RefCell::new(Some(UnicodeBuffer::new()));
}

#[derive(Debug, Clone)]
pub struct GlyphInstance {
    pub index: u32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_advance: f32,
}

/// Glyphs of one string in pixels, plus its advance width.
#[derive(Debug, Clone, Default)]
pub struct ShapedText {
    pub glyphs: Vec<GlyphInstance>,
    pub width: f32,
}

fn features() -> &'static [Feature] {
    static FEATURES: OnceLock<Vec<Feature>> = OnceLock::new();
    FEATURES.get_or_init(|| {
        vec![
            Feature::new(Tag::from_bytes(b"liga"), 1, ..),
            Feature::new(Tag::from_bytes(b"kern"), 1, ..),
        ]
    })
}

/// Shapes `text` with `font`. Unparseable faces shape to nothing.
pub fn shape(font: &ResolvedFont, text: &str) -> ShapedText {
    if text.is_empty() {
        return ShapedText::default();
    }
    // Stack allocation of Face, safe because font.data (Arc) outlives it
    let Some(face) = font.data.as_face() else {
        return ShapedText::default();
    };
    let scale = font.size_px / face.units_per_em() as f32;

    let mut buffer =
        SCRATCH_BUFFER.with(|b| b.borrow_mut().take().unwrap_or_else(UnicodeBuffer::new));
    buffer.push_str(text);
    buffer.guess_segment_properties();

    let glyph_buffer = rustybuzz::shape(&face, features(), buffer);

    let infos = glyph_buffer.glyph_infos();
    let positions = glyph_buffer.glyph_positions();

    let mut glyphs = Vec::with_capacity(infos.len());
    let mut width = 0.0;
    for (info, pos) in infos.iter().zip(positions.iter()) {
        let x_advance = pos.x_advance as f32 * scale;
        glyphs.push(GlyphInstance {
            index: info.glyph_id,
            x_offset: pos.x_offset as f32 * scale,
            y_offset: pos.y_offset as f32 * scale,
            x_advance,
        });
        width += x_advance;
    }

    let recycled_buffer = glyph_buffer.clear();
    SCRATCH_BUFFER.with(|b| *b.borrow_mut() = Some(recycled_buffer));

    ShapedText { glyphs, width }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::system_font;

    #[test]
    fn test_empty_text_has_no_width() {
        let Some(font) = system_font(30.0) else {
            eprintln!("skipping: no system sans-serif font found");
            return;
        };
        let shaped = shape(&font, "");
        assert!(shaped.glyphs.is_empty());
        assert_eq!(shaped.width, 0.0);
    }

    #[test]
    fn test_width_scales_with_size_and_trailing_space() {
        let Some(small) = system_font(20.0) else {
            eprintln!("skipping: no system sans-serif font found");
            return;
        };
        let large = ResolvedFont::new(small.data.clone(), 40.0);

        let w_small = shape(&small, "Hello").width;
        let w_large = shape(&large, "Hello").width;
        assert!(w_small > 0.0);
        assert!((w_large - 2.0 * w_small).abs() < 0.5);
        assert!(shape(&small, "Hello ").width > w_small);
    }
}
