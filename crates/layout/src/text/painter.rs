//! Fills shaped text onto a tiny-skia surface.

use crate::fonts::ResolvedFont;
use crate::text::shaper::shape;
use ogcard_types::Color;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};
use ttf_parser::{GlyphId, OutlineBuilder};

/// Which line of the text the `y` coordinate refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// `y` is the top of the em box.
    Top,
    /// `y` is the alphabetic baseline.
    Alphabetic,
}

/// Draws `text` with its left edge at `x`. Returns the number of glyphs that
/// produced an outline.
pub fn fill_text(
    pixmap: &mut Pixmap,
    font: &ResolvedFont,
    text: &str,
    x: f32,
    y: f32,
    baseline: TextBaseline,
    color: Color,
) -> usize {
    let Some(face) = font.data.as_face() else {
        return 0;
    };
    let scale = font.size_px / face.units_per_em() as f32;
    let baseline_y = match baseline {
        TextBaseline::Top => y + face.ascender() as f32 * scale,
        TextBaseline::Alphabetic => y,
    };
    let paint = fill_paint(color);

    let mut pen_x = x;
    let mut drawn = 0;
    for glyph in shape(font, text).glyphs {
        let mut builder = GlyphPathBuilder::new(
            pen_x + glyph.x_offset,
            baseline_y - glyph.y_offset,
            scale,
        );
        pen_x += glyph.x_advance;

        if face
            .outline_glyph(GlyphId(glyph.index as u16), &mut builder)
            .is_none()
        {
            continue;
        }
        let Some(path) = builder.finish() else {
            continue;
        };
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        drawn += 1;
    }
    drawn
}

fn fill_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.alpha_u8());
    paint.anti_alias = true;
    paint
}

/// Converts font-unit outlines (y up) into device paths (y down).
struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(origin_x: f32, origin_y: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            origin_y,
            scale,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }

    fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
