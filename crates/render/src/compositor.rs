//! Lays out and paints one card.
//!
//! Layout and painting are split: [`Compositor::plan`] measures and wraps the
//! text and decides where everything goes, [`Compositor::paint`] draws the
//! result in fixed z-order. [`Compositor::render`] does both and encodes PNG.

use crate::assets;
use crate::error::RenderError;
use crate::image_cache::{BACKGROUND_KEY, ImageCache, LOGO_KEY};
use ogcard_layout::{
    FontLibrary, ResolvedFont, TextBaseline, fill_text, measure_height, wrap_text,
};
use ogcard_style::StyleConfig;
use ogcard_traits::ResourceProvider;
use ogcard_types::{
    CANVAS_HEIGHT, CANVAS_WIDTH, Color, LOGO_SIZE, MARGIN, Point, RenderRequest, RenderedCard,
    bar_rect, date_baseline,
};
use std::sync::Arc;
use tiny_skia::{Paint, Pixmap, PixmapPaint, Rect, Transform};

/// A string positioned on the card.
#[derive(Debug, Clone)]
pub struct PlacedText {
    pub text: String,
    pub origin: Point,
    pub baseline: TextBaseline,
    pub font: ResolvedFont,
    pub color: Color,
}

/// Where every piece of text on a card goes.
#[derive(Debug, Clone)]
pub struct CardLayout {
    pub site_title: Option<PlacedText>,
    pub date: PlacedText,
    /// Bottom line first.
    pub title_lines: Vec<PlacedText>,
    pub title_line_height: f32,
    pub date_height: f32,
    pub truncated: bool,
}

/// Draws cards for one run.
///
/// Fonts and decoded images are shared between every card the compositor
/// renders, so a single instance is meant to be shared across workers.
#[derive(Debug)]
pub struct Compositor {
    fonts: FontLibrary,
    resources: Arc<dyn ResourceProvider>,
    cache: Arc<ImageCache>,
}

impl Compositor {
    pub fn new(
        fonts: FontLibrary,
        resources: Arc<dyn ResourceProvider>,
        cache: Arc<ImageCache>,
    ) -> Self {
        Self {
            fonts,
            resources,
            cache,
        }
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }

    /// Registers the style's font files. Already registered files are skipped.
    pub fn register_fonts(&self, style: &StyleConfig) -> Result<(), RenderError> {
        for file in &style.font_files {
            self.fonts
                .register_font_file(self.resources.as_ref(), &file.path, &file.family)
                .map_err(|e| RenderError::asset(&file.path, e))?;
        }
        Ok(())
    }

    /// Renders `request` to PNG.
    pub fn render(
        &self,
        request: &RenderRequest,
        style: &StyleConfig,
    ) -> Result<RenderedCard, RenderError> {
        self.register_fonts(style)?;
        let layout = self.plan(request, style)?;
        if layout.truncated {
            log::debug!("Title of '{}' was truncated", request.output_path);
        }
        let pixmap = self.paint(&layout, style)?;
        let data = pixmap
            .encode_png()
            .map_err(|e| RenderError::Encoding(e.to_string()))?;
        Ok(RenderedCard {
            path: request.output_path.clone(),
            data,
        })
    }

    /// Measures and places the card's text.
    pub fn plan(
        &self,
        request: &RenderRequest,
        style: &StyleConfig,
    ) -> Result<CardLayout, RenderError> {
        let left = MARGIN as f32;

        let date_font = self.fonts.resolve(&style.date_font)?;
        let date_text = style.date_format.format(&request.date);
        let date_height = measure_height(&date_font, &date_text)?.height;
        let date_y = date_baseline(date_height);

        let title_font = self.fonts.resolve(&style.title_font)?;
        let line_height = measure_height(&title_font, &request.title)?.height;
        let max_width = (CANVAS_WIDTH - 2 * MARGIN) as f32;
        let block = wrap_text(&request.title, &title_font, max_width, date_y, line_height);

        let title_lines = block
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| PlacedText {
                text: line.clone(),
                origin: Point::new(left, block.line_y(i, date_y, line_height)),
                baseline: TextBaseline::Alphabetic,
                font: title_font.clone(),
                color: style.font_color,
            })
            .collect();

        let site_title = match style.visible_site_title() {
            Some(title) => Some(self.place_site_title(title, style)?),
            None => None,
        };

        Ok(CardLayout {
            site_title,
            date: PlacedText {
                text: date_text,
                origin: Point::new(left, date_y),
                baseline: TextBaseline::Alphabetic,
                font: date_font,
                color: style.font_color,
            },
            title_lines,
            title_line_height: line_height,
            date_height,
            truncated: block.truncated,
        })
    }

    fn place_site_title(&self, title: &str, style: &StyleConfig) -> Result<PlacedText, RenderError> {
        let font = self.fonts.resolve(&style.site_title_font)?;
        let origin = if style.logo.is_some() {
            // Vertically centred on the logo, to its right.
            let height = measure_height(&font, title)?.height;
            Point::new(
                (MARGIN + LOGO_SIZE + MARGIN) as f32,
                MARGIN as f32 + (LOGO_SIZE as f32 / 2.0 - height / 2.0),
            )
        } else {
            Point::new(MARGIN as f32, MARGIN as f32)
        };
        Ok(PlacedText {
            text: title.to_string(),
            origin,
            baseline: TextBaseline::Top,
            font,
            color: style.secondary_color,
        })
    }

    /// Paints background, bar, logo and text, in that order.
    pub fn paint(&self, layout: &CardLayout, style: &StyleConfig) -> Result<Pixmap, RenderError> {
        let mut pixmap = Pixmap::new(CANVAS_WIDTH, CANVAS_HEIGHT).ok_or_else(|| {
            RenderError::InvalidCanvas(format!("{}x{}", CANVAS_WIDTH, CANVAS_HEIGHT))
        })?;
        pixmap.fill(skia_color(style.main_color));

        if let Some(path) = &style.background_image {
            let background = self.cache.get_or_load(BACKGROUND_KEY, || {
                assets::load_background(self.resources.as_ref(), path)
            })?;
            draw_image(&mut pixmap, &background, 0, 0);
        }

        let area = bar_rect();
        let bar = Rect::from_xywh(area.x, area.y, area.width, area.height)
            .ok_or_else(|| RenderError::InvalidCanvas("empty bar".to_string()))?;
        pixmap.fill_rect(bar, &solid_paint(style.secondary_color), Transform::identity(), None);

        if let Some(path) = &style.logo {
            let logo = self.cache.get_or_load(LOGO_KEY, || {
                assets::load_logo(self.resources.as_ref(), path)
            })?;
            draw_image(&mut pixmap, &logo, MARGIN as i32, MARGIN as i32);
        }

        let texts = layout
            .site_title
            .iter()
            .chain(std::iter::once(&layout.date))
            .chain(layout.title_lines.iter());
        for placed in texts {
            fill_text(
                &mut pixmap,
                &placed.font,
                &placed.text,
                placed.origin.x,
                placed.origin.y,
                placed.baseline,
                placed.color,
            );
        }
        Ok(pixmap)
    }
}

fn draw_image(canvas: &mut Pixmap, image: &Pixmap, x: i32, y: i32) {
    canvas.draw_pixmap(
        x,
        y,
        image.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.alpha_u8())
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint
}
