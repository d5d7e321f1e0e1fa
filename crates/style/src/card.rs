use crate::date_format::DateFormat;
use crate::font::{FontSpec, FontWeight};
use ogcard_types::Color;

/// A font file to register under a family name before drawing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontFile {
    /// Path relative to the resource base directory.
    pub path: String,
    pub family: String,
}

impl FontFile {
    pub fn new(path: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            family: family.into(),
        }
    }
}

/// The resolved, immutable style of every card in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Canvas fill behind everything else.
    pub main_color: Color,
    /// Branding bar and site title.
    pub secondary_color: Color,
    /// Article title and date.
    pub font_color: Color,
    pub show_site_title: bool,
    pub site_title: String,
    pub site_title_font: FontSpec,
    pub title_font: FontSpec,
    pub date_font: FontSpec,
    pub font_files: Vec<FontFile>,
    pub date_format: DateFormat,
    pub background_image: Option<String>,
    pub logo: Option<String>,
}

const PT: f32 = 96.0 / 72.0;

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            main_color: Color::WHITE,
            secondary_color: Color::BLACK,
            font_color: Color::BLACK,
            show_site_title: false,
            site_title: String::new(),
            site_title_font: FontSpec::new("Arial", 25.0 * PT),
            title_font: FontSpec::new("Arial", 70.0 * PT).with_weight(FontWeight::Bold),
            date_font: FontSpec::new("Arial", 30.0 * PT),
            font_files: Vec::new(),
            date_format: DateFormat::default(),
            background_image: None,
            logo: None,
        }
    }
}

impl StyleConfig {
    /// The site title to draw, if enabled and non-empty.
    pub fn visible_site_title(&self) -> Option<&str> {
        (self.show_site_title && !self.site_title.is_empty()).then_some(self.site_title.as_str())
    }
}
