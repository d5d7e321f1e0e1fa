//! Plugin configuration as the site generator supplies it.
//!
//! [`CardConfig`] mirrors the user-facing keys, with every value still a
//! string. [`CardConfig::resolve`] parses them into the typed [`StyleConfig`]
//! every card in the run is drawn with.

use crate::error::PipelineError;
use ogcard_style::{DateFormat, FontFile, FontSpec, StyleConfig};
use ogcard_types::Color;
use serde::Deserialize;
use std::path::PathBuf;

/// Default number of cards rendered at once.
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub enable: bool,
    /// Draw the site title in the top-left corner.
    pub blog_title: bool,
    pub blog_title_font: String,
    pub blog_title_font_file: Option<String>,
    pub blog_title_font_file_family: Option<String>,
    pub main_color: String,
    pub secondary_color: String,
    pub font_color: String,
    pub title_font: String,
    pub title_font_file: Option<String>,
    pub title_font_file_family: Option<String>,
    pub date_font: String,
    pub date_font_file: Option<String>,
    pub date_font_file_family: Option<String>,
    pub date_style: String,
    /// Background image, relative to the site's base directory.
    pub main_image: Option<String>,
    pub blog_logo: Option<String>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            enable: true,
            blog_title: false,
            blog_title_font: "Regular 25pt Arial".to_string(),
            blog_title_font_file: None,
            blog_title_font_file_family: None,
            main_color: "#fff".to_string(),
            secondary_color: "#000".to_string(),
            font_color: "#000".to_string(),
            title_font: "Bold 70pt Arial".to_string(),
            title_font_file: None,
            title_font_file_family: None,
            date_font: "Regular 30pt Arial".to_string(),
            date_font_file: None,
            date_font_file_family: None,
            date_style: "YYYY/MM/DD".to_string(),
            main_image: None,
            blog_logo: None,
        }
    }
}

impl CardConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses every value into the style shared by all cards of a run.
    pub fn resolve(&self, site_title: &str) -> Result<StyleConfig, PipelineError> {
        Ok(StyleConfig {
            main_color: parse_color("main_color", &self.main_color)?,
            secondary_color: parse_color("secondary_color", &self.secondary_color)?,
            font_color: parse_color("font_color", &self.font_color)?,
            show_site_title: self.blog_title,
            site_title: site_title.to_string(),
            site_title_font: self.blog_title_font.parse::<FontSpec>()?,
            title_font: self.title_font.parse::<FontSpec>()?,
            date_font: self.date_font.parse::<FontSpec>()?,
            font_files: self.font_files(),
            date_format: DateFormat::parse(&self.date_style)?,
            background_image: non_empty(&self.main_image),
            logo: non_empty(&self.blog_logo),
        })
    }

    /// Font files to register, in site title, date, title order. A file is
    /// only registered when both its path and family are set.
    pub fn font_files(&self) -> Vec<FontFile> {
        [
            (&self.blog_title_font_file, &self.blog_title_font_file_family),
            (&self.date_font_file, &self.date_font_file_family),
            (&self.title_font_file, &self.title_font_file_family),
        ]
        .into_iter()
        .filter_map(|(path, family)| match (non_empty(path), non_empty(family)) {
            (Some(path), Some(family)) => Some(FontFile::new(path, family)),
            _ => None,
        })
        .collect()
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color, PipelineError> {
    value
        .parse::<Color>()
        .map_err(|e| PipelineError::Config(format!("{}: {}", key, e)))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string)
}

/// Where a run reads assets from and how wide it renders.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Directory configured asset paths are relative to.
    pub base_dir: PathBuf,
    /// The site's title, drawn when `blog_title` is enabled.
    pub site_title: String,
    /// Cards rendered at once.
    pub concurrency: usize,
}

impl GeneratorOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            site_title: String::new(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
