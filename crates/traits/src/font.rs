//! Font lookup for families registered by the host.
//!
//! Sites may ship their own font files (`title_font_file` and friends). Those
//! are registered here under the family name the configuration gives them,
//! and consulted before any system font.

use ogcard_style::{FontSpec, FontStyle, FontWeight};
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FontError {
    #[error("Font not found: {family} (weight: {weight:?}, style: {style:?})")]
    NotFound {
        family: String,
        weight: FontWeight,
        style: FontStyle,
    },

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Font parsing error: {0}")]
    ParseError(String),
}

pub type SharedFontData = Arc<Vec<u8>>;

/// A face held by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Where the face was loaded from, if it came from a file.
    pub source_path: Option<String>,
}

/// Families in preference order plus the desired weight and style.
#[derive(Debug, Clone)]
pub struct FontQuery<'a> {
    pub families: &'a [String],
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl<'a> FontQuery<'a> {
    pub fn from_spec(spec: &'a FontSpec) -> Self {
        Self {
            families: &spec.families,
            weight: spec.weight.clone(),
            style: spec.style.clone(),
        }
    }

    pub fn primary_family(&self) -> &str {
        self.families.first().map(String::as_str).unwrap_or("sans-serif")
    }
}

pub trait FontProvider: Send + Sync + Debug {
    /// Returns the best face for `query`, trying its families in order.
    fn load_font(&self, query: &FontQuery<'_>) -> Result<SharedFontData, FontError>;

    fn has_font(&self, query: &FontQuery<'_>) -> bool {
        self.load_font(query).is_ok()
    }

    /// Sorted, de-duplicated family names.
    fn list_families(&self) -> Vec<String>;

    fn name(&self) -> &'static str;
}

/// Faces registered at runtime from font files.
#[derive(Debug, Default)]
pub struct InMemoryFontProvider {
    fonts: RwLock<Vec<(FontDescriptor, SharedFontData)>>,
}

impl InMemoryFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_font(&self, descriptor: FontDescriptor, data: SharedFontData) -> Result<(), FontError> {
        let mut fonts = self.fonts.write().map_err(|_| FontError::LoadFailed {
            path: descriptor.source_path.clone().unwrap_or_else(|| descriptor.family.clone()),
            message: "font store lock poisoned".to_string(),
        })?;
        fonts.push((descriptor, data));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fonts.read().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_match(&self, query: &FontQuery<'_>) -> Option<SharedFontData> {
        let fonts = self.fonts.read().ok()?;
        let target = query.weight.numeric_value() as i32;

        for family in query.families {
            let in_family: Vec<&(FontDescriptor, SharedFontData)> = fonts
                .iter()
                .filter(|(d, _)| d.family.eq_ignore_ascii_case(family))
                .collect();

            // Matching style with the closest weight, else any face of the family.
            let best = in_family
                .iter()
                .filter(|(d, _)| d.style == query.style)
                .min_by_key(|(d, _)| (d.weight.numeric_value() as i32 - target).abs())
                .or_else(|| in_family.first());
            if let Some((_, data)) = best {
                return Some(data.clone());
            }
        }
        None
    }
}

impl FontProvider for InMemoryFontProvider {
    fn load_font(&self, query: &FontQuery<'_>) -> Result<SharedFontData, FontError> {
        self.find_match(query).ok_or_else(|| FontError::NotFound {
            family: query.primary_family().to_string(),
            weight: query.weight.clone(),
            style: query.style.clone(),
        })
    }

    fn list_families(&self) -> Vec<String> {
        let Ok(fonts) = self.fonts.read() else {
            return Vec::new();
        };
        let mut families: Vec<_> = fonts.iter().map(|(d, _)| d.family.clone()).collect();
        families.sort();
        families.dedup();
        families
    }

    fn name(&self) -> &'static str {
        "InMemoryFontProvider"
    }
}
