//! Text layout for social cards: font resolution, shaping, pixel-exact
//! height measurement, and the bottom-up line wrapper.

use ogcard_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    Font(#[from] FontError),
    #[error("Cannot allocate a {width}x{height} surface.")]
    InvalidSurface { width: u32, height: u32 },
}

pub mod fonts;
pub mod measure;
pub mod text;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::fonts::{FontData, FontInstance, FontLibrary, ResolvedFont};
pub use self::measure::{GlyphBox, measure_height, scan_vertical_extent};
pub use self::text::painter::{TextBaseline, fill_text};
pub use self::text::script::{is_cjk, is_cjk_char, tokenize};
pub use self::text::shaper::{GlyphInstance, ShapedText, shape};
pub use self::text::wrapper::{ELLIPSIS, TextMeasurer, WrappedBlock, wrap_text};
