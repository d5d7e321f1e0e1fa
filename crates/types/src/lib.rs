pub mod canvas;
pub mod color;
pub mod document;
pub mod geometry;

pub use canvas::{
    BAR_TOP, CANVAS_HEIGHT, CANVAS_WIDTH, LOGO_SIZE, MARGIN, bar_rect, date_baseline,
};
pub use color::Color;
pub use document::{Document, RenderRequest, RenderedCard, THUMBNAIL_FILE_NAME, parse_timestamp};
pub use geometry::{Point, Rect};
