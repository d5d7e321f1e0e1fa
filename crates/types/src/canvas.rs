//! Fixed card geometry.
//!
//! Every card in a run is composed on the same 1200×628 surface. Text heights
//! are measured against a scratch surface of exactly this size, so these values
//! are constants rather than configuration.

use crate::geometry::Rect;

/// Card width in pixels.
pub const CANVAS_WIDTH: u32 = 1200;

/// Card height in pixels.
pub const CANVAS_HEIGHT: u32 = 628;

/// First row of the branding bar. The bar runs to the bottom edge.
pub const BAR_TOP: u32 = 600;

/// Left inset and text padding.
pub const MARGIN: u32 = 50;

/// Logos are resized to a square of this edge length.
pub const LOGO_SIZE: u32 = 100;

/// Height of the branding bar.
pub const fn bar_height() -> u32 {
    CANVAS_HEIGHT - BAR_TOP
}

/// The branding bar: full width, from `BAR_TOP` to the bottom edge.
pub fn bar_rect() -> Rect {
    Rect::new(0.0, BAR_TOP as f32, CANVAS_WIDTH as f32, bar_height() as f32)
}

/// Alphabetic baseline of the date line: directly above the bar, raised by
/// the measured date height.
pub fn date_baseline(date_height: f32) -> f32 {
    (CANVAS_HEIGHT - bar_height()) as f32 - date_height
}
