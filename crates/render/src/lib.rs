//! Composition of social cards.
//!
//! - [`Compositor`] lays out and paints one card per request
//! - [`ImageCache`] shares decoded background and logo images across a run
//! - [`assets`] decodes configured images into drawable surfaces

pub mod assets;
mod compositor;
mod error;
mod image_cache;

pub use compositor::{CardLayout, Compositor, PlacedText};
pub use error::RenderError;
pub use image_cache::{BACKGROUND_KEY, ImageCache, LOGO_KEY};
