//! Decoding of configured images into drawable surfaces.

use crate::error::RenderError;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use ogcard_traits::ResourceProvider;
use ogcard_types::LOGO_SIZE;
use tiny_skia::Pixmap;

/// Loads and decodes the background image at its natural size.
pub fn load_background(resources: &dyn ResourceProvider, path: &str) -> Result<Pixmap, RenderError> {
    let rgba = load_rgba(resources, path)?;
    rgba_to_pixmap(&rgba).ok_or_else(|| RenderError::asset(path, "image has no pixels"))
}

/// Loads the logo and scales it to a `LOGO_SIZE` square.
pub fn load_logo(resources: &dyn ResourceProvider, path: &str) -> Result<Pixmap, RenderError> {
    let rgba = load_rgba(resources, path)?;
    let resized = imageops::resize(&rgba, LOGO_SIZE, LOGO_SIZE, FilterType::Triangle);
    rgba_to_pixmap(&resized).ok_or_else(|| RenderError::asset(path, "image has no pixels"))
}

fn load_rgba(resources: &dyn ResourceProvider, path: &str) -> Result<RgbaImage, RenderError> {
    let bytes = resources
        .load(path)
        .map_err(|e| RenderError::asset(path, e))?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| RenderError::asset(path, e))?;
    log::debug!(
        "Decoded '{}' ({}x{})",
        path,
        decoded.width(),
        decoded.height()
    );
    Ok(decoded.to_rgba8())
}

/// Copies straight RGBA into a premultiplied pixmap.
pub fn rgba_to_pixmap(rgba: &RgbaImage) -> Option<Pixmap> {
    let (width, height) = rgba.dimensions();
    let mut pixmap = Pixmap::new(width, height)?;
    for (src, dst) in rgba
        .as_raw()
        .chunks_exact(4)
        .zip(pixmap.data_mut().chunks_exact_mut(4))
    {
        let a = src[3];
        dst[0] = premul_u8(src[0], a);
        dst[1] = premul_u8(src[1], a);
        dst[2] = premul_u8(src[2], a);
        dst[3] = a;
    }
    Some(pixmap)
}

fn premul_u8(channel: u8, alpha: u8) -> u8 {
    let prod = (channel as u16) * (alpha as u16) + 127;
    ((prod + (prod >> 8)) >> 8) as u8
}
