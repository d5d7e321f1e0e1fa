use crate::fonts::ResolvedFont;
use ogcard_traits::SharedFontData;

/// A sans-serif system face at `size_px`, or `None` when the machine has no
/// usable fonts installed.
#[cfg(feature = "system-fonts")]
pub fn system_font(size_px: f32) -> Option<ResolvedFont> {
    use std::sync::OnceLock;

    let _ = env_logger::builder().is_test(true).try_init();
    static LIBRARY: OnceLock<crate::fonts::FontLibrary> = OnceLock::new();
    let library = LIBRARY.get_or_init(crate::fonts::FontLibrary::with_system_fonts);
    library
        .resolve(&ogcard_style::FontSpec::new("sans-serif", size_px))
        .ok()
}

#[cfg(not(feature = "system-fonts"))]
pub fn system_font(_size_px: f32) -> Option<ResolvedFont> {
    None
}

/// Raw bytes of the face `system_font` picks.
pub fn system_font_bytes() -> Option<SharedFontData> {
    system_font(16.0).map(|f| f.data.data.clone())
}
