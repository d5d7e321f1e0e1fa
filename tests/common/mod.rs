pub mod card_assertions;
pub mod fixtures;

use ogcard::{CardConfig, CardPipeline, FontLibrary, InMemoryResourceProvider, PipelineBuilder};
use ogcard_style::FontSpec;
use std::sync::{Arc, OnceLock};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A library over the installed system fonts, or `None` when the machine has
/// no sans-serif face. Tests that draw text skip in that case.
pub fn system_fonts() -> Option<FontLibrary> {
    init_logger();
    static LIBRARY: OnceLock<Option<FontLibrary>> = OnceLock::new();
    let library = LIBRARY.get_or_init(|| {
        let fonts = FontLibrary::with_system_fonts();
        fonts
            .resolve(&FontSpec::new("sans-serif", 16.0))
            .is_ok()
            .then_some(fonts)
    });
    if library.is_none() {
        eprintln!("skipping: no system sans-serif font found");
    }
    library.clone()
}

/// A pipeline over in-memory assets. `None` when no system font is available.
pub fn pipeline_with(
    config: CardConfig,
    resources: InMemoryResourceProvider,
    concurrency: usize,
) -> Option<CardPipeline> {
    let fonts = system_fonts()?;
    let pipeline = PipelineBuilder::new(config)
        .with_resources(Arc::new(resources))
        .with_fonts(fonts)
        .with_site_title("Example Blog")
        .with_concurrency(concurrency)
        .build()
        .expect("pipeline should build");
    Some(pipeline)
}
