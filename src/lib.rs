//! OpenGraph card generation for static sites.
//!
//! A [`CardPipeline`] takes the site's documents and renders one 1200×628 PNG
//! per published post: background, branding bar, optional logo and site
//! title, then the post's date and wrapped title.
//!
//! ```ignore
//! use ogcard::{CardConfig, GeneratorOptions, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::new(CardConfig::from_json(&config_json)?)
//!     .with_options(GeneratorOptions::new("site/source").with_site_title("My Blog"))
//!     .build()?;
//!
//! let report = pipeline.generate(documents);
//! for card in &report.generated {
//!     std::fs::write(out_dir.join(&card.path), &card.data)?;
//! }
//! ```

pub mod config;
pub mod error;
pub mod meta;
pub mod pipeline;

pub use config::{CardConfig, DEFAULT_CONCURRENCY, GeneratorOptions};
pub use error::{CardFailure, PipelineError};
pub use meta::{PageInfo, og_image_tag};
pub use pipeline::{BatchReport, CardPipeline, PipelineBuilder};

pub use ogcard_layout::FontLibrary;
pub use ogcard_render::{Compositor, ImageCache, RenderError};
pub use ogcard_style::StyleConfig;
pub use ogcard_traits::{InMemoryResourceProvider, ResourceProvider};
pub use ogcard_types::{Document, RenderRequest, RenderedCard, parse_timestamp};
