//! Batch generation of cards for a site's posts.
//!
//! - [`PipelineBuilder`]: assembles fonts, resources and the executor
//! - [`CardPipeline`]: renders a batch of documents, sync or async
//! - [`BatchReport`]: generated cards plus per-document failures

use crate::config::{CardConfig, DEFAULT_CONCURRENCY, GeneratorOptions};
use crate::error::{CardFailure, PipelineError};
use ogcard_executor::{Executor, ExecutorImpl};
use ogcard_layout::FontLibrary;
use ogcard_render::{Compositor, ImageCache};
use ogcard_resource::SiteResourceProvider;
use ogcard_style::StyleConfig;
use ogcard_traits::ResourceProvider;
use ogcard_types::{Document, RenderRequest, RenderedCard};
use std::sync::Arc;

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Cards in rendering order, newest document first.
    pub generated: Vec<RenderedCard>,
    pub failures: Vec<CardFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.generated.iter().map(|card| card.path.as_str())
    }
}

/// A builder for creating a `CardPipeline`.
pub struct PipelineBuilder {
    config: CardConfig,
    site_title: String,
    concurrency: usize,
    resources: Option<Arc<dyn ResourceProvider>>,
    fonts: Option<FontLibrary>,
}

impl PipelineBuilder {
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            site_title: String::new(),
            concurrency: DEFAULT_CONCURRENCY,
            resources: None,
            fonts: None,
        }
    }

    /// Reads assets from `options.base_dir` and takes the site title and
    /// concurrency from `options`.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.resources = Some(Arc::new(SiteResourceProvider::new(&options.base_dir)));
        self.site_title = options.site_title;
        self.concurrency = options.concurrency;
        self
    }

    /// Replaces the asset source, e.g. with an in-memory provider.
    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Uses `fonts` instead of a library over the system fonts.
    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn with_site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn build(self) -> Result<CardPipeline, PipelineError> {
        let resources = self.resources.ok_or_else(|| {
            PipelineError::Config(
                "No asset source configured. Use `with_options` or `with_resources`.".to_string(),
            )
        })?;
        let style = self.config.resolve(&self.site_title)?;
        let fonts = self.fonts.unwrap_or_else(FontLibrary::with_system_fonts);
        let executor = ExecutorImpl::with_width(self.concurrency);
        log::debug!(
            "Card pipeline ready: {} executor, {} in flight, assets from {}",
            executor.name(),
            executor.parallelism(),
            resources.name()
        );

        Ok(CardPipeline {
            enabled: self.config.enable,
            style: Arc::new(style),
            compositor: Arc::new(Compositor::new(fonts, resources, Arc::new(ImageCache::new()))),
            executor,
        })
    }
}

/// Renders cards for a batch of documents.
///
/// The image cache lives as long as the pipeline, so one pipeline should be
/// built per site generation run.
#[derive(Debug, Clone)]
pub struct CardPipeline {
    enabled: bool,
    style: Arc<StyleConfig>,
    compositor: Arc<Compositor>,
    executor: ExecutorImpl,
}

impl CardPipeline {
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Renders a card for every non-draft document, newest first.
    ///
    /// A failing document is logged and reported; the others still render.
    pub fn generate(&self, documents: Vec<Document>) -> BatchReport {
        if !self.enabled {
            log::debug!("OpenGraph image generation disabled, skipping {} documents", documents.len());
            return BatchReport::default();
        }

        let requests = select_requests(documents);
        let compositor = self.compositor.clone();
        let style = self.style.clone();
        let results = self.executor.execute_all_fallible(requests, move |request| {
            compositor
                .render(&request, &style)
                .map_err(|error| CardFailure {
                    path: request.output_path.clone(),
                    error,
                })
        });

        let mut report = BatchReport::default();
        for result in results {
            match result {
                Ok(card) => {
                    log::info!("Generated OpenGraph image: {}", card.path);
                    report.generated.push(card);
                }
                Err(failure) => {
                    log::warn!("Failed to generate OpenGraph image {}", failure);
                    report.failures.push(failure);
                }
            }
        }
        report
    }

    /// Runs [`generate`](Self::generate) on tokio's blocking pool.
    pub async fn generate_async(&self, documents: Vec<Document>) -> Result<BatchReport, PipelineError> {
        let pipeline = self.clone();
        let report = tokio::task::spawn_blocking(move || pipeline.generate(documents)).await?;
        Ok(report)
    }
}

/// Drops drafts and orders the rest newest first.
fn select_requests(documents: Vec<Document>) -> Vec<RenderRequest> {
    let mut posts: Vec<Document> = documents.into_iter().filter(|d| !d.draft).collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts.iter().map(Document::to_request).collect()
}
