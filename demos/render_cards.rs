//! Renders OpenGraph cards for a list of posts.
//!
//! ```bash
//! cargo run --example render_cards -- \
//!     --config opengraph.json --posts posts.json \
//!     --base-dir site/source --out public --site-title "My Blog"
//! ```
//!
//! `posts.json` is an array of `{ "title", "date", "draft", "path" }` objects.

use clap::Parser;
use ogcard::{CardConfig, Document, GeneratorOptions, PipelineBuilder, PipelineError};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Card configuration (JSON). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Posts to render (JSON array).
    #[arg(long)]
    posts: PathBuf,

    /// Directory asset paths in the configuration are relative to.
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Directory the cards are written into.
    #[arg(long, default_value = "public")]
    out: PathBuf,

    #[arg(long, default_value = "")]
    site_title: String,

    /// Cards rendered at once.
    #[arg(long, default_value_t = ogcard::DEFAULT_CONCURRENCY)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "ogcard=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CardConfig::from_json(&fs::read_to_string(path)?)?,
        None => CardConfig::default(),
    };
    let posts: Vec<Document> = serde_json::from_str(&fs::read_to_string(&args.posts)?)?;
    println!("✓ Loaded {} posts.", posts.len());

    let options = GeneratorOptions::new(&args.base_dir)
        .with_site_title(args.site_title)
        .with_concurrency(args.concurrency);
    let pipeline = PipelineBuilder::new(config).with_options(options).build()?;

    let report = pipeline.generate_async(posts).await?;
    for card in &report.generated {
        let target = args.out.join(&card.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &card.data)?;
    }

    println!(
        "\nDone: {} cards written to {}, {} failed.",
        report.generated.len(),
        args.out.display(),
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!("  ✗ {}", failure);
    }
    Ok(())
}
