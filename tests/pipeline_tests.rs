mod common;

use common::card_assertions::decode;
use common::fixtures::{document, january_posts, png_bytes};
use common::{TestResult, pipeline_with, system_fonts};
use ogcard::{CardConfig, GeneratorOptions, InMemoryResourceProvider, PipelineBuilder};
use ogcard_render::{BACKGROUND_KEY, LOGO_KEY};
use std::collections::HashSet;
use std::fs;

#[test]
fn test_filesystem_assets_relative_to_base_dir() -> TestResult {
    let Some(fonts) = system_fonts() else {
        return Ok(());
    };
    let site = tempfile::tempdir()?;
    fs::create_dir_all(site.path().join("images"))?;
    fs::write(site.path().join("images/logo.png"), png_bytes(64, 64, [0, 0, 0, 255]))?;
    fs::write(site.path().join("images/bg.png"), png_bytes(1200, 628, [240, 240, 240, 255]))?;

    let config = CardConfig::from_json(
        r#"{ "blog_logo": "images/logo.png", "main_image": "images/bg.png" }"#,
    )?;
    let pipeline = PipelineBuilder::new(config)
        .with_options(GeneratorOptions::new(site.path()).with_concurrency(3))
        .with_fonts(fonts)
        .build()?;

    let report = pipeline.generate(january_posts(6));
    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert_eq!(report.generated.len(), 6);
    for card in &report.generated {
        decode(card);
    }

    let cache = pipeline.compositor().cache();
    assert!(cache.get(LOGO_KEY).is_some());
    assert!(cache.get(BACKGROUND_KEY).is_some());
    assert_eq!(cache.len(), 2);
    Ok(())
}

#[test]
fn test_output_is_newest_first_at_any_width() {
    for width in [1, 4, 10] {
        let Some(pipeline) =
            pipeline_with(CardConfig::default(), InMemoryResourceProvider::new(), width)
        else {
            return;
        };
        let report = pipeline.generate(january_posts(12));
        assert_eq!(report.generated.len(), 12);

        let expected: Vec<String> = (1..=12u32)
            .rev()
            .map(|day| format!("2024/01/{:02}/post-{}/thumbnail.png", day, day))
            .collect();
        let actual: Vec<&str> = report.paths().collect();
        assert_eq!(actual, expected, "width {}", width);
    }
}

#[test]
fn test_missing_background_fails_every_card_but_reports_each() {
    let config = CardConfig {
        main_image: Some("images/missing.png".into()),
        ..CardConfig::default()
    };
    let Some(pipeline) = pipeline_with(config, InMemoryResourceProvider::new(), 4) else {
        return;
    };
    let report = pipeline.generate(january_posts(5));

    assert!(report.generated.is_empty());
    assert_eq!(report.failures.len(), 5);
    for failure in &report.failures {
        assert_eq!(failure.error.path(), Some("images/missing.png"));
        assert!(failure.to_string().contains("images/missing.png"));
    }
    let paths: HashSet<_> = report.failures.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths.len(), 5);
}

#[test]
fn test_empty_title_still_produces_a_card() {
    let Some(pipeline) = pipeline_with(CardConfig::default(), InMemoryResourceProvider::new(), 1)
    else {
        return;
    };
    let report = pipeline.generate(vec![document("", "2024-05-05", "untitled/")]);
    assert!(report.is_success());
    decode(&report.generated[0]);
}

#[test]
fn test_font_file_registered_under_family() -> TestResult {
    let Some(fonts) = system_fonts() else {
        return Ok(());
    };
    let face = fonts.resolve(&ogcard_style::FontSpec::new("sans-serif", 16.0))?;
    let site = tempfile::tempdir()?;
    fs::create_dir_all(site.path().join("fonts"))?;
    fs::write(site.path().join("fonts/brand.ttf"), face.data.data.as_slice())?;

    let config = CardConfig {
        title_font: "Bold 60px BrandFace".into(),
        title_font_file: Some("fonts/brand.ttf".into()),
        title_font_file_family: Some("BrandFace".into()),
        ..CardConfig::default()
    };
    let pipeline = PipelineBuilder::new(config)
        .with_options(GeneratorOptions::new(site.path()).with_concurrency(4))
        .with_fonts(fonts.clone())
        .build()?;

    let report = pipeline.generate(january_posts(8));
    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert!(
        pipeline
            .compositor()
            .fonts()
            .registered_families()
            .contains(&"BrandFace".to_string())
    );
    Ok(())
}

#[test]
fn test_missing_font_file_names_the_file() -> TestResult {
    let Some(fonts) = system_fonts() else {
        return Ok(());
    };
    let site = tempfile::tempdir()?;
    let config = CardConfig {
        date_font_file: Some("fonts/nope.ttf".into()),
        date_font_file_family: Some("Nope".into()),
        ..CardConfig::default()
    };
    let pipeline = PipelineBuilder::new(config)
        .with_options(GeneratorOptions::new(site.path()))
        .with_fonts(fonts)
        .build()?;

    let report = pipeline.generate(vec![document("Post", "2024-01-01", "post/")]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, "post/thumbnail.png");
    assert_eq!(report.failures[0].error.path(), Some("fonts/nope.ttf"));
    Ok(())
}

#[tokio::test]
async fn test_generate_async_matches_sync() -> TestResult {
    let Some(pipeline) = pipeline_with(CardConfig::default(), InMemoryResourceProvider::new(), 2)
    else {
        return Ok(());
    };
    let report = pipeline.generate_async(january_posts(3)).await?;
    assert!(report.is_success());
    let paths: Vec<_> = report.paths().collect();
    assert_eq!(
        paths,
        vec![
            "2024/01/03/post-3/thumbnail.png",
            "2024/01/02/post-2/thumbnail.png",
            "2024/01/01/post-1/thumbnail.png",
        ]
    );
    Ok(())
}
