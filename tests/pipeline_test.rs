//! End-to-end tests of the render pipeline without the HTTP layer.

mod common;

use std::io::Write;
use std::sync::Arc;

use bookmap::models::{AppConfig, Document};
use bookmap::rendering::FontLibrary;
use bookmap::services::{RenderOptions, RenderPipeline};
use common::fixtures;
use map_dither::Palette;
use pretty_assertions::assert_eq;

fn pipeline(config: AppConfig) -> RenderPipeline {
    RenderPipeline::with_fonts(config, FontLibrary::from_database(fontdb::Database::new()))
}

fn seeded(seed: u64) -> RenderOptions {
    RenderOptions {
        seed: Some(seed),
        tiles: false,
    }
}

#[test]
fn test_later_fill_wins() {
    let out = pipeline(AppConfig::default())
        .render(&Document::from_text(fixtures::books::LAYERED), seeded(1))
        .unwrap();
    let white = Palette::map().find_nearest(fixtures::opaque(255, 255, 255));
    assert!(out.raster.indices().iter().all(|&i| i == white));
}

#[test]
fn test_book_content_layer_is_moved() {
    let doc = Document::from_text(
        "b2m\nwidth:1\nheight:1\neffect:book-content\neffect:background,blue",
    );
    let out = pipeline(AppConfig::default()).render(&doc, seeded(1)).unwrap();
    assert_eq!(
        out.procedure,
        vec![" -> book-content, ", " -> background, blue"]
    );
}

#[test]
fn test_default_effects_when_none_given() {
    let doc = Document::from_text("b2m\nwidth:1\nheight:1");
    let out = pipeline(AppConfig::default()).render(&doc, seeded(1)).unwrap();
    assert_eq!(
        out.procedure,
        vec![
            " -> background-random, brown",
            " -> frame, black",
            " -> book-content, "
        ]
    );
}

#[test]
fn test_seed_makes_noise_reproducible() {
    let doc = Document::from_text("b2m\nwidth:1\nheight:1\neffect:background-random,green");
    let pipeline = pipeline(AppConfig::default());
    let a = pipeline.render(&doc, seeded(42)).unwrap();
    let b = pipeline.render(&doc, seeded(42)).unwrap();
    assert_eq!(a.raster, b.raster);
}

#[test]
fn test_json_pages_are_normalized() {
    // The settings block arrives as the root text of a JSON component
    let page = r#"{"text": "book2map\nwidth:1\nheight:1\neffect:background,white"}"#;
    let out = pipeline(AppConfig::default())
        .render(&Document::new(vec![page.to_string()]), seeded(1))
        .unwrap();
    assert_eq!(out.summary[0], "Using custom settings from book!");
    assert_eq!(out.procedure[0], " -> background, white");
}

#[test]
fn test_summary_lines() {
    let doc = Document::from_text("b2m\nwidth:3\nheight:1\nsize:12\ndither:true\naa:off");
    let out = pipeline(AppConfig::default()).render(&doc, seeded(1)).unwrap();
    assert!(out.summary.contains(&"Font size: 12".to_string()));
    assert!(out.summary.contains(&"Width in maps: 3".to_string()));
    assert!(out.summary.contains(&"Height in maps: 1".to_string()));
    assert!(out.summary.contains(&"Use dithering: true".to_string()));
    assert!(out.summary.contains(&"Anti-aliasing: false".to_string()));
}

#[test]
fn test_no_settings_block_uses_config_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "max_tiles: 4\ndefaults:\n  width: 1\n  height: 1\n  size: 14"
    )
    .unwrap();
    let config = AppConfig::load_from_path(file.path());
    assert_eq!(config.max_tiles, 4);

    let pipeline = pipeline(config);
    let settings = pipeline.default_settings(&pipeline.fonts()).unwrap();
    assert_eq!((settings.width, settings.height, settings.size), (128, 128, 14));
}

#[test]
fn test_tiles_match_raster() {
    let doc = Document::from_text(fixtures::books::RED_BANNER);
    let out = pipeline(AppConfig::default())
        .render(
            &doc,
            RenderOptions {
                seed: None,
                tiles: true,
            },
        )
        .unwrap();
    let set = out.tile_set();
    assert_eq!((set.columns(), set.rows()), (2, 1));
    assert_eq!(out.tiles.len(), set.len());
}

#[tokio::test]
async fn test_concurrent_renders() {
    let pipeline = Arc::new(pipeline(AppConfig::default()));
    let doc = Document::from_text(fixtures::books::RED_BANNER);

    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let pipeline = pipeline.clone();
            let doc = doc.clone();
            tokio::spawn(async move { pipeline.render_async(doc, seeded(seed)).await })
        })
        .collect();

    for handle in handles {
        let out = handle.await.unwrap().unwrap();
        assert_eq!(out.raster.width(), 256);
    }
}
