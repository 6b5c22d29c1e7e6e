use std::sync::{Arc, RwLock};

use map_dither::{IndexedRaster, Rgb};

use crate::error::RenderError;
use crate::models::{AppConfig, Document, RenderSettings};
use crate::rendering::effects::EffectContext;
use crate::rendering::{colors, composite, png_out, FontLibrary, PaintPlan, TextLayout};
use crate::rendering::{TextureStore, TileSet};
use crate::services::rich_text;
use crate::services::settings_parser::{SettingsError, SettingsParser};

/// Summary line added when a book carries its own settings.
pub const CUSTOM_SETTINGS_NOTICE: &str = "Using custom settings from book!";

/// Per-request render options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Seed for noise effects; unset draws from entropy.
    pub seed: Option<u64>,
    /// Encode every map tile as a PNG.
    pub tiles: bool,
}

/// One map tile encoded as an indexed PNG.
#[derive(Debug, Clone)]
pub struct EncodedTile {
    pub x: u32,
    pub y: u32,
    pub columns: u32,
    pub rows: u32,
    pub png: Vec<u8>,
}

/// Everything a finished render reports back.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub settings: RenderSettings,
    /// Settings summary, one line per setting.
    pub summary: Vec<String>,
    /// Effects in paint order as ` -> id, args`.
    pub procedure: Vec<String>,
    /// Recoverable problems reported while parsing and painting.
    pub diagnostics: Vec<String>,
    pub raster: IndexedRaster,
    /// Filled when [`RenderOptions::tiles`] is set.
    pub tiles: Vec<EncodedTile>,
}

impl RenderOutput {
    pub fn tile_set(&self) -> TileSet {
        TileSet::from_raster(&self.raster)
    }

    /// Whole raster as one indexed PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        png_out::encode_raster(&self.raster)
    }

    pub fn encode_tiles(&self) -> Result<Vec<EncodedTile>, RenderError> {
        self.tile_set()
            .tiles()
            .iter()
            .map(|tile| {
                Ok(EncodedTile {
                    x: tile.x,
                    y: tile.y,
                    columns: tile.columns,
                    rows: tile.rows,
                    png: png_out::encode_tile(tile)?,
                })
            })
            .collect()
    }
}

/// Book in, quantized map raster out.
///
/// normalize pages -> parse settings -> resolve paint plan -> composite ->
/// quantize. The font library can be swapped at runtime; each render works
/// on the library that was current when it started.
pub struct RenderPipeline {
    config: AppConfig,
    fonts: RwLock<Arc<FontLibrary>>,
    textures: TextureStore,
}

impl RenderPipeline {
    /// Build a pipeline, loading fonts as configured.
    pub fn new(config: AppConfig) -> Self {
        let fonts = load_fonts(&config);
        Self::with_fonts(config, fonts)
    }

    pub fn with_fonts(config: AppConfig, fonts: FontLibrary) -> Self {
        let textures = TextureStore::new(&config.textures_dir);
        Self {
            config,
            fonts: RwLock::new(Arc::new(fonts)),
            textures,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    /// The current font library.
    pub fn fonts(&self) -> Arc<FontLibrary> {
        match self.fonts.read() {
            Ok(fonts) => fonts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Rescan the font sources and swap in the new library. Returns the
    /// number of faces found.
    pub fn reload_fonts(&self) -> usize {
        let library = Arc::new(load_fonts(&self.config));
        let faces = library.face_count();
        match self.fonts.write() {
            Ok(mut fonts) => *fonts = library,
            Err(poisoned) => *poisoned.into_inner() = library,
        }
        tracing::info!(faces, "Reloaded fonts");
        faces
    }

    /// Settings a book starts from before its own directives apply.
    pub fn default_settings(&self, fonts: &FontLibrary) -> Result<RenderSettings, RenderError> {
        let d = &self.config.defaults;
        let max = self.config.max_tiles.max(1);
        let font = d
            .font
            .clone()
            .or_else(|| fonts.default_family().map(str::to_string))
            .unwrap_or_default();
        let color = colors::resolve(&d.color, Rgb::WHITE).map_err(SettingsError::from)?;

        Ok(RenderSettings {
            width: d.width.clamp(1, max) * crate::rendering::TILE_SIZE,
            height: d.height.clamp(1, max) * crate::rendering::TILE_SIZE,
            font,
            size: d.size.max(1),
            left: d.left,
            top: d.top,
            dither: d.dither,
            anti_alias: d.antialias,
            color,
        })
    }

    /// Run the whole pipeline on the calling thread.
    pub fn render(
        &self,
        document: &Document,
        options: RenderOptions,
    ) -> Result<RenderOutput, RenderError> {
        if document.is_blank() {
            return Err(RenderError::EmptyDocument);
        }

        let document = rich_text::normalize(document);
        let fonts = self.fonts();
        let parser = SettingsParser::new(self.default_settings(&fonts)?, self.config.max_tiles);
        let book = parser.parse(&document)?;
        let settings = book.settings;

        let text = TextLayout::new(book.body, &settings, fonts);
        let plan = PaintPlan::resolve(&book.effects, &text);
        let procedure: Vec<String> = plan.steps().iter().map(|s| s.procedure_line()).collect();

        let ctx = EffectContext {
            textures: &self.textures,
            anti_alias: settings.anti_alias,
            seed: options.seed,
        };
        let composition = composite(settings.width, settings.height, &plan, &ctx)?;

        let pixels = composition.canvas.to_argb();
        let raster = map_dither::quantize(
            &pixels,
            settings.width as usize,
            settings.height as usize,
            settings.dither,
        )?;

        let mut summary = Vec::new();
        if book.custom {
            summary.push(CUSTOM_SETTINGS_NOTICE.to_string());
        }
        summary.extend(settings.summary());

        let mut diagnostics = book.warnings;
        diagnostics.extend(composition.diagnostics);

        tracing::info!(
            width = settings.width,
            height = settings.height,
            effects = procedure.len(),
            diagnostics = diagnostics.len(),
            dither = settings.dither,
            "Rendered book"
        );

        let mut output = RenderOutput {
            settings,
            summary,
            procedure,
            diagnostics,
            raster,
            tiles: Vec::new(),
        };
        if options.tiles {
            output.tiles = output.encode_tiles()?;
        }
        Ok(output)
    }

    /// Render on the blocking thread pool.
    ///
    /// Composition, text layout and dithering are CPU bound, so the whole
    /// pipeline runs as one unit via spawn_blocking.
    pub async fn render_async(
        self: &Arc<Self>,
        document: Document,
        options: RenderOptions,
    ) -> Result<RenderOutput, RenderError> {
        let pipeline = self.clone();
        tokio::task::spawn_blocking(move || pipeline.render(&document, options))
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))?
    }
}

fn load_fonts(config: &AppConfig) -> FontLibrary {
    FontLibrary::load(Some(&config.fonts_dir), config.load_system_fonts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DefaultSettings;

    fn no_fonts() -> FontLibrary {
        FontLibrary::from_database(fontdb::Database::new())
    }

    fn pipeline() -> RenderPipeline {
        RenderPipeline::with_fonts(AppConfig::default(), no_fonts())
    }

    fn options() -> RenderOptions {
        RenderOptions {
            seed: Some(3),
            tiles: false,
        }
    }

    #[test]
    fn test_empty_document_rejected() {
        let err = pipeline()
            .render(&Document::default(), options())
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyDocument));

        let err = pipeline()
            .render(&Document::new(vec!["  ".into(), "\n".into()]), options())
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyDocument));
    }

    #[test]
    fn test_settings_only_book_renders_without_fonts() {
        let doc = Document::from_text("book2map\nwidth:1\nheight:1\neffect:background,white");
        let out = pipeline().render(&doc, options()).unwrap();

        assert_eq!((out.raster.width(), out.raster.height()), (128, 128));
        assert!(out.raster.indices().iter().all(|&i| i == 34));
        assert_eq!(out.summary[0], CUSTOM_SETTINGS_NOTICE);
        assert_eq!(
            out.procedure,
            vec![" -> background, white", " -> book-content, "]
        );
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_fonts_abort_text() {
        let doc = Document::from_text("Hello");
        let err = pipeline().render(&doc, options()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Composition { ref effect, .. } if effect == "book-content"
        ));
    }

    #[test]
    fn test_defaults_from_config() {
        let config = AppConfig {
            max_tiles: 3,
            defaults: DefaultSettings {
                width: 5,
                height: 1,
                font: Some("Custom".to_string()),
                color: "#102030".to_string(),
                ..DefaultSettings::default()
            },
            ..AppConfig::default()
        };
        let pipeline = RenderPipeline::with_fonts(config, no_fonts());
        let settings = pipeline.default_settings(&pipeline.fonts()).unwrap();
        assert_eq!(settings.width, 384);
        assert_eq!(settings.height, 128);
        assert_eq!(settings.font, "Custom");
        assert_eq!(settings.color, Rgb::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_bad_default_color_is_settings_error() {
        let config = AppConfig {
            defaults: DefaultSettings {
                color: "#zz".to_string(),
                ..DefaultSettings::default()
            },
            ..AppConfig::default()
        };
        let pipeline = RenderPipeline::with_fonts(config, no_fonts());
        let err = pipeline
            .render(&Document::from_text("book2map"), options())
            .unwrap_err();
        assert!(matches!(err, RenderError::Settings(_)));
    }

    #[test]
    fn test_tiles_encoded_on_request() {
        let doc = Document::from_text("b2m\nwidth:2\nheight:1\neffect:background,red");
        let out = pipeline()
            .render(
                &doc,
                RenderOptions {
                    seed: None,
                    tiles: true,
                },
            )
            .unwrap();
        assert_eq!(out.tiles.len(), 2);
        assert_eq!((out.tiles[1].x, out.tiles[1].y), (1, 0));
        assert!(out.tiles.iter().all(|t| t.columns == 2 && t.rows == 1));
        assert!(out.tiles.iter().all(|t| &t.png[1..4] == b"PNG"));
    }

    #[test]
    fn test_diagnostics_include_settings_warnings() {
        let doc = Document::from_text("b2m\nwidth:1\nheight:1\neffect:,x\neffect:glitter");
        let out = pipeline().render(&doc, options()).unwrap();
        assert_eq!(
            out.diagnostics,
            vec![
                "Invalid effect settings: ,x",
                "Unknown effect was specified! Please check your spelling.",
            ]
        );
    }

    #[tokio::test]
    async fn test_render_async() {
        let pipeline = Arc::new(pipeline());
        let doc = Document::from_text("book2map\nwidth:1\nheight:1\neffect:background,black");
        let out = pipeline.render_async(doc, options()).await.unwrap();
        assert_eq!(out.raster.width(), 128);
        assert!(out.raster.indices().iter().all(|&i| i == out.raster.indices()[0]));
    }

    #[test]
    fn test_reload_fonts_swaps_library() {
        let config = AppConfig {
            load_system_fonts: false,
            fonts_dir: "/definitely/not/here".into(),
            ..AppConfig::default()
        };
        let pipeline = RenderPipeline::with_fonts(config, no_fonts());
        let before = pipeline.fonts();
        assert_eq!(pipeline.reload_fonts(), 0);
        assert!(!Arc::ptr_eq(&before, &pipeline.fonts()));
    }
}
