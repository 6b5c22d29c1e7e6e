//! Font discovery and glyph drawing.
//!
//! Fonts come from an optional fonts directory plus, if enabled, the
//! system font set. Glyph outlines are read with `ttf-parser` and filled
//! onto the canvas as `tiny-skia` paths.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use map_dither::Rgb;
use thiserror::Error;
use tiny_skia::PathBuilder;

use super::Canvas;

/// Family name preferred as the default when installed.
pub const PREFERRED_FAMILY: &str = "Minecraft";

/// Horizontal shear applied to synthesized italics.
const OBLIQUE_SKEW: f32 = 0.2;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("No fonts are installed")]
    NoFonts,

    #[error("Font family not found: {0}")]
    FamilyNotFound(String),

    #[error("Failed to read font data for {0}")]
    Unreadable(String),

    #[error("Failed to parse font {family}: {reason}")]
    Parse { family: String, reason: String },
}

/// Bold/italic combination requested by the text layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
}

impl FontStyle {
    pub const PLAIN: FontStyle = FontStyle {
        bold: false,
        italic: false,
    };
    pub const BOLD: FontStyle = FontStyle {
        bold: true,
        italic: false,
    };
}

/// Every font face available for rendering.
pub struct FontLibrary {
    db: fontdb::Database,
    families: Vec<String>,
    data_cache: Mutex<HashMap<fontdb::ID, Arc<Vec<u8>>>>,
}

impl FontLibrary {
    /// Load fonts from `fonts_dir` (if it exists) and optionally the system.
    pub fn load(fonts_dir: Option<&Path>, system_fonts: bool) -> Self {
        let mut db = fontdb::Database::new();

        if let Some(dir) = fonts_dir {
            if dir.is_dir() {
                db.load_fonts_dir(dir);
                tracing::debug!(dir = %dir.display(), faces = db.len(), "Loaded fonts directory");
            } else {
                tracing::debug!(dir = %dir.display(), "Fonts directory not found");
            }
        }
        if system_fonts {
            db.load_system_fonts();
        }

        let library = Self::from_database(db);
        tracing::info!(
            faces = library.db.len(),
            families = library.families.len(),
            default = ?library.default_family(),
            "Font library ready"
        );
        library
    }

    pub fn from_database(db: fontdb::Database) -> Self {
        let mut families: Vec<String> = db
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .filter(|name| !name.contains("Bold") && !name.contains("Italic"))
            .collect();
        families.sort();
        families.dedup();

        Self {
            db,
            families,
            data_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Listed family names, sorted. Families whose name marks them as a
    /// bold or italic variant are left out.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// `Minecraft` when installed, otherwise the first listed family.
    pub fn default_family(&self) -> Option<&str> {
        self.families
            .iter()
            .find(|f| f.as_str() == PREFERRED_FAMILY)
            .or_else(|| self.families.first())
            .map(String::as_str)
    }

    /// Canonical name of the installed family matching `requested`
    /// (case-insensitive), falling back to the default family.
    pub fn resolve_family(&self, requested: &str) -> Option<String> {
        self.db
            .faces()
            .flat_map(|face| face.families.iter())
            .find(|(name, _)| name.eq_ignore_ascii_case(requested))
            .map(|(name, _)| name.clone())
            .or_else(|| self.default_family().map(str::to_string))
    }

    /// Face for `family` in the closest available style. Styles the family
    /// does not provide are synthesized.
    pub fn face(&self, family: &str, style: FontStyle) -> Result<LoadedFace, FontError> {
        if self.is_empty() {
            return Err(FontError::NoFonts);
        }

        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            weight: if style.bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if style.italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };
        let id = self
            .db
            .query(&query)
            .ok_or_else(|| FontError::FamilyNotFound(family.to_string()))?;
        let info = self
            .db
            .face(id)
            .ok_or_else(|| FontError::FamilyNotFound(family.to_string()))?;

        let embolden = style.bold && info.weight.0 < 600;
        let oblique = style.italic && info.style == fontdb::Style::Normal;
        let index = info.index;
        let data = self.face_data(id, family)?;

        let face = LoadedFace {
            family: family.to_string(),
            data,
            index,
            embolden,
            oblique,
        };
        // fail early on faces ttf-parser cannot read
        face.parse()?;
        Ok(face)
    }

    fn face_data(&self, id: fontdb::ID, family: &str) -> Result<Arc<Vec<u8>>, FontError> {
        let mut cache = self
            .data_cache
            .lock()
            .map_err(|_| FontError::Unreadable(family.to_string()))?;
        if let Some(data) = cache.get(&id) {
            return Ok(data.clone());
        }
        let data = self
            .db
            .with_face_data(id, |data, _| Arc::new(data.to_vec()))
            .ok_or_else(|| FontError::Unreadable(family.to_string()))?;
        cache.insert(id, data.clone());
        Ok(data)
    }
}

/// A face ready for measuring and drawing.
pub struct LoadedFace {
    family: String,
    data: Arc<Vec<u8>>,
    index: u32,
    embolden: bool,
    oblique: bool,
}

impl LoadedFace {
    fn parse(&self) -> Result<ttf_parser::Face<'_>, FontError> {
        ttf_parser::Face::parse(&self.data, self.index).map_err(|e| FontError::Parse {
            family: self.family.clone(),
            reason: e.to_string(),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn is_synthetic_bold(&self) -> bool {
        self.embolden
    }

    pub fn is_synthetic_italic(&self) -> bool {
        self.oblique
    }

    /// Parse the face once for repeated measuring and drawing.
    pub fn glyphs(&self) -> Result<Glyphs<'_>, FontError> {
        Ok(Glyphs {
            loaded: self,
            face: self.parse()?,
        })
    }

    /// Ascent + descent + line gap at `size` pixels per em.
    pub fn line_height(&self, size: f32) -> Result<f32, FontError> {
        Ok(self.glyphs()?.line_height(size))
    }

    pub fn advance(&self, ch: char, size: f32) -> Result<f32, FontError> {
        Ok(self.glyphs()?.advance(ch, size))
    }

    /// Draw `ch` with its origin at `(x, baseline)` and return its advance.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_char(
        &self,
        canvas: &mut Canvas,
        ch: char,
        size: f32,
        x: f32,
        baseline: f32,
        color: Rgb,
        anti_alias: bool,
    ) -> Result<f32, FontError> {
        Ok(self
            .glyphs()?
            .draw_char(canvas, ch, size, x, baseline, color, anti_alias))
    }
}

/// A parsed [`LoadedFace`].
pub struct Glyphs<'a> {
    loaded: &'a LoadedFace,
    face: ttf_parser::Face<'a>,
}

impl Glyphs<'_> {
    fn scale(&self, size: f32) -> f32 {
        size / self.face.units_per_em() as f32
    }

    pub fn line_height(&self, size: f32) -> f32 {
        let face = &self.face;
        let units = face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32;
        units * self.scale(size)
    }

    /// Horizontal advance of `ch`, using the missing-glyph advance when the
    /// face has no glyph for it.
    pub fn advance(&self, ch: char, size: f32) -> f32 {
        let glyph = self.face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
        let advance = self.face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * self.scale(size);
        if self.loaded.embolden {
            advance + embolden_width(size)
        } else {
            advance
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_char(
        &self,
        canvas: &mut Canvas,
        ch: char,
        size: f32,
        x: f32,
        baseline: f32,
        color: Rgb,
        anti_alias: bool,
    ) -> f32 {
        let glyph = self.face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));

        let mut outline = GlyphOutline {
            builder: PathBuilder::new(),
            scale: self.scale(size),
            skew: if self.loaded.oblique { OBLIQUE_SKEW } else { 0.0 },
            x,
            baseline,
        };
        if self.face.outline_glyph(glyph, &mut outline).is_some() {
            if let Some(path) = outline.builder.finish() {
                canvas.fill_path(&path, color, anti_alias);
                if self.loaded.embolden {
                    canvas.stroke_path(&path, color, embolden_width(size), anti_alias);
                }
            }
        }

        self.advance(ch, size)
    }
}

fn embolden_width(size: f32) -> f32 {
    (size / 16.0).max(0.5)
}

/// Converts font-unit outlines into canvas coordinates.
struct GlyphOutline {
    builder: PathBuilder,
    scale: f32,
    skew: f32,
    x: f32,
    baseline: f32,
}

impl GlyphOutline {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.x + (x + y * self.skew) * self.scale,
            self.baseline - y * self.scale,
        )
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
