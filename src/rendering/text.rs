//! Book text layout.
//!
//! Lines are drawn top to bottom. Inside a line, `§` starts a two
//! character formatting code: `0`-`9`/`a`-`f` pick a color, `l` turns bold
//! on, `o` turns italic on, `r` resets color and style. Any other code is
//! swallowed. A `§` closing a line takes the first character of the next
//! line as its code. A line may start with `^^DD` or `^D` to grow the font
//! size for that line only.

use std::sync::Arc;

use map_dither::Rgb;

use super::colors;
use super::effects::{Effect, EffectContext, EffectError, BOOK_CONTENT};
use super::fonts::{FontError, FontLibrary, FontStyle, LoadedFace};
use super::Canvas;
use crate::models::{Document, RenderSettings};

pub const FORMAT_MARKER: char = '§';

/// Draws the body of a book. Takes the place of the `book-content`
/// placeholder in the paint plan.
pub struct TextLayout {
    body: Document,
    font: String,
    size: u32,
    left: i32,
    top: i32,
    color: Rgb,
    fonts: Arc<FontLibrary>,
}

impl TextLayout {
    pub fn new(body: Document, settings: &RenderSettings, fonts: Arc<FontLibrary>) -> Self {
        Self {
            body,
            font: settings.font.clone(),
            size: settings.size,
            left: settings.left,
            top: settings.top,
            color: settings.color,
            fonts,
        }
    }
}

impl Effect for TextLayout {
    fn identifier(&self) -> &'static str {
        BOOK_CONTENT
    }

    fn description(&self) -> &'static str {
        "draws the text of the book"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        _args: &[String],
    ) -> Result<(), EffectError> {
        if self.body.lines().all(|line| line.trim().is_empty()) {
            return Ok(());
        }
        let family = self
            .fonts
            .resolve_family(&self.font)
            .ok_or(FontError::NoFonts)?;
        let faces = STYLES
            .iter()
            .map(|&style| self.fonts.face(&family, style))
            .collect::<Result<Vec<_>, _>>()?;
        let glyphs = faces
            .iter()
            .map(LoadedFace::glyphs)
            .collect::<Result<Vec<_>, _>>()?;
        let line_face = &glyphs[style_slot(FontStyle::BOLD)];

        let mut style = FontStyle::PLAIN;
        // A `§` ending a line applies to the first character of the next.
        let mut pending_code = false;
        let mut y = self.top as f32;
        let mut drawn = 0usize;

        for raw in self.body.lines() {
            let (delta, line) = split_size_prefix(raw);
            let size = self.size.saturating_add(delta) as f32;
            let baseline = y + line_face.line_height(size);
            if baseline > canvas.height() as f32 {
                tracing::debug!(lines = drawn, "Text reached the bottom of the canvas");
                break;
            }
            y = baseline;

            let mut color = self.color;
            let mut x = self.left as f32;
            for ch in line.chars() {
                if pending_code {
                    apply_code(ch, self.color, &mut color, &mut style);
                    pending_code = false;
                    continue;
                }
                if ch == FORMAT_MARKER {
                    pending_code = true;
                    continue;
                }
                let face = &glyphs[style_slot(style)];
                x += face.draw_char(canvas, ch, size, x, y, color, ctx.anti_alias);
            }
            drawn += 1;
        }
        Ok(())
    }
}

/// Strip a leading `^^DD` / `^D` size prefix. Without digits after the
/// marker the line is returned untouched with a delta of 0.
pub fn split_size_prefix(line: &str) -> (u32, &str) {
    let rest = line
        .strip_prefix("^^")
        .or_else(|| line.strip_prefix('^'));
    let Some(rest) = rest else {
        return (0, line);
    };

    let digits = rest
        .bytes()
        .take(2)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return (0, line);
    }
    let delta = rest[..digits].parse().unwrap_or(0);
    (delta, &rest[digits..])
}

fn apply_code(code: char, base: Rgb, color: &mut Rgb, style: &mut FontStyle) {
    if let Some(c) = colors::formatting_color(code) {
        *color = c;
        return;
    }
    match code.to_ascii_lowercase() {
        'l' => style.bold = true,
        'o' => style.italic = true,
        'r' => {
            *color = base;
            *style = FontStyle::PLAIN;
        }
        _ => {}
    }
}

/// Every style a line can switch to, indexed by [`style_slot`].
const STYLES: [FontStyle; 4] = [
    FontStyle::PLAIN,
    FontStyle::BOLD,
    FontStyle {
        bold: false,
        italic: true,
    },
    FontStyle {
        bold: true,
        italic: true,
    },
];

fn style_slot(style: FontStyle) -> usize {
    usize::from(style.bold) | usize::from(style.italic) << 1
}
