//! Settings block embedded at the end of a book.
//!
//! The first occurrence of `book2map` (or of `b2m` when the long marker
//! never appears) splits the book. The text before it is the body, every
//! line after it is a `key:value` directive.

use map_dither::Rgb;
use thiserror::Error;

use crate::models::{Document, EffectInvocation, RenderSettings};
use crate::rendering::colors::{self, ColorError};
use crate::rendering::tiles::TILE_SIZE;

/// Primary marker line.
pub const MARKER: &str = "book2map";

/// Short marker, only looked for when the primary one is absent.
pub const SHORT_MARKER: &str = "b2m";

/// Largest accepted `size` value, in pixels.
pub const MAX_FONT_SIZE: u32 = 1024;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid text color: {0}")]
    Color(#[from] ColorError),
}

/// Effects used when a book lists none of its own.
pub fn default_effects() -> Vec<EffectInvocation> {
    vec![
        EffectInvocation::new("background-random", ["brown"]),
        EffectInvocation::new("frame", ["black"]),
    ]
}

/// A book split into its body and its resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBook {
    /// Text before the marker, as a single page.
    pub body: Document,
    pub settings: RenderSettings,
    /// Effects in paint order.
    pub effects: Vec<EffectInvocation>,
    /// Whether a settings block was found.
    pub custom: bool,
    /// Directives that could not be used.
    pub warnings: Vec<String>,
}

/// One recognized `key:value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Font(String),
    Size(String),
    Top(String),
    Left(String),
    Width(String),
    Height(String),
    Dither(String),
    AntiAlias(String),
    Color(String),
    Effect(String),
}

impl Directive {
    /// Parse one settings line. Comments, unknown keys and lines without
    /// exactly one `:` separator yield `None`.
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.starts_with('!') || line.starts_with('#') {
            return None;
        }

        let mut parts: Vec<&str> = line.split(':').collect();
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        let [key, value] = parts[..] else {
            return None;
        };
        let value = value.trim().to_string();

        let directive = match key.trim() {
            "font" | "font-name" | "fontname" | "f" => Directive::Font(value),
            "size" | "font-size" | "fontsize" | "s" => Directive::Size(value),
            "top" | "top-offset" | "topoffset" | "t" => Directive::Top(value),
            "left" | "left-offset" | "leftoffset" | "l" => Directive::Left(value),
            "width" | "w" => Directive::Width(value),
            "height" | "h" => Directive::Height(value),
            "dither" | "d" => Directive::Dither(value),
            "aa" | "a" | "anti-aliasing" | "antialiasing" => Directive::AntiAlias(value),
            "color" | "c" | "textcolor" | "text-color" | "fontcolor" | "font-color" => {
                Directive::Color(value)
            }
            "effect" | "e" => Directive::Effect(value),
            other => {
                tracing::debug!(key = other, "Ignoring unknown setting");
                return None;
            }
        };
        Some(directive)
    }
}

/// Splits books and applies their directives on top of fixed defaults.
#[derive(Debug, Clone)]
pub struct SettingsParser {
    defaults: RenderSettings,
    max_tiles: u32,
}

impl SettingsParser {
    pub fn new(defaults: RenderSettings, max_tiles: u32) -> Self {
        Self {
            defaults,
            max_tiles: max_tiles.max(1),
        }
    }

    pub fn defaults(&self) -> &RenderSettings {
        &self.defaults
    }

    pub fn parse(&self, document: &Document) -> Result<ParsedBook, SettingsError> {
        let joined = document.joined();
        let split = joined
            .split_once(MARKER)
            .or_else(|| joined.split_once(SHORT_MARKER));

        let Some((body, block)) = split else {
            return Ok(ParsedBook {
                body: document.clone(),
                settings: self.defaults.clone(),
                effects: default_effects(),
                custom: false,
                warnings: Vec::new(),
            });
        };

        let body = body.trim().to_string();
        let directives: Vec<Directive> = block.lines().filter_map(Directive::parse).collect();
        tracing::debug!(directives = directives.len(), "Found settings block");

        let mut builder = SettingsBuilder::new(self.defaults.clone(), self.max_tiles);
        for directive in directives {
            builder.apply(directive)?;
        }
        let (settings, effects, warnings) = builder.finish();

        Ok(ParsedBook {
            body: Document::from_text(body),
            settings,
            effects,
            custom: true,
            warnings,
        })
    }
}

/// Map count in `1..=max_tiles`.
fn parse_tiles(value: &str, max_tiles: u32) -> Option<u32> {
    value
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=max_tiles).contains(n))
}

/// Applies directives in order. Effects start as the defaults and are
/// replaced by the first explicit `effect` directive.
struct SettingsBuilder {
    settings: RenderSettings,
    max_tiles: u32,
    effects: Vec<EffectInvocation>,
    explicit_effects: bool,
    warnings: Vec<String>,
}

impl SettingsBuilder {
    fn new(settings: RenderSettings, max_tiles: u32) -> Self {
        Self {
            settings,
            max_tiles,
            effects: default_effects(),
            explicit_effects: false,
            warnings: Vec::new(),
        }
    }

    fn apply(&mut self, directive: Directive) -> Result<(), SettingsError> {
        let s = &mut self.settings;
        match directive {
            Directive::Font(value) => s.font = value,
            Directive::Size(value) => {
                if let Some(size) = value
                    .parse::<u32>()
                    .ok()
                    .filter(|n| (1..=MAX_FONT_SIZE).contains(n))
                {
                    s.size = size;
                }
            }
            Directive::Top(value) => {
                if let Ok(top) = value.parse() {
                    s.top = top;
                }
            }
            Directive::Left(value) => {
                if let Ok(left) = value.parse() {
                    s.left = left;
                }
            }
            Directive::Width(value) => {
                if let Some(tiles) = parse_tiles(&value, self.max_tiles) {
                    s.width = tiles * TILE_SIZE;
                }
            }
            Directive::Height(value) => {
                if let Some(tiles) = parse_tiles(&value, self.max_tiles) {
                    s.height = tiles * TILE_SIZE;
                }
            }
            Directive::Dither(value) => s.dither = matches!(value.as_str(), "true" | "yes" | "1"),
            Directive::AntiAlias(value) => {
                s.anti_alias = !matches!(value.as_str(), "false" | "off" | "0")
            }
            Directive::Color(value) => s.color = colors::resolve(&value, Rgb::BLACK)?,
            Directive::Effect(value) => {
                if !self.explicit_effects {
                    self.effects.clear();
                    self.explicit_effects = true;
                }
                let invocation = EffectInvocation::parse(&value);
                if invocation.identifier.is_empty() {
                    self.warnings
                        .push(format!("Invalid effect settings: {value}"));
                } else {
                    self.effects.push(invocation);
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> (RenderSettings, Vec<EffectInvocation>, Vec<String>) {
        (self.settings, self.effects, self.warnings)
    }
}
