//! Paint effects and their registry.
//!
//! Every effect takes its arguments positionally: supplying N arguments
//! fills the first N parameters, the rest keep their defaults and extra
//! arguments are ignored. A recoverable problem is reported as a
//! [`EffectError::Diagnostic`]; anything else aborts the render.

mod background;
mod shapes;
mod texture;

pub use background::{Background, BackgroundRandom, BackgroundTexture};
pub use shapes::{Circle, Frame, Line, Rectangle};
pub use texture::Texture;

use map_dither::Rgb;
use thiserror::Error;

use super::colors::{self, ColorError};
use super::fonts::FontError;
use super::textures::TextureStore;
use super::Canvas;

/// Identifier reserved for the book text.
pub const BOOK_CONTENT: &str = "book-content";

/// Identifier used for unknown effects.
pub const NONE: &str = "none";

#[derive(Debug, Error)]
pub enum EffectError {
    /// Recoverable problem shown to the user; the render continues.
    #[error("{0}")]
    Diagnostic(String),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Font(#[from] FontError),
}

impl EffectError {
    pub fn diagnostic(message: impl Into<String>) -> Self {
        EffectError::Diagnostic(message.into())
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(self, EffectError::Diagnostic(_))
    }
}

/// Read-only context shared by every effect of one render.
pub struct EffectContext<'a> {
    pub textures: &'a TextureStore,
    pub anti_alias: bool,
    /// Seed for noise effects. `None` draws from entropy.
    pub seed: Option<u64>,
}

/// A named paint operation.
pub trait Effect: Send + Sync {
    fn identifier(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError>;
}

/// Placeholder marking where the book text is painted. Does nothing when
/// applied directly.
pub struct BookContent;

impl Effect for BookContent {
    fn identifier(&self) -> &'static str {
        BOOK_CONTENT
    }

    fn description(&self) -> &'static str {
        "placeholder for the actual content of the book, use this to change the layering"
    }

    fn apply(&self, _: &mut Canvas, _: &EffectContext<'_>, _: &[String]) -> Result<(), EffectError> {
        Ok(())
    }
}

/// Stands in for identifiers that are not registered.
pub struct NoneEffect;

impl Effect for NoneEffect {
    fn identifier(&self) -> &'static str {
        NONE
    }

    fn description(&self) -> &'static str {
        "placeholder for missing effects"
    }

    fn apply(&self, _: &mut Canvas, _: &EffectContext<'_>, _: &[String]) -> Result<(), EffectError> {
        Err(EffectError::diagnostic(
            "Unknown effect was specified! Please check your spelling.",
        ))
    }
}

static REGISTRY: &[&dyn Effect] = &[
    &Background,
    &BackgroundRandom,
    &BackgroundTexture,
    &Frame,
    &Circle,
    &Rectangle,
    &Line,
    &Texture,
    &BookContent,
    &NoneEffect,
];

/// All built-in effects in catalog order.
pub fn registry() -> &'static [&'static dyn Effect] {
    REGISTRY
}

/// Effect registered under `identifier`, or [`NoneEffect`].
pub fn lookup(identifier: &str) -> &'static dyn Effect {
    match REGISTRY.iter().find(|e| e.identifier() == identifier) {
        Some(effect) => *effect,
        None => {
            tracing::debug!(identifier, "Unknown effect identifier");
            &NoneEffect
        }
    }
}

/// Positional argument reader.
pub(crate) struct Args<'a> {
    args: &'a [String],
}

impl<'a> Args<'a> {
    pub(crate) fn new(args: &'a [String]) -> Self {
        Self { args }
    }

    pub(crate) fn len(&self) -> usize {
        self.args.len()
    }

    pub(crate) fn str(&self, i: usize) -> Option<&'a str> {
        self.args.get(i).map(|s| s.trim())
    }

    /// Color at `i`; absent or empty gives `default`.
    pub(crate) fn color(&self, i: usize, default: Rgb) -> Result<Rgb, ColorError> {
        colors::resolve(self.str(i).unwrap_or(""), default)
    }

    /// Integer at `i`; absent gives `default`, unparsable gives `None`.
    pub(crate) fn int(&self, i: usize, default: i32) -> Option<i32> {
        match self.str(i) {
            None => Some(default),
            Some(s) => s.parse().ok(),
        }
    }
}
