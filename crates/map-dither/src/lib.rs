#![allow(clippy::needless_range_loop)]

//! map-dither: quantization to the fixed map color palette
//!
//! Map tiles can only show a closed set of colors: 61 base hues, each in
//! four brightness shades, plus a transparent entry. This crate turns a
//! true-color ARGB buffer into one palette index per pixel.
//!
//! # Quick Start
//!
//! ```
//! use map_dither::{quantize, Rgb};
//!
//! let red = Rgb::new(255, 0, 0).to_argb();
//! let pixels = vec![red; 4];
//! let raster = quantize(&pixels, 2, 2, false).unwrap();
//!
//! assert_eq!(raster.width(), 2);
//! assert_eq!(raster.height(), 2);
//! ```
//!
//! # Two Color Tables
//!
//! Index selection and error diffusion look at a palette entry through
//! two different tables:
//!
//! | Table | Shade multipliers | Used for |
//! |-------|-------------------|----------|
//! | matched | 180, 220, 255, 135 (÷255) | [`Palette::find_nearest()`] |
//! | displayed | 0.71, 0.86, 1.0, 0.53 | quantization error in [`FloydSteinberg`] |
//!
//! The displayed table is how the entry actually appears on the tile, so
//! the error carried to neighbours is measured against it. The two tables
//! are kept apart on purpose and must not be unified.
//!
//! # Scan Order
//!
//! Dithering walks the image strictly row by row, left to right. Later
//! pixels read the already-adjusted values of earlier ones, so the order
//! is part of the output contract.

pub mod color;
pub mod dither;
pub mod error;
pub mod output;
pub mod palette;

pub use color::Rgb;
pub use dither::{Dither, FloydSteinberg, Kernel, Nearest, FLOYD_STEINBERG};
pub use error::QuantizeError;
pub use output::IndexedRaster;
pub use palette::{Palette, BASE_COLORS, CLEAR_INDEX, DISPLAY_SHADES, MATCH_SHADES};

/// Quantize an ARGB buffer (`0xAARRGGBB`, row-major) to map palette indices.
///
/// With `dither` off every pixel is mapped independently to its nearest
/// entry. With `dither` on the buffer is copied and Floyd-Steinberg error
/// diffusion runs over the copy in raster order.
pub fn quantize(
    pixels: &[u32],
    width: usize,
    height: usize,
    dither: bool,
) -> Result<IndexedRaster, QuantizeError> {
    let expected = width * height;
    if pixels.len() != expected {
        return Err(QuantizeError::DimensionMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let palette = Palette::map();
    let indices = if dither {
        FloydSteinberg.dither(pixels, width, height, palette)
    } else {
        Nearest.dither(pixels, width, height, palette)
    };

    Ok(IndexedRaster::new(indices, width, height))
}
