//! Floyd-Steinberg error diffusion.

use crate::palette::Palette;

use super::{dither_with_kernel, Dither, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion over the map palette.
///
/// Distributes the whole quantization error to four neighbours:
/// 7/16 right, 3/16 below-left, 5/16 below, 1/16 below-right. The error is
/// measured against the displayed color of the chosen entry, not the color
/// used for matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, pixels: &[u32], width: usize, height: usize, palette: &Palette) -> Vec<u8> {
        dither_with_kernel(pixels, width, height, palette, &FLOYD_STEINBERG)
    }
}
