//! Palette index selection, with and without error diffusion.
//!
//! Both strategies implement [`Dither`] so callers can swap them freely.
//!
//! ```
//! use map_dither::{Dither, FloydSteinberg, Nearest, Palette};
//!
//! let pixels = vec![0xFF80_8080u32; 16];
//! let plain = Nearest.dither(&pixels, 4, 4, Palette::map());
//! let diffused = FloydSteinberg.dither(&pixels, 4, 4, Palette::map());
//! assert_eq!(plain.len(), diffused.len());
//! ```

mod floyd_steinberg;
mod kernel;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{dither_with_kernel, Kernel, FLOYD_STEINBERG};

use crate::palette::Palette;

/// Maps an ARGB buffer to palette indices.
pub trait Dither {
    /// `pixels` is row-major `0xAARRGGBB` with `width * height` entries.
    fn dither(&self, pixels: &[u32], width: usize, height: usize, palette: &Palette) -> Vec<u8>;
}

/// Independent per-pixel nearest-color mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nearest;

impl Dither for Nearest {
    fn dither(&self, pixels: &[u32], _width: usize, _height: usize, palette: &Palette) -> Vec<u8> {
        pixels.iter().map(|&p| palette.find_nearest(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_maps_each_pixel() {
        let pixels = [0xFFFF_0000, 0xFFFF_FFFF, 0x0000_0000];
        let out = Nearest.dither(&pixels, 3, 1, Palette::map());
        assert_eq!(out, vec![18, 34, 0]);
    }
}
