//! Quantization output.

use crate::color::Rgb;
use crate::palette::Palette;

/// One palette index per pixel, row-major.
///
/// ```
/// use map_dither::IndexedRaster;
///
/// let raster = IndexedRaster::new(vec![34, 34, 18, 18], 2, 2);
/// assert_eq!(raster.get(0, 1), Some(18));
/// assert_eq!(raster.get(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRaster {
    indices: Vec<u8>,
    width: usize,
    height: usize,
}

impl IndexedRaster {
    pub fn new(indices: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{})",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<u8> {
        self.indices
    }

    /// Index at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.indices[y * self.width + x])
    }

    /// Re-expand to packed RGB bytes through the displayed colors.
    /// Clear entries come out black.
    pub fn to_rgb(&self) -> Vec<u8> {
        let palette = Palette::map();
        let mut out = Vec::with_capacity(self.indices.len() * 3);
        for &index in &self.indices {
            let c = if Palette::is_clear(index) {
                Rgb::BLACK
            } else {
                palette.displayed(index)
            };
            out.extend_from_slice(&[c.r, c.g, c.b]);
        }
        out
    }
}
