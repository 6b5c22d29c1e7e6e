//! Indexed PNG output over the map palette.

use std::io::Cursor;

use map_dither::{IndexedRaster, Palette};

use super::tiles::{Tile, TILE_SIZE};
use crate::error::RenderError;

/// Number of leading palette entries that are transparent.
const CLEAR_ENTRIES: usize = 4;

/// Encode a full raster as an 8-bit indexed PNG.
pub fn encode_raster(raster: &IndexedRaster) -> Result<Vec<u8>, RenderError> {
    encode_indexed_png(
        raster.width() as u32,
        raster.height() as u32,
        raster.indices(),
    )
}

/// Encode one 128×128 tile.
pub fn encode_tile(tile: &Tile) -> Result<Vec<u8>, RenderError> {
    encode_indexed_png(TILE_SIZE, TILE_SIZE, tile.indices())
}

/// 8-bit indexed PNG whose PLTE holds the displayed color of every palette
/// entry. The clear entries are marked transparent in tRNS.
pub fn encode_indexed_png(width: u32, height: u32, indices: &[u8]) -> Result<Vec<u8>, RenderError> {
    let expected = width as usize * height as usize;
    if indices.len() != expected {
        return Err(RenderError::PngEncode(format!(
            "expected {expected} indices, got {}",
            indices.len()
        )));
    }

    let palette = Palette::map();
    let plte: Vec<u8> = (0..palette.len())
        .flat_map(|i| {
            let c = palette.displayed(i as u8);
            [c.r, c.g, c.b]
        })
        .collect();
    let trns = [0u8; CLEAR_ENTRIES];

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        encoder.set_trns(trns.to_vec());
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(indices)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
