//! Splitting a quantized raster into 128×128 map tiles.

use map_dither::{IndexedRaster, CLEAR_INDEX};

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: u32 = 128;

/// One map's worth of palette indices, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Column of this tile in the grid.
    pub x: u32,
    /// Row of this tile in the grid.
    pub y: u32,
    pub columns: u32,
    pub rows: u32,
    indices: Vec<u8>,
}

impl Tile {
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return None;
        }
        self.indices.get((y * TILE_SIZE + x) as usize).copied()
    }
}

/// Grid of tiles covering a raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Cut `raster` into tiles. When the raster is not a whole number of
    /// tiles it is centered in the grid and the uncovered border is clear.
    pub fn from_raster(raster: &IndexedRaster) -> Self {
        let width = raster.width() as u32;
        let height = raster.height() as u32;
        let columns = width.div_ceil(TILE_SIZE);
        let rows = height.div_ceil(TILE_SIZE);
        let dx = (columns * TILE_SIZE - width) / 2;
        let dy = (rows * TILE_SIZE - height) / 2;

        let mut tiles = Vec::with_capacity((columns * rows) as usize);
        for ty in 0..rows {
            for tx in 0..columns {
                let mut indices = vec![CLEAR_INDEX; (TILE_SIZE * TILE_SIZE) as usize];
                for ly in 0..TILE_SIZE {
                    let Some(y) = (ty * TILE_SIZE + ly).checked_sub(dy) else {
                        continue;
                    };
                    for lx in 0..TILE_SIZE {
                        let Some(x) = (tx * TILE_SIZE + lx).checked_sub(dx) else {
                            continue;
                        };
                        if let Some(index) = raster.get(x as usize, y as usize) {
                            indices[(ly * TILE_SIZE + lx) as usize] = index;
                        }
                    }
                }
                tiles.push(Tile {
                    x: tx,
                    y: ty,
                    columns,
                    rows,
                    indices,
                });
            }
        }

        tracing::debug!(columns, rows, "Split raster into tiles");
        Self {
            columns,
            rows,
            tiles,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Tiles in row-major grid order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
