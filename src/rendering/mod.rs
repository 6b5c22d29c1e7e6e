pub mod canvas;
pub mod colors;
pub mod composite;
pub mod effects;
pub mod fonts;
pub mod png_out;
pub mod text;
pub mod textures;
pub mod tiles;

pub use canvas::Canvas;
pub use composite::{composite, Composition, PaintPlan};
pub use fonts::FontLibrary;
pub use text::TextLayout;
pub use textures::TextureStore;
pub use tiles::{Tile, TileSet, TILE_SIZE};
