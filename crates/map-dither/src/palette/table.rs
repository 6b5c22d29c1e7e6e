//! Static map color tables.

use crate::color::Rgb;

/// Base hues in id order. Id 0 is the transparent entry; its color is
/// never matched.
pub const BASE_COLORS: [Rgb; 62] = [
    Rgb::from_hex(0x000000), // 0 clear
    Rgb::from_hex(0x7FB238), // 1 grass
    Rgb::from_hex(0xF7E9A3), // 2 sand
    Rgb::from_hex(0xC7C7C7), // 3 wool
    Rgb::from_hex(0xFF0000), // 4 fire
    Rgb::from_hex(0xA0A0FF), // 5 ice
    Rgb::from_hex(0xA7A7A7), // 6 metal
    Rgb::from_hex(0x007C00), // 7 plant
    Rgb::from_hex(0xFFFFFF), // 8 snow
    Rgb::from_hex(0xA4A8B8), // 9 clay
    Rgb::from_hex(0x976D4D), // 10 dirt
    Rgb::from_hex(0x707070), // 11 stone
    Rgb::from_hex(0x4040FF), // 12 water
    Rgb::from_hex(0x8F7748), // 13 wood
    Rgb::from_hex(0xFFFCF5), // 14 quartz
    Rgb::from_hex(0xD87F33), // 15 orange
    Rgb::from_hex(0xB24CD8), // 16 magenta
    Rgb::from_hex(0x6699D8), // 17 light blue
    Rgb::from_hex(0xE5E533), // 18 yellow
    Rgb::from_hex(0x7FCC19), // 19 lime
    Rgb::from_hex(0xF27FA5), // 20 pink
    Rgb::from_hex(0x4C4C4C), // 21 gray
    Rgb::from_hex(0x999999), // 22 light gray
    Rgb::from_hex(0x4C7F99), // 23 cyan
    Rgb::from_hex(0x7F3FB2), // 24 purple
    Rgb::from_hex(0x334CB2), // 25 blue
    Rgb::from_hex(0x664C33), // 26 brown
    Rgb::from_hex(0x667F33), // 27 green
    Rgb::from_hex(0x993333), // 28 red
    Rgb::from_hex(0x191919), // 29 black
    Rgb::from_hex(0xFAEE4D), // 30 gold
    Rgb::from_hex(0x5CDBD5), // 31 diamond
    Rgb::from_hex(0x4A80FF), // 32 lapis
    Rgb::from_hex(0x00D93A), // 33 emerald
    Rgb::from_hex(0x815631), // 34 podzol
    Rgb::from_hex(0x700200), // 35 nether
    Rgb::from_hex(0xD1B1A1), // 36 terracotta white
    Rgb::from_hex(0x9F5224), // 37 terracotta orange
    Rgb::from_hex(0x95576C), // 38 terracotta magenta
    Rgb::from_hex(0x706C8A), // 39 terracotta light blue
    Rgb::from_hex(0xBA8524), // 40 terracotta yellow
    Rgb::from_hex(0x677535), // 41 terracotta lime
    Rgb::from_hex(0xA04D4E), // 42 terracotta pink
    Rgb::from_hex(0x392923), // 43 terracotta gray
    Rgb::from_hex(0x876B62), // 44 terracotta light gray
    Rgb::from_hex(0x575C5C), // 45 terracotta cyan
    Rgb::from_hex(0x7A4958), // 46 terracotta purple
    Rgb::from_hex(0x4C3E5C), // 47 terracotta blue
    Rgb::from_hex(0x4C3223), // 48 terracotta brown
    Rgb::from_hex(0x4C522A), // 49 terracotta green
    Rgb::from_hex(0x8E3C2E), // 50 terracotta red
    Rgb::from_hex(0x251610), // 51 terracotta black
    Rgb::from_hex(0xBD3031), // 52 crimson nylium
    Rgb::from_hex(0x943F61), // 53 crimson stem
    Rgb::from_hex(0x5C191D), // 54 crimson hyphae
    Rgb::from_hex(0x167E86), // 55 warped nylium
    Rgb::from_hex(0x3A8E8C), // 56 warped stem
    Rgb::from_hex(0x562C3E), // 57 warped hyphae
    Rgb::from_hex(0x14B485), // 58 warped wart
    Rgb::from_hex(0x646464), // 59 deepslate
    Rgb::from_hex(0xD8AF93), // 60 raw iron
    Rgb::from_hex(0x7FA796), // 61 glow lichen
];

/// Brightness multipliers (out of 255) used to build the matching table.
/// Indexed by shade, i.e. palette index mod 4.
pub const MATCH_SHADES: [u32; 4] = [180, 220, 255, 135];

/// Brightness coefficients describing how a shade is displayed on a tile.
/// Indexed by palette index mod 4.
pub const DISPLAY_SHADES: [f64; 4] = [0.71, 0.86, 1.0, 0.53];
