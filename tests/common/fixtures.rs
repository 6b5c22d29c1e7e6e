//! Test fixtures and constants.

/// Book pages used across tests
pub mod books {
    /// Two maps wide, one high, red background, no text
    pub const RED_BANNER: &str = "book2map\nwidth:2\nheight:1\neffect:background,red";

    /// Two maps with a black background and crisp red text
    pub const HELLO: &str =
        "Hello\nbook2map\nwidth:2\nheight:1\ncolor:red\naa:off\neffect:background,black";

    /// Family name of the bundled test font
    pub const TEST_FAMILY: &str = "Tuffy";

    /// One map, later full-canvas fill wins
    pub const LAYERED: &str =
        "b2m\nwidth:1\nheight:1\neffect:background,black\neffect:rectangle,white,0,0,128,128";

    /// Unparseable size plus an unknown effect
    pub const SLOPPY: &str =
        "b2m\nwidth:1\nheight:1\nsize:bogus\neffect:background,white\neffect:sparkles";
}

/// Packed opaque ARGB for an RGB triple
pub fn opaque(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}
