//! The map palette and nearest-color matching.
//!
//! A palette index encodes `base_id * 4 + shade`. Indices 0..4 belong to
//! the transparent base and are only produced for pixels whose alpha is
//! below one half.

mod table;

pub use table::{BASE_COLORS, DISPLAY_SHADES, MATCH_SHADES};

use std::sync::OnceLock;

use crate::color::{alpha, Rgb};

/// Index written for transparent pixels.
pub const CLEAR_INDEX: u8 = 0;

/// Total number of palette entries, transparent ones included.
pub const ENTRY_COUNT: usize = BASE_COLORS.len() * 4;

/// First index that refers to an opaque color.
const FIRST_OPAQUE: usize = 4;

/// The map palette with its matching and display tables precomputed.
#[derive(Debug, Clone)]
pub struct Palette {
    matched: [Rgb; ENTRY_COUNT],
    displayed: [Rgb; ENTRY_COUNT],
}

impl Palette {
    /// The shared map palette.
    pub fn map() -> &'static Palette {
        static PALETTE: OnceLock<Palette> = OnceLock::new();
        PALETTE.get_or_init(Palette::build)
    }

    fn build() -> Self {
        let mut matched = [Rgb::BLACK; ENTRY_COUNT];
        let mut displayed = [Rgb::BLACK; ENTRY_COUNT];

        for (base_id, base) in BASE_COLORS.iter().enumerate() {
            for shade in 0..4 {
                let index = base_id * 4 + shade;
                let m = MATCH_SHADES[shade];
                matched[index] = Rgb::new(
                    (base.r as u32 * m / 255) as u8,
                    (base.g as u32 * m / 255) as u8,
                    (base.b as u32 * m / 255) as u8,
                );
                let k = DISPLAY_SHADES[shade];
                displayed[index] = Rgb::new(
                    (base.r as f64 * k) as u8,
                    (base.g as f64 * k) as u8,
                    (base.b as f64 * k) as u8,
                );
            }
        }

        Self { matched, displayed }
    }

    /// Number of entries, including the four transparent ones.
    pub fn len(&self) -> usize {
        ENTRY_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `index` refers to the transparent base color.
    pub fn is_clear(index: u8) -> bool {
        (index as usize) < FIRST_OPAQUE
    }

    /// Color used when selecting the nearest entry.
    pub fn matched(&self, index: u8) -> Rgb {
        self.matched[index as usize % ENTRY_COUNT]
    }

    /// Color the entry shows on a tile: the base hue scaled by the display
    /// coefficient of its shade.
    pub fn displayed(&self, index: u8) -> Rgb {
        self.displayed[index as usize % ENTRY_COUNT]
    }

    /// Find the entry closest to an ARGB value.
    ///
    /// Pixels with alpha below 128 map to [`CLEAR_INDEX`]. Opaque pixels
    /// are compared against the matching table with a red-mean weighted
    /// RGB distance; ties go to the lowest index.
    pub fn find_nearest(&self, argb: u32) -> u8 {
        if alpha(argb) < 128 {
            return CLEAR_INDEX;
        }
        let color = Rgb::from_argb(argb);

        let mut best = FIRST_OPAQUE;
        let mut best_distance = u32::MAX;
        for index in FIRST_OPAQUE..ENTRY_COUNT {
            let d = redmean_distance(color, self.matched[index]);
            if d < best_distance {
                best_distance = d;
                best = index;
                if d == 0 {
                    break;
                }
            }
        }
        best as u8
    }
}

/// Squared RGB distance weighted by the mean red level of both colors.
fn redmean_distance(a: Rgb, b: Rgb) -> u32 {
    let rmean = (a.r as i32 + b.r as i32) / 2;
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    let d = (((512 + rmean) * dr * dr) >> 8) + 4 * dg * dg + (((767 - rmean) * db * db) >> 8);
    d as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_count() {
        assert_eq!(Palette::map().len(), 248);
    }

    #[test]
    fn test_matched_shades() {
        let palette = Palette::map();
        // base 8 is pure white
        assert_eq!(palette.matched(8 * 4 + 2), Rgb::new(255, 255, 255));
        assert_eq!(palette.matched(8 * 4), Rgb::new(180, 180, 180));
        assert_eq!(palette.matched(8 * 4 + 3), Rgb::new(135, 135, 135));
    }

    #[test]
    fn test_displayed_uses_display_coefficients() {
        let palette = Palette::map();
        assert_eq!(palette.displayed(8 * 4), Rgb::new(181, 181, 181));
        assert_eq!(palette.displayed(8 * 4 + 1), Rgb::new(219, 219, 219));
        assert_eq!(palette.displayed(8 * 4 + 2), Rgb::new(255, 255, 255));
        assert_eq!(palette.displayed(8 * 4 + 3), Rgb::new(135, 135, 135));
    }

    #[test]
    fn test_transparent_maps_to_clear() {
        let palette = Palette::map();
        assert_eq!(palette.find_nearest(0x00FF_FFFF), CLEAR_INDEX);
        assert_eq!(palette.find_nearest(0x7F12_3456), CLEAR_INDEX);
        assert!(Palette::is_clear(3));
        assert!(!Palette::is_clear(4));
    }

    #[test]
    fn test_exact_matched_color_finds_itself() {
        let palette = Palette::map();
        // pure red (fire, full brightness)
        assert_eq!(palette.find_nearest(0xFFFF_0000), 4 * 4 + 2);
        // pure white (snow, full brightness)
        assert_eq!(palette.find_nearest(0xFFFF_FFFF), 8 * 4 + 2);
    }

    #[test]
    fn test_never_selects_clear_for_opaque() {
        let palette = Palette::map();
        for argb in [0xFF00_0000u32, 0xFF01_0101, 0xFF80_8080] {
            assert!(!Palette::is_clear(palette.find_nearest(argb)));
        }
    }

    #[test]
    fn test_redmean_distance_zero_for_equal() {
        let c = Rgb::new(10, 200, 30);
        assert_eq!(redmean_distance(c, c), 0);
        assert!(redmean_distance(c, Rgb::new(11, 200, 30)) > 0);
    }
}
