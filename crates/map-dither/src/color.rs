//! 8-bit RGB color and ARGB packing helpers.

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Pack as fully opaque `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpack the color channels of an ARGB value, dropping alpha.
    pub const fn from_argb(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }
}

/// Alpha channel of a packed ARGB value.
#[inline]
pub const fn alpha(argb: u32) -> u8 {
    (argb >> 24) as u8
}

/// Repack channels into ARGB keeping the given alpha.
#[inline]
pub const fn pack(alpha: u8, r: u8, g: u8, b: u8) -> u32 {
    (alpha as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_packing() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_argb(), 0xFF12_3456);
        assert_eq!(Rgb::from_argb(0x8012_3456), c);
        assert_eq!(alpha(0x8012_3456), 0x80);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex(0x7FB238), Rgb::new(0x7F, 0xB2, 0x38));
    }

    #[test]
    fn test_pack_keeps_alpha() {
        assert_eq!(pack(0x40, 1, 2, 3), 0x4001_0203);
    }
}
