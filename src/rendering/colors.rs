//! Color name and hex resolution, plus the 16 formatting colors.

use map_dither::Rgb;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hex color '{0}' (expected #RRGGBB)")]
    InvalidHex(String),
}

/// Named colors accepted in settings and effect arguments. Case-sensitive.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("darkred", Rgb::new(139, 0, 0)),
    ("dark_red", Rgb::new(139, 0, 0)),
    ("dark red", Rgb::new(139, 0, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("lightblue", Rgb::new(173, 216, 230)),
    ("light_blue", Rgb::new(173, 216, 230)),
    ("light blue", Rgb::new(173, 216, 230)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("lightgray", Rgb::new(192, 192, 192)),
    ("light_gray", Rgb::new(192, 192, 192)),
    ("light gray", Rgb::new(192, 192, 192)),
    ("darkgray", Rgb::new(64, 64, 64)),
    ("dark_gray", Rgb::new(64, 64, 64)),
    ("dark gray", Rgb::new(64, 64, 64)),
    ("orange", Rgb::new(255, 200, 0)),
    ("pink", Rgb::new(255, 175, 175)),
    ("purple", Rgb::new(160, 32, 240)),
    ("lime", Rgb::new(50, 205, 50)),
    ("brown", Rgb::new(165, 42, 42)),
];

/// Formatting colors: (code, normalized name, color).
const FORMATTING_COLORS: [(char, &str, Rgb); 16] = [
    ('0', "black", Rgb::from_hex(0x000000)),
    ('1', "darkblue", Rgb::from_hex(0x0000AA)),
    ('2', "darkgreen", Rgb::from_hex(0x00AA00)),
    ('3', "darkaqua", Rgb::from_hex(0x00AAAA)),
    ('4', "darkred", Rgb::from_hex(0xAA0000)),
    ('5', "darkpurple", Rgb::from_hex(0xAA00AA)),
    ('6', "gold", Rgb::from_hex(0xFFAA00)),
    ('7', "gray", Rgb::from_hex(0xAAAAAA)),
    ('8', "darkgray", Rgb::from_hex(0x555555)),
    ('9', "blue", Rgb::from_hex(0x5555FF)),
    ('a', "green", Rgb::from_hex(0x55FF55)),
    ('b', "aqua", Rgb::from_hex(0x55FFFF)),
    ('c', "red", Rgb::from_hex(0xFF5555)),
    ('d', "lightpurple", Rgb::from_hex(0xFF55FF)),
    ('e', "yellow", Rgb::from_hex(0xFFFF55)),
    ('f', "white", Rgb::from_hex(0xFFFFFF)),
];

/// Resolve a color token.
///
/// Empty tokens give `default`. `#RRGGBB` is parsed case-insensitively and
/// anything else starting with `#` is an error. Names are looked up in the
/// named table first, then among the formatting colors, then fall back to
/// `default`.
pub fn resolve(token: &str, default: Rgb) -> Result<Rgb, ColorError> {
    if token.is_empty() {
        return Ok(default);
    }

    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(token.to_string()));
    }

    if let Some((_, color)) = NAMED_COLORS.iter().find(|(name, _)| *name == token) {
        return Ok(*color);
    }

    Ok(formatting_by_name(token).unwrap_or(default))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Rgb::from_hex)
}

/// Color of a formatting code (`0`-`9`, `a`-`f`, case-insensitive).
pub fn formatting_color(code: char) -> Option<Rgb> {
    let code = code.to_ascii_lowercase();
    FORMATTING_COLORS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, rgb)| *rgb)
}

/// Formatting code for a color name such as `dark_aqua` or `DarkAqua`.
pub fn formatting_code(name: &str) -> Option<char> {
    let key = normalize_name(name);
    FORMATTING_COLORS
        .iter()
        .find(|(_, n, _)| *n == key)
        .map(|(code, _, _)| *code)
}

fn formatting_by_name(name: &str) -> Option<Rgb> {
    formatting_code(name).and_then(formatting_color)
}

/// Lowercase and drop everything that is not a letter.
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Rgb = Rgb::new(1, 2, 3);

    #[test]
    fn test_resolve_hex() {
        assert_eq!(resolve("#ff0000", DEFAULT), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(resolve("#FF0000", DEFAULT), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(resolve("#12aBcD", DEFAULT), Ok(Rgb::new(0x12, 0xAB, 0xCD)));
    }

    #[test]
    fn test_resolve_malformed_hex_is_error() {
        for token in ["#", "#fff", "#gg0000", "#1234567", "#+12345"] {
            assert_eq!(
                resolve(token, DEFAULT),
                Err(ColorError::InvalidHex(token.to_string())),
                "token {token}"
            );
        }
    }

    #[test]
    fn test_resolve_empty_gives_default() {
        assert_eq!(resolve("", DEFAULT), Ok(DEFAULT));
    }

    #[test]
    fn test_resolve_unknown_gives_default() {
        assert_eq!(resolve("chartreuse-ish", DEFAULT), Ok(DEFAULT));
    }

    #[test]
    fn test_resolve_named_aliases_agree() {
        let dark_red = Rgb::new(139, 0, 0);
        assert_eq!(resolve("darkred", DEFAULT), Ok(dark_red));
        assert_eq!(resolve("dark_red", DEFAULT), Ok(dark_red));
        assert_eq!(resolve("dark red", DEFAULT), Ok(dark_red));
    }

    #[test]
    fn test_resolve_named_table_is_case_sensitive() {
        // "Red" misses the named table and lands on the formatting red
        assert_eq!(resolve("red", DEFAULT), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(resolve("Red", DEFAULT), Ok(Rgb::new(0xFF, 0x55, 0x55)));
    }

    #[test]
    fn test_resolve_formatting_fallback() {
        assert_eq!(resolve("gold", DEFAULT), Ok(Rgb::from_hex(0xFFAA00)));
        assert_eq!(resolve("dark_aqua", DEFAULT), Ok(Rgb::from_hex(0x00AAAA)));
        assert_eq!(resolve("DARK_AQUA", DEFAULT), Ok(Rgb::from_hex(0x00AAAA)));
    }

    #[test]
    fn test_formatting_codes() {
        assert_eq!(formatting_color('c'), Some(Rgb::from_hex(0xFF5555)));
        assert_eq!(formatting_color('C'), Some(Rgb::from_hex(0xFF5555)));
        assert_eq!(formatting_color('l'), None);
        assert_eq!(formatting_code("light_purple"), Some('d'));
        assert_eq!(formatting_code("mauve"), None);
    }
}
