use map_dither::Rgb;

use crate::rendering::tiles::TILE_SIZE;

/// Everything that controls one render besides the effect list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Canvas width in pixels, a multiple of 128.
    pub width: u32,
    /// Canvas height in pixels, a multiple of 128.
    pub height: u32,
    /// Requested font family; resolved against the installed fonts at
    /// layout time.
    pub font: String,
    pub size: u32,
    pub left: i32,
    pub top: i32,
    pub dither: bool,
    pub anti_alias: bool,
    pub color: Rgb,
}

impl RenderSettings {
    /// Human-readable settings summary, one line per setting.
    pub fn summary(&self) -> Vec<String> {
        vec![
            format!("Font: {}", self.font),
            format!("Font size: {}", self.size),
            format!(
                "Font color: R{} G{} B{}",
                self.color.r, self.color.g, self.color.b
            ),
            format!("Width in maps: {}", self.width / TILE_SIZE),
            format!("Height in maps: {}", self.height / TILE_SIZE),
            format!("Left side offset: {}", self.left),
            format!("Top side offset: {}", self.top),
            format!("Use dithering: {}", self.dither),
            format!("Anti-aliasing: {}", self.anti_alias),
        ]
    }
}

/// One `effect` directive: identifier plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectInvocation {
    pub identifier: String,
    pub args: Vec<String>,
}

impl EffectInvocation {
    pub fn new<I, S>(identifier: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifier: identifier.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse an `effect` value: `id` or `id,arg,arg,...`.
    ///
    /// Arguments are trimmed; trailing empty arguments are dropped while
    /// empty ones in between keep their position.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let Some((identifier, rest)) = value.split_once(',') else {
            return Self::new(value, Vec::<String>::new());
        };

        let mut args: Vec<String> = rest.split(',').map(|a| a.trim().to_string()).collect();
        while args.last().is_some_and(|a| a.is_empty()) {
            args.pop();
        }
        Self {
            identifier: identifier.trim().to_string(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_identifier_only() {
        let inv = EffectInvocation::parse(" frame ");
        assert_eq!(inv.identifier, "frame");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_parse_with_arguments() {
        let inv = EffectInvocation::parse("circle, red ,1,, 2,,");
        assert_eq!(inv.identifier, "circle");
        assert_eq!(inv.args, vec!["red", "1", "", "2"]);
    }

    #[test]
    fn test_parse_trailing_comma_only() {
        let inv = EffectInvocation::parse("background,");
        assert_eq!(inv.identifier, "background");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_summary() {
        let settings = RenderSettings {
            width: 256,
            height: 128,
            font: "Minecraft".to_string(),
            size: 20,
            left: 8,
            top: 10,
            dither: false,
            anti_alias: true,
            color: Rgb::new(255, 0, 0),
        };
        assert_eq!(
            settings.summary(),
            vec![
                "Font: Minecraft",
                "Font size: 20",
                "Font color: R255 G0 B0",
                "Width in maps: 2",
                "Height in maps: 1",
                "Left side offset: 8",
                "Top side offset: 10",
                "Use dithering: false",
                "Anti-aliasing: true",
            ]
        );
    }
}
