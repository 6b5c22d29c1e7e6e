use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding `<name>.png` textures
    #[serde(default = "default_textures_dir")]
    pub textures_dir: PathBuf,

    /// Extra fonts loaded next to the system fonts
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,

    /// Whether installed system fonts are available to books
    #[serde(default = "default_true")]
    pub load_system_fonts: bool,

    /// Largest accepted `width`/`height` setting, in maps
    #[serde(default = "default_max_tiles")]
    pub max_tiles: u32,

    /// Settings used when a book does not override them
    #[serde(default)]
    pub defaults: DefaultSettings,
}

fn default_textures_dir() -> PathBuf {
    PathBuf::from("textures")
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("fonts")
}

fn default_true() -> bool {
    true
}

fn default_max_tiles() -> u32 {
    8
}

/// Per-render defaults
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DefaultSettings {
    /// Font family; unset picks the library default
    #[serde(default)]
    pub font: Option<String>,

    #[serde(default = "default_size")]
    pub size: u32,

    #[serde(default = "default_left")]
    pub left: i32,

    #[serde(default = "default_top")]
    pub top: i32,

    /// Width in maps
    #[serde(default = "default_tiles")]
    pub width: u32,

    /// Height in maps
    #[serde(default = "default_tiles")]
    pub height: u32,

    #[serde(default)]
    pub dither: bool,

    #[serde(default = "default_true")]
    pub antialias: bool,

    #[serde(default = "default_color")]
    pub color: String,
}

fn default_size() -> u32 {
    20
}

fn default_left() -> i32 {
    8
}

fn default_top() -> i32 {
    10
}

fn default_tiles() -> u32 {
    2
}

fn default_color() -> String {
    "white".to_string()
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            font: None,
            size: default_size(),
            left: default_left(),
            top: default_top(),
            width: default_tiles(),
            height: default_tiles(),
            dither: false,
            antialias: true,
            color: default_color(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            textures_dir: default_textures_dir(),
            fonts_dir: default_fonts_dir(),
            load_system_fonts: true,
            max_tiles: default_max_tiles(),
            defaults: DefaultSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` or `./config.yaml`, then apply the
    /// `TEXTURES_DIR` / `FONTS_DIR` environment overrides.
    pub fn load() -> Self {
        let path = std::env::var("CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"));
        let mut config = Self::load_from_path(&path);

        if let Ok(dir) = std::env::var("TEXTURES_DIR") {
            config.textures_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("FONTS_DIR") {
            config.fonts_dir = PathBuf::from(dir);
        }
        config
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content),
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text, falling back to defaults
    pub fn from_yaml(content: &str) -> Self {
        match serde_yaml::from_str::<Self>(content) {
            Ok(config) => {
                tracing::info!(
                    textures = %config.textures_dir.display(),
                    fonts = %config.fonts_dir.display(),
                    max_tiles = config.max_tiles,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }
}
