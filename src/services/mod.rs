pub mod pipeline;
pub mod rich_text;
pub mod settings_parser;

pub use pipeline::{EncodedTile, RenderOptions, RenderOutput, RenderPipeline};
pub use settings_parser::{ParsedBook, SettingsError, SettingsParser};
