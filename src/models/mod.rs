pub mod config;
pub mod document;
pub mod settings;

pub use config::{AppConfig, DefaultSettings};
pub use document::Document;
pub use settings::{EffectInvocation, RenderSettings};
