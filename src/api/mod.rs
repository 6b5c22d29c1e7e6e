pub mod catalog;
pub mod render;

pub use catalog::{__path_handle_effects, __path_handle_fonts, __path_handle_reload_fonts};
pub use catalog::{
    handle_effects, handle_fonts, handle_reload_fonts, EffectInfo, FontsResponse, ReloadResponse,
};
pub use render::{__path_handle_render, __path_handle_render_png};
pub use render::{
    handle_render, handle_render_png, RenderRequest, RenderResponse, SettingsResponse,
    TileResponse,
};
