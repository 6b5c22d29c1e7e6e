use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::rendering::effects;
use crate::services::RenderPipeline;

/// A built-in effect
#[derive(Debug, Serialize, ToSchema)]
pub struct EffectInfo {
    pub identifier: String,
    pub description: String,
}

/// Installed font families
#[derive(Debug, Serialize, ToSchema)]
pub struct FontsResponse {
    /// Family used when a book names none or an unknown one
    pub default: Option<String>,
    pub families: Vec<String>,
}

/// Result of a font reload
#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    /// Font faces found
    pub faces: usize,
}

/// List effects
#[utoipa::path(
    get,
    path = "/api/effects",
    responses(
        (status = 200, description = "Effects usable in `effect:` settings", body = Vec<EffectInfo>),
    ),
    tag = "Catalog"
)]
pub async fn handle_effects() -> Json<Vec<EffectInfo>> {
    Json(
        effects::registry()
            .iter()
            .map(|e| EffectInfo {
                identifier: e.identifier().to_string(),
                description: e.description().to_string(),
            })
            .collect(),
    )
}

/// List fonts
#[utoipa::path(
    get,
    path = "/api/fonts",
    responses(
        (status = 200, description = "Installed font families", body = FontsResponse),
    ),
    tag = "Catalog"
)]
pub async fn handle_fonts(State(pipeline): State<Arc<RenderPipeline>>) -> Json<FontsResponse> {
    let fonts = pipeline.fonts();
    Json(FontsResponse {
        default: fonts.default_family().map(str::to_string),
        families: fonts.families().to_vec(),
    })
}

/// Reload fonts
///
/// Rescans the fonts directory (and system fonts when enabled). Renders
/// already running keep the previous set.
#[utoipa::path(
    post,
    path = "/api/fonts/reload",
    responses(
        (status = 200, description = "Fonts reloaded", body = ReloadResponse),
    ),
    tag = "Catalog"
)]
pub async fn handle_reload_fonts(
    State(pipeline): State<Arc<RenderPipeline>>,
) -> Json<ReloadResponse> {
    let faces = tokio::task::spawn_blocking(move || pipeline.reload_fonts())
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(%e, "Font reload task failed");
            0
        });
    Json(ReloadResponse { faces })
}
