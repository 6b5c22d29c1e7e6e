//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::FromRef,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api;
use crate::models::AppConfig;
use crate::services::RenderPipeline;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RenderPipeline>,
}

impl FromRef<AppState> for Arc<RenderPipeline> {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "bookmap API",
        description = "Render books with an embedded settings block onto map-palette tiles",
        version = "0.4.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_render,
        api::handle_render_png,
        api::handle_effects,
        api::handle_fonts,
        api::handle_reload_fonts,
    ),
    components(schemas(
        api::RenderRequest,
        api::RenderResponse,
        api::SettingsResponse,
        api::TileResponse,
        api::EffectInfo,
        api::FontsResponse,
        api::ReloadResponse,
    )),
    tags(
        (name = "Render", description = "Book rendering"),
        (name = "Catalog", description = "Available effects and fonts")
    )
)]
pub struct ApiDoc;

/// Create application state from configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    if config.max_tiles == 0 {
        anyhow::bail!("max_tiles must be at least 1");
    }
    let pipeline = Arc::new(RenderPipeline::new(config));
    Ok(AppState { pipeline })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/render", post(api::handle_render))
        .route("/api/render/png", post(api::handle_render_png))
        .route("/api/effects", get(api::handle_effects))
        .route("/api/fonts", get(api::handle_fonts))
        .route("/api/fonts/reload", post(api::handle_reload_fonts))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
