use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
    Json as JsonExtractor,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{Document, RenderSettings};
use crate::services::{EncodedTile, RenderOptions, RenderOutput, RenderPipeline};

/// Request body for rendering a book
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenderRequest {
    /// Book pages in order; plain text or JSON text components
    pub pages: Vec<String>,
    /// Seed for random backgrounds, for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,
    /// Include every map tile as a base64 PNG
    #[serde(default)]
    pub include_tiles: bool,
}

/// Settings the book was rendered with
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub font: String,
    pub size: u32,
    /// Text color as `#RRGGBB`
    pub color: String,
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
    pub dither: bool,
    pub antialias: bool,
}

impl From<&RenderSettings> for SettingsResponse {
    fn from(s: &RenderSettings) -> Self {
        Self {
            font: s.font.clone(),
            size: s.size,
            color: format!("#{:02X}{:02X}{:02X}", s.color.r, s.color.g, s.color.b),
            width: s.width,
            height: s.height,
            left: s.left,
            top: s.top,
            dither: s.dither,
            antialias: s.anti_alias,
        }
    }
}

/// One 128x128 map tile
#[derive(Debug, Serialize, ToSchema)]
pub struct TileResponse {
    /// Column in the tile grid
    pub x: u32,
    /// Row in the tile grid
    pub y: u32,
    pub columns: u32,
    pub rows: u32,
    /// Indexed PNG, base64 encoded
    pub png: String,
}

impl From<&EncodedTile> for TileResponse {
    fn from(tile: &EncodedTile) -> Self {
        Self {
            x: tile.x,
            y: tile.y,
            columns: tile.columns,
            rows: tile.rows,
            png: base64::engine::general_purpose::STANDARD.encode(&tile.png),
        }
    }
}

/// Response from a render
#[derive(Debug, Serialize, ToSchema)]
pub struct RenderResponse {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    pub settings: SettingsResponse,
    /// Human-readable settings summary
    pub summary: Vec<String>,
    /// Effects in paint order
    pub procedure: Vec<String>,
    /// Problems that did not stop the render
    pub diagnostics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tiles: Vec<TileResponse>,
}

impl From<&RenderOutput> for RenderResponse {
    fn from(out: &RenderOutput) -> Self {
        Self {
            width: out.settings.width,
            height: out.settings.height,
            settings: SettingsResponse::from(&out.settings),
            summary: out.summary.clone(),
            procedure: out.procedure.clone(),
            diagnostics: out.diagnostics.clone(),
            tiles: out.tiles.iter().map(TileResponse::from).collect(),
        }
    }
}

fn into_job(request: RenderRequest) -> Result<(Document, RenderOptions), ApiError> {
    if request.pages.is_empty() {
        return Err(ApiError::BadRequest("pages must not be empty".to_string()));
    }
    let options = RenderOptions {
        seed: request.seed,
        tiles: request.include_tiles,
    };
    Ok((Document::new(request.pages), options))
}

/// Render a book
///
/// Parses the settings block, composites the effects and the book text,
/// and quantizes the result to the map palette.
#[utoipa::path(
    post,
    path = "/api/render",
    request_body = RenderRequest,
    responses(
        (status = 200, description = "Book rendered", body = RenderResponse),
        (status = 400, description = "Malformed request"),
        (status = 422, description = "Book could not be rendered"),
    ),
    tag = "Render"
)]
pub async fn handle_render(
    State(pipeline): State<Arc<RenderPipeline>>,
    JsonExtractor(request): JsonExtractor<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let (document, options) = into_job(request)?;
    tracing::info!(
        pages = document.pages().len(),
        tiles = options.tiles,
        "Render request received"
    );

    let output = pipeline.render_async(document, options).await?;
    Ok(Json(RenderResponse::from(&output)))
}

/// Render a book to a single PNG
///
/// Same as `/api/render` but returns the whole quantized image as an
/// indexed PNG.
#[utoipa::path(
    post,
    path = "/api/render/png",
    request_body = RenderRequest,
    responses(
        (status = 200, description = "Indexed PNG image", content_type = "image/png"),
        (status = 400, description = "Malformed request"),
        (status = 422, description = "Book could not be rendered"),
    ),
    tag = "Render"
)]
pub async fn handle_render_png(
    State(pipeline): State<Arc<RenderPipeline>>,
    JsonExtractor(request): JsonExtractor<RenderRequest>,
) -> Result<Response, ApiError> {
    let (document, mut options) = into_job(request)?;
    options.tiles = false;

    let output = pipeline.render_async(document, options).await?;
    let png = output.to_png()?;
    tracing::debug!(bytes = png.len(), "Encoded book image");

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
