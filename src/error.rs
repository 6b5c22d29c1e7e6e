use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::rendering::effects::EffectError;
use crate::services::settings_parser::SettingsError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Book is empty!")]
    EmptyDocument,

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to generate map! Check your settings! ({effect}: {source})")]
    Composition {
        effect: String,
        #[source]
        source: EffectError,
    },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Quantize error: {0}")]
    Quantize(#[from] map_dither::QuantizeError),

    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

impl RenderError {
    /// Problems caused by the book itself rather than the server.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RenderError::EmptyDocument
                | RenderError::Settings(_)
                | RenderError::Composition { .. }
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Render(e) if e.is_user_error() => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
