//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use bookmap::models::AppConfig;
use bookmap::rendering::FontLibrary;
use bookmap::server::{build_router, AppState};
use bookmap::services::RenderPipeline;

/// Test application with router and direct access to the pipeline
pub struct TestApp {
    router: axum::Router,
    pub pipeline: Arc<RenderPipeline>,
}

impl TestApp {
    /// Create a test app without any fonts, so only text-free books render
    pub fn new() -> Self {
        Self::with_config(isolated_config())
    }

    /// Create a test app whose only font is the bundled `Tuffy` face
    pub fn with_test_fonts() -> Self {
        Self::with_config(AppConfig {
            fonts_dir: test_fonts_dir(),
            ..isolated_config()
        })
    }

    /// Create a test app from a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let fonts = FontLibrary::load(Some(&config.fonts_dir), config.load_system_fonts);
        let pipeline = Arc::new(RenderPipeline::with_fonts(config, fonts));

        // Build router using shared server module (same as production)
        let router = build_router(AppState {
            pipeline: pipeline.clone(),
        });

        Self { router, pipeline }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Render a book through `/api/render`
    pub async fn render(&self, pages: &[&str]) -> TestResponse {
        let body = serde_json::json!({ "pages": pages, "seed": 7 });
        self.post_json("/api/render", &body.to_string()).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory holding the bundled test font
pub fn test_fonts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fonts")
}

/// Config that reads nothing from the working directory
fn isolated_config() -> AppConfig {
    AppConfig {
        textures_dir: PathBuf::from("/nonexistent/bookmap/textures"),
        fonts_dir: PathBuf::from("/nonexistent/bookmap/fonts"),
        load_system_fonts: false,
        ..AppConfig::default()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
