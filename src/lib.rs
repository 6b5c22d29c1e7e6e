//! Bookmap
//!
//! Renders book text with an embedded settings block onto map-palette
//! tiles. This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
