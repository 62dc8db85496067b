//! Axum HTTP API server for sign recognition.
//!
//! This crate provides:
//! - Streaming recognition over WebSocket
//! - Single-vector prediction and label listing over REST
//! - Text-to-sign GIF lookup
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
pub mod text_to_sign;
pub mod ws;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use service::RecognitionService;
pub use state::AppState;
