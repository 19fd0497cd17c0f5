//! Gatekeeper between public chat clients and the Gemini API.
//!
//! A request is identified by proxy headers, counted against a fixed
//! window, validated, logged and only then forwarded upstream. Every chat
//! answer, success or error, is `{"response"}` or `{"error"}` JSON with the
//! same CORS and security headers.

pub mod client_id;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod response;
pub mod state;
pub mod upstream;
pub mod validation;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{chat_handler, health_handler, metrics_handler};
use crate::state::AppState;

pub use crate::error::GatewayError;
pub use crate::rate_limit::RateLimiter;
pub use crate::upstream::UpstreamClient;

// chat is served on every path, /health and /metrics only claim GET
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(chat_handler))
        .route("/metrics", get(metrics_handler).fallback(chat_handler))
        .fallback(chat_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
