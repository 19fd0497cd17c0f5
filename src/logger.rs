//! Request observability.
//!
//! Every function here only emits logs and metrics. None of them return
//! anything the handler branches on.

use axum::http::{HeaderMap, Method, header};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::GatewayError;
use crate::metrics::{RATE_WINDOWS, REJECTED_TOTAL, REQUEST_TOTAL, SUSPICIOUS_TOTAL};
use crate::validation::SuspiciousPattern;

const PREVIEW_CHARS: usize = 100;

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn request_received() {
    REQUEST_TOTAL.inc();
}

pub fn rate_windows(tracked: usize) {
    RATE_WINDOWS.set(tracked as f64);
}

pub fn accepted(client: &str, method: &Method, headers: &HeaderMap, message: &str) {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info!(
        client,
        method = %method,
        message_len = message.encode_utf16().count(),
        user_agent,
        "chat request accepted"
    );
}

pub fn suspicious(client: &str, pattern: SuspiciousPattern, message: &str) {
    SUSPICIOUS_TOTAL.with_label_values(&[pattern.as_str()]).inc();

    let preview: String = message.chars().take(PREVIEW_CHARS).collect();
    tracing::warn!(
        client,
        pattern = pattern.as_str(),
        preview = %preview,
        "suspicious content detected"
    );
}

pub fn answered(client: &str, response: &str) {
    tracing::info!(
        client,
        response_len = response.chars().count(),
        "successful response"
    );
}

pub fn rejected(client: &str, err: &GatewayError) {
    REJECTED_TOTAL.with_label_values(&[err.kind()]).inc();

    match err {
        GatewayError::RateLimited => {
            tracing::warn!(client, "rate limit exceeded");
        }
        err if err.is_client_error() => {
            tracing::info!(client, kind = err.kind(), error = %err, "request rejected");
        }
        GatewayError::Transport(source) => {
            tracing::error!(
                client,
                kind = err.kind(),
                timeout = source.is_timeout(),
                error = %source,
                "upstream call failed"
            );
        }
        err => {
            tracing::error!(client, kind = err.kind(), error = %err, "request failed");
        }
    }
}
