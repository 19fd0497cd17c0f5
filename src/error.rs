use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;
use crate::response::json_response;
use crate::validation::ValidationError;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
const UPSTREAM_FAILED_MESSAGE: &str = "API request failed";

/// Every way a chat request can end without a model answer.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body could not be buffered, usually over the size limit.
    #[error("{}", unreadable_body_message(.0))]
    UnreadableBody(#[source] BytesRejection),

    /// Body is not JSON or does not match `{"message": string}`.
    #[error("Message is required and must be a string")]
    InvalidBody(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("GEMINI_API_KEY not configured")]
    MissingApiKey,

    /// Non-success status, carrying the upstream message when it sent one.
    #[error("{0}")]
    Upstream(String),

    #[error("Invalid API response")]
    InvalidUpstreamResponse,

    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

fn unreadable_body_message(rejection: &BytesRejection) -> &'static str {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        "Request body too large"
    } else {
        "Request body could not be read"
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::UnreadableBody(rejection) => rejection.status(),
            GatewayError::InvalidBody(_) | GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::MissingApiKey
            | GatewayError::Upstream(_)
            | GatewayError::InvalidUpstreamResponse
            | GatewayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::RateLimited => "rate_limited",
            GatewayError::MethodNotAllowed => "method_not_allowed",
            GatewayError::UnreadableBody(_) => "unreadable_body",
            GatewayError::InvalidBody(_) => "invalid_body",
            GatewayError::Validation(_) => "validation",
            GatewayError::MissingApiKey => "configuration",
            GatewayError::Upstream(_) => "upstream_status",
            GatewayError::InvalidUpstreamResponse => "upstream_shape",
            GatewayError::Transport(_) => "upstream_transport",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Message shown to the caller. Transport detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Transport(_) => UPSTREAM_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        json_response(
            self.status(),
            ErrorBody {
                error: self.public_message(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(GatewayError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            GatewayError::Validation(ValidationError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::MissingApiKey.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::InvalidUpstreamResponse.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(GatewayError::RateLimited.is_client_error());
        assert!(!GatewayError::MissingApiKey.is_client_error());
    }

    #[test]
    fn public_messages_match_wire_contract() {
        assert_eq!(GatewayError::RateLimited.public_message(), RATE_LIMIT_MESSAGE);
        assert_eq!(
            GatewayError::Validation(ValidationError::TooLong).public_message(),
            "Message too long (max 2000 characters)"
        );
        assert_eq!(
            GatewayError::Upstream("API key not valid".into()).public_message(),
            "API key not valid"
        );
    }

    #[test]
    fn invalid_body_reads_like_missing_message() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let gateway = GatewayError::InvalidBody(err);
        assert_eq!(gateway.status(), StatusCode::BAD_REQUEST);
        assert_eq!(gateway.public_message(), ValidationError::Missing.to_string());
    }
}
