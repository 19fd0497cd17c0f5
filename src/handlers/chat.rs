use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::client_id::client_identity;
use crate::error::GatewayError;
use crate::logger;
use crate::models::{ChatRequest, ChatResponse};
use crate::response::{json_response, preflight_response};
use crate::state::AppState;
use crate::validation::{scan_suspicious, validate};

// Single chat route: OPTIONS preflight, POST {"message"} -> {"response"} | {"error"}
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return preflight_response();
    }

    logger::request_received();
    let client = client_identity(&headers);

    match handle_chat(&state, &client, &method, &headers, body).await {
        Ok(answer) => {
            logger::answered(&client, &answer.response);
            json_response(StatusCode::OK, answer)
        }
        Err(err) => {
            logger::rejected(&client, &err);
            err.into_response()
        }
    }
}

async fn handle_chat(
    state: &AppState,
    client: &str,
    method: &Method,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<ChatResponse, GatewayError> {
    if *method != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }

    // no await between check and increment
    let allowed = state.rate_limiter.allow(client);
    logger::rate_windows(state.rate_limiter.len());
    if !allowed {
        return Err(GatewayError::RateLimited);
    }

    // oversized or unreadable bodies still get the JSON error shape
    let body = body.map_err(GatewayError::UnreadableBody)?;
    let request = ChatRequest::from_json(&body).map_err(GatewayError::InvalidBody)?;
    let message = validate(request.message.as_deref())?;

    if let Some(pattern) = scan_suspicious(message) {
        logger::suspicious(client, pattern, message);
    }
    logger::accepted(client, method, headers, message);

    let response = state.upstream.complete(message).await?;
    Ok(ChatResponse { response })
}
