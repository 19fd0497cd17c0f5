use axum::{
    Json,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

const CORS_HEADERS: [(&str, &str); 2] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-headers",
        "authorization, x-client-info, apikey, content-type",
    ),
];

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("content-type", "application/json"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

fn header_map(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    pairs
        .iter()
        .map(|&(name, value)| {
            (
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .collect()
}

pub fn cors_headers() -> HeaderMap {
    header_map(&CORS_HEADERS)
}

// CORS headers plus the fixed security set
pub fn security_headers() -> HeaderMap {
    let mut headers = cors_headers();
    headers.extend(header_map(&SECURITY_HEADERS));
    headers
}

// JSON body with the full header set, whatever the status
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().extend(security_headers());
    response
}

// Preflight: 200, empty body, CORS headers only
pub fn preflight_response() -> Response {
    let mut response = StatusCode::OK.into_response();
    response.headers_mut().extend(cors_headers());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_response_carries_every_security_header() {
        let response = json_response(StatusCode::BAD_REQUEST, serde_json::json!({"error": "x"}));
        let headers = response.headers();

        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-xss-protection"], "1; mode=block");
        assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
        // Json sets content-type too, extend must not duplicate it
        assert_eq!(headers.get_all("content-type").iter().count(), 1);
    }

    #[test]
    fn preflight_has_cors_only() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-headers"],
            "authorization, x-client-info, apikey, content-type"
        );
        assert!(response.headers().get("x-frame-options").is_none());
    }
}
