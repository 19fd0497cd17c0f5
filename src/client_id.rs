use axum::http::HeaderMap;

pub const UNKNOWN_CLIENT: &str = "unknown";

// Derive the rate limit key for a request.
//
// Order: x-forwarded-for, x-real-ip, "unknown". Headers are trusted as-is,
// so the gateway must sit behind a reverse proxy that overwrites them.
pub fn client_identity(headers: &HeaderMap) -> String {
    ["x-forwarded-for", "x-real-ip"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
