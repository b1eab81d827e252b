//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use crate::shared::config::config;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from configuration when set; otherwise constructs the
/// base from the current window location and the configured API port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://admin.example.com"
/// - Empty string if window is not available (relative requests)
pub fn api_base() -> String {
    let api = &config().api;
    if !api.base_url.is_empty() {
        return api.base_url.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Path of the QR status endpoint for `qr_token`, with the token escaped.
pub fn qr_check_path(qr_token: &str) -> String {
    format!("/api/auth/qrcode/check/{}", urlencoding::encode(qr_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_check_path_escapes_token() {
        assert_eq!(qr_check_path("abc"), "/api/auth/qrcode/check/abc");
        assert_eq!(qr_check_path("a/b c"), "/api/auth/qrcode/check/a%2Fb%20c");
    }
}
