//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and reading the
//! session token left by the login screen.

/// Port of the back-office API when no override is configured.
pub const API_PORT: u16 = 3000;

/// localStorage key overriding the API root, e.g. `https://api.example.com/api`.
pub const API_BASE_OVERRIDE_KEY: &str = "admin_api_base";

/// localStorage key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "auth_access_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn storage_item(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server. A value stored under
/// [`API_BASE_OVERRIDE_KEY`] wins.
///
/// # Returns
/// - API root like "http://localhost:3000/api"
/// - "/api" if window is not available
pub fn api_base() -> String {
    if let Some(base) = storage_item(API_BASE_OVERRIDE_KEY) {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return "/api".to_string(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}/api", protocol, hostname, API_PORT)
}

/// Build a full API URL from a resource path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/admin/diamonds/filters");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// `Authorization` header value when a session token is stored.
pub fn auth_header() -> Option<String> {
    storage_item(ACCESS_TOKEN_KEY).map(|token| format!("Bearer {}", token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_with_single_slash() {
        assert_eq!(
            join_url("http://h:3000/api", "/admin/metals"),
            "http://h:3000/api/admin/metals"
        );
        assert_eq!(
            join_url("http://h:3000/api", "contacts/admin"),
            "http://h:3000/api/contacts/admin"
        );
    }
}
