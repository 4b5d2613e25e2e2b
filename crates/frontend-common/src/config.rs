//! Frontend configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Durable storage key for the access token. Read at startup to decide
    /// authenticated-vs-anonymous routing.
    pub const ACCESS_TOKEN_KEY: &'static str = "accessToken";

    /// Path of the unauthenticated entry point.
    pub const LOGIN_PATH: &'static str = "/login";
}

/// Resolve the API base URL from the current window origin.
pub fn api_base_url() -> String {
    if let Some(window) = web_sys::window() {
        if let Ok(origin) = window.location().origin() {
            return format!("{origin}/api/v1");
        }
    }

    // Default to relative URLs
    "/api/v1".to_string()
}
