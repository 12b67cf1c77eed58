//! Frontend configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// The fixed remote demo API
    pub const API_BASE_URL: &'static str = "https://dummyjson.com";

    /// Local storage key for the access token
    pub const ACCESS_TOKEN_KEY: &'static str = "access_token";

    /// Local storage key for the refresh token
    pub const REFRESH_TOKEN_KEY: &'static str = "refresh_token";
}
