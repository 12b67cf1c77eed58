//! Authentication API client methods

use super::{ApiClient, ClientError};
use crate::types::{CurrentUser, LoginRequest, RefreshRequest, TokenPair};

/// Token lifetime requested by a refresh, in minutes
pub const DEFAULT_REFRESH_EXPIRY_MINS: u32 = 30;

impl ApiClient {
    /// Log in with username and password.
    ///
    /// Returns the token pair; the caller is responsible for persisting it.
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenPair, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(request);
        self.execute(req).await
    }

    /// Fetch the currently authenticated user
    pub async fn current_user(&self) -> Result<CurrentUser, ClientError> {
        let req = self.authorized_request(reqwest::Method::GET, "/auth/me")?;
        self.execute(req).await
    }

    /// Exchange the stored refresh token for a fresh pair.
    ///
    /// The returned pair is not persisted here; the refresh decorator (or
    /// another caller) writes it to the store.
    pub async fn refresh(&self, expires_in_mins: u32) -> Result<TokenPair, ClientError> {
        let credentials = self.store().load()?.ok_or_else(|| {
            ClientError::AuthenticationFailed("no stored credentials".to_string())
        })?;

        let req = self
            .request(reqwest::Method::POST, "/auth/refresh")
            .json(&RefreshRequest {
                refresh_token: credentials.refresh_token,
                expires_in_mins,
            });
        self.execute(req).await
    }
}
