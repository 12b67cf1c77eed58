//! Authentication API service

use crate::client::{api_client, refreshing_client};
use crate::services::error_messages::user_message;
use wicket_core::{Credentials, ErrorContext, SessionUser};
use wicket_http::types::LoginRequest;

/// Authentication API service
#[derive(Clone)]
pub struct AuthService;

impl AuthService {
    /// Create a new auth API service
    pub fn new() -> Self {
        Self
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthService {
    /// Log in and persist the returned token pair
    pub async fn login(
        &self,
        username: String,
        password: String,
        expires_in_mins: u32,
    ) -> Result<(), String> {
        let client = api_client().with_context_str("Failed to get client")?;

        let pair = client
            .login(&LoginRequest {
                username,
                password,
                expires_in_mins,
            })
            .await
            .map_err(|e| user_message(&e))?;

        client
            .store()
            .save(&Credentials::from(pair))
            .with_context_str("Failed to persist session")
    }

    /// Fetch the logged-in user, through the interceptor when it is active
    pub async fn current_user(&self) -> Result<SessionUser, String> {
        let user = match refreshing_client() {
            Some(client) => client.current_user().await,
            None => {
                let client = api_client().with_context_str("Failed to get client")?;
                client.current_user().await
            }
        }
        .map_err(|e| user_message(&e))?;

        Ok(user.into())
    }
}
