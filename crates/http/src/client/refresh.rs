//! Refresh-and-retry decorator around [`ApiClient`]
//!
//! The decorated `execute` inspects every response; a 401 triggers one token
//! refresh and one resubmission of the original request. Construct it once
//! when the user activates the interceptor and route authenticated calls
//! through it from then on.

use super::auth::DEFAULT_REFRESH_EXPIRY_MINS;
use super::{ApiClient, ClientError};
use crate::types::{CurrentUser, TokenPair};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use wicket_core::Credentials;

/// Wrapper around [`ApiClient`] that refreshes an expired access token and
/// replays the failed request exactly once
#[derive(Clone)]
pub struct RefreshingClient {
    inner: ApiClient,
}

impl RefreshingClient {
    /// Create a new refreshing client
    pub fn new(inner: ApiClient) -> Self {
        Self { inner }
    }

    /// Get a reference to the inner client
    pub fn inner(&self) -> &ApiClient {
        &self.inner
    }

    /// Execute a request, refreshing the session and retrying once on a 401.
    ///
    /// The retried request's result propagates as-is: a second consecutive
    /// 401 is not retried again, so repeated rejections cannot loop.
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let retry = request.try_clone();

        match self.inner.execute(request).await {
            Err(error) if error.is_auth_expired() => {
                let Some(pair) = self.try_refresh().await else {
                    return Err(error);
                };

                // All future authorized requests read the new pair from the
                // store; the in-flight clone gets its header rewritten below.
                self.inner.store().save(&Credentials::from(pair.clone()))?;

                let Some(retry) = retry else {
                    // Unclonable body; the original failure stands
                    return Err(error);
                };
                let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", pair.access_token))
                else {
                    return Err(error);
                };
                let mut retry = match retry.build() {
                    Ok(request) => request,
                    Err(_) => return Err(error),
                };
                retry.headers_mut().insert(AUTHORIZATION, bearer);

                self.inner.execute_request(retry).await
            }
            result => result,
        }
    }

    /// Fetch the currently authenticated user through the retry path
    pub async fn current_user(&self) -> Result<CurrentUser, ClientError> {
        let request = self
            .inner
            .authorized_request(reqwest::Method::GET, "/auth/me")?;
        self.execute(request).await
    }

    /// Refresh the token pair, swallowing failures.
    ///
    /// A failed refresh only suppresses the retry; the original 401 is what
    /// the caller sees.
    async fn try_refresh(&self) -> Option<TokenPair> {
        match self.inner.refresh(DEFAULT_REFRESH_EXPIRY_MINS).await {
            Ok(pair) => Some(pair),
            Err(error) => {
                tracing::warn!(%error, "token refresh failed");
                None
            }
        }
    }
}
