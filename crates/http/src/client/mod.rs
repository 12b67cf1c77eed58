//! Wicket API client

pub mod auth;
pub mod error;
pub mod refresh;

use error::ClientError;
use reqwest::{header, Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use wicket_core::CredentialStore;

pub use refresh::RefreshingClient;

/// The fixed remote demo API
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// DummyJSON API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create a new client against the default base URL
    pub fn new(store: Arc<dyn CredentialStore>) -> Result<Self, ClientError> {
        Self::builder().store(store).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential store backing authenticated requests
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Create a request builder carrying the stored bearer token.
    ///
    /// The token is read from the store at build time, so a refresh that
    /// lands between two calls is picked up by the second one.
    pub fn authorized_request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let credentials = self.store.load()?.ok_or_else(|| {
            ClientError::AuthenticationFailed("no stored credentials".to_string())
        })?;

        Ok(self.request(method, path).header(
            header::AUTHORIZATION,
            format!("Bearer {}", credentials.access_token),
        ))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        Self::decode(request.send().await?).await
    }

    /// Execute an already-built request. The refresh decorator uses this to
    /// resubmit a cloned request after rewriting its authorization header.
    pub(crate) async fn execute_request<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, ClientError> {
        Self::decode(self.client.execute(request).await?).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    store: Option<Arc<dyn CredentialStore>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Override the base URL (tests point this at a mock server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credential store
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let store = self
            .store
            .ok_or_else(|| ClientError::Configuration("credential store is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout; // Timeouts not supported on WASM

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("wicket-client/0.1.0");
        }

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            store,
        })
    }
}
