//! Client configuration and initialization

use crate::config::AuthConfig;
use crate::storage::BrowserCredentialStore;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use wicket_http::{ApiClient, ClientError, RefreshingClient};

/// Global client instances
static API_CLIENT: Lazy<Mutex<Option<ApiClient>>> = Lazy::new(|| Mutex::new(None));
static REFRESHING_CLIENT: Lazy<Mutex<Option<RefreshingClient>>> = Lazy::new(|| Mutex::new(None));

/// Get the shared API client, building it on first use
pub fn api_client() -> Result<ApiClient, ClientError> {
    let mut client_lock = API_CLIENT.lock().expect("Failed to acquire client lock");

    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }

    let client = ApiClient::builder()
        .base_url(AuthConfig::API_BASE_URL)
        .store(Arc::new(BrowserCredentialStore))
        .build()?;
    *client_lock = Some(client.clone());
    Ok(client)
}

/// Activate the refresh interceptor.
///
/// The decorator is constructed once; calling this again is a no-op, so a
/// second activation cannot add a second retry per failure.
pub fn activate_interceptor() -> Result<(), ClientError> {
    let mut client_lock = REFRESHING_CLIENT
        .lock()
        .expect("Failed to acquire interceptor lock");

    if client_lock.is_none() {
        *client_lock = Some(RefreshingClient::new(api_client()?));
        tracing::debug!("response interceptor activated");
    }
    Ok(())
}

/// The refreshing client, if the interceptor has been activated
pub fn refreshing_client() -> Option<RefreshingClient> {
    REFRESHING_CLIENT
        .lock()
        .expect("Failed to acquire interceptor lock")
        .clone()
}
