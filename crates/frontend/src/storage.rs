//! Browser-backed credential store

use crate::config::AuthConfig;
use gloo::storage::{LocalStorage, Storage};
use wicket_core::{CoreError, CoreResult, CredentialStore, Credentials};

/// Credential store over the browser's localStorage.
///
/// A pair only counts as present when both keys are; a half-written pair
/// reads back as no credentials.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCredentialStore;

impl CredentialStore for BrowserCredentialStore {
    fn load(&self) -> CoreResult<Option<Credentials>> {
        let access_token: Option<String> = LocalStorage::get(AuthConfig::ACCESS_TOKEN_KEY).ok();
        let refresh_token: Option<String> = LocalStorage::get(AuthConfig::REFRESH_TOKEN_KEY).ok();

        match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => Ok(Some(Credentials {
                access_token,
                refresh_token,
            })),
            _ => Ok(None),
        }
    }

    fn save(&self, credentials: &Credentials) -> CoreResult<()> {
        LocalStorage::set(AuthConfig::ACCESS_TOKEN_KEY, &credentials.access_token)
            .map_err(|err| CoreError::store_error(err.to_string()))?;
        LocalStorage::set(AuthConfig::REFRESH_TOKEN_KEY, &credentials.refresh_token)
            .map_err(|err| CoreError::store_error(err.to_string()))?;
        Ok(())
    }
}
