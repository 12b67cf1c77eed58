//! Credential storage contract and the in-memory implementation

use crate::error::{CoreError, CoreResult};
use crate::session::Credentials;
use std::sync::RwLock;

/// Key/value storage for the session's token pair.
///
/// Single-writer contract: the login path and the refresh path write whole
/// [`Credentials`] pairs; readers load before every authenticated request.
pub trait CredentialStore: Send + Sync {
    /// Load the stored pair, if any
    fn load(&self) -> CoreResult<Option<Credentials>>;

    /// Overwrite the stored pair wholesale
    fn save(&self, credentials: &Credentials) -> CoreResult<()>;
}

/// In-memory credential store used by native code and tests
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> CoreResult<Option<Credentials>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| CoreError::store_error("credential store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, credentials: &Credentials) -> CoreResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| CoreError::store_error("credential store lock poisoned"))?;
        *guard = Some(credentials.clone());
        Ok(())
    }
}

// Mock implementation for testing
#[cfg(any(test, feature = "tests"))]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub CredentialStore {}

        impl CredentialStore for CredentialStore {
            fn load(&self) -> CoreResult<Option<Credentials>>;
            fn save(&self, credentials: &Credentials) -> CoreResult<()>;
        }
    }
}
