//! Session data model

use serde::{Deserialize, Serialize};

/// Access/refresh token pair for an authenticated session.
///
/// Created on login, overwritten wholesale on refresh, never deleted. Owned
/// by the credential store; no other component retains a copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

/// Read-only projection of the logged-in user, fetched from the remote API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub first_name: String,
    pub last_name: String,
}

impl SessionUser {
    /// Display name shown in the view
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
