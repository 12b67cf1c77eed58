//! User-facing error message mapping

use wicket_http::ClientError;

/// Prefer the server-supplied message where one exists
pub fn user_message(error: &ClientError) -> String {
    match error {
        ClientError::AuthenticationFailed(message)
        | ClientError::BadRequest(message)
        | ClientError::Forbidden(message)
        | ClientError::NotFound(message) => message.clone(),
        other => other.to_string(),
    }
}
