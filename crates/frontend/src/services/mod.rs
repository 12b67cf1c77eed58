//! API services

pub mod auth;
pub mod error_messages;

pub use auth::AuthService;
