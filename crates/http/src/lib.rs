//! Wicket HTTP module: wire types and the authenticated API client
//!
//! The client talks to the DummyJSON demo auth API. [`client::RefreshingClient`]
//! wraps the plain client with the refresh-and-retry behavior.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{ApiClient, RefreshingClient, DEFAULT_BASE_URL};
