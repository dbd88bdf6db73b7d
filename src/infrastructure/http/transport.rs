//! Login transport trait and error types.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{LoginRequest, LoginResponse};

/// Errors that can occur while delivering the login POST.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid login URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Delivers the single login POST of a submit cycle.
///
/// Implementations return a [`LoginResponse`] for every answer the server
/// gives, including 4xx/5xx; only transport-level problems (connection
/// refused, timeout, malformed URL) surface as errors.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpTransport`] - reqwest-backed client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginTransport: Send + Sync {
    /// POSTs the request body to the form's action URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was obtained. There
    /// is no retry; the caller's failure policy is fire-once.
    async fn post_login(&self, action: &str, request: &LoginRequest)
    -> TransportResult<LoginResponse>;
}
