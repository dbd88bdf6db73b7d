//! reqwest-backed login transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::transport::{LoginTransport, TransportError, TransportResult};
use crate::domain::entities::{LoginRequest, LoginResponse};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP transport with an explicit request timeout.
///
/// The timeout bounds the whole request, so a stalled server can never
/// leave the form busy indefinitely.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Builds the client with the crate user agent and the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl LoginTransport for HttpTransport {
    async fn post_login(
        &self,
        action: &str,
        request: &LoginRequest,
    ) -> TransportResult<LoginResponse> {
        let url = Url::parse(action).map_err(|e| TransportError::InvalidUrl {
            url: action.to_string(),
            reason: e.to_string(),
        })?;

        debug!(%url, "sending login request");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        debug!(status, "login response received");

        Ok(LoginResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn rejects_malformed_action_url() {
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let request = LoginRequest::new(BTreeMap::new(), String::new());

        let result = transport.post_login("not a url", &request).await;

        assert!(matches!(result, Err(TransportError::InvalidUrl { .. })));
    }
}
