use crate::{Error, ErrorContext, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Shared HTTP transport: one pooled `reqwest::Client` with a fixed timeout.
///
/// The transport only knows how to send a request and gate it on the status
/// code. Bodies are returned as text so each client decides how to decode.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `POST url` with a bearer token and a JSON body.
    pub fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        body: &B,
    ) -> RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(body)
    }

    /// `GET url` with query parameters appended.
    pub fn get_with_query(&self, url: &str, params: &[(&str, &str)]) -> RequestBuilder {
        self.client.get(url).query(params)
    }

    /// Sends the request and returns the body of a `200 OK` response.
    ///
    /// Any other status is an `ApiService` error; the body of such a response
    /// is never read.
    pub async fn execute(&self, request: RequestBuilder, source: &'static str) -> Result<String> {
        tracing::debug!(source, timeout_ms = self.timeout.as_millis() as u64, "sending request");
        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(source, status = status.as_u16(), "service answered with non-OK status");
            return Err(Error::api_service(
                Some(status.as_u16()),
                format!("unexpected status {}", status),
                ErrorContext::new().with_source(source),
            ));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Transport(TransportError::Timeout(self.timeout))
        } else {
            Error::Transport(TransportError::Http(e))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_keeps_configured_timeout() {
        let transport = HttpTransport::new(Duration::from_millis(1500)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_timeout_error_reports_duration() {
        let err = Error::Transport(TransportError::Timeout(Duration::from_millis(300)));
        assert_eq!(
            err.to_string(),
            "Network transport error: request timed out after 300ms"
        );
    }
}
