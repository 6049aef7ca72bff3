// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! reqwest-based REST transport.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::error::ProtocolError;
use crate::protocol::{Frame, FrameStream, TokenProvider, Transport};

/// Media type of every request body.
const JSON_API: &str = "application/vnd.api+json";

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the REST transport.
///
/// # Examples
///
/// ```
/// use automower_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("my-application-key")
///     .with_base_url("http://localhost:8080/v1/")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://localhost:8080/v1");
/// assert_eq!(config.api_key(), "my-application-key");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.amc.husqvarna.dev/v1";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given application key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom base URL; a trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the application key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds a transport authenticating with `tokens`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the base URL is not an
    /// http(s) URL, or `ProtocolError::Http` if the client cannot be built.
    pub fn into_transport<P: TokenProvider>(self, tokens: P) -> Result<HttpTransport<P>, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpTransport {
            base_url: self.base_url,
            api_key: self.api_key,
            client,
            tokens,
            stream_source: Mutex::new(None),
        })
    }
}

// ============================================================================
// HttpTransport
// ============================================================================

/// REST transport for the fleet API.
///
/// Push frames are not read by this transport. A websocket reader owned by
/// the caller can hand its frames over with
/// [`with_stream_source`](Self::with_stream_source).
///
/// # Examples
///
/// ```no_run
/// use automower_lib::protocol::{HttpConfig, StaticToken, Transport};
///
/// # async fn example() -> automower_lib::Result<()> {
/// let transport = HttpConfig::new("my-application-key")
///     .into_transport(StaticToken::new("access-token"))?;
/// let mowers = transport.get_json("mowers").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpTransport<P> {
    base_url: String,
    api_key: String,
    client: Client,
    tokens: P,
    stream_source: Mutex<Option<mpsc::Receiver<Frame>>>,
}

impl<P: TokenProvider> HttpTransport<P> {
    /// Attaches the receiver that [`open_stream`](Transport::open_stream)
    /// hands out; it can be taken once.
    #[must_use]
    pub fn with_stream_source(self, frames: mpsc::Receiver<Frame>) -> Self {
        *self.stream_source.lock() = Some(frames);
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ProtocolError> {
        let url = self.url(path);
        let token = self.tokens.access_token().await?;

        tracing::debug!(method = %method, url = %url, "Sending API request");

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header("Authorization-Provider", self.tokens.provider())
            .header("X-Api-Key", &self.api_key)
            .header(CONTENT_TYPE, JSON_API);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ProtocolError::Http)?;
        let status = response.status();
        let text = response.text().await.map_err(ProtocolError::Http)?;

        match status {
            StatusCode::UNAUTHORIZED => return Err(ProtocolError::AuthenticationFailed),
            StatusCode::FORBIDDEN => return Err(ProtocolError::Forbidden(text)),
            status if !status.is_success() => {
                let message = if text.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                } else {
                    text
                };
                return Err(ProtocolError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        tracing::debug!(status = status.as_u16(), bytes = text.len(), "Received API response");

        if text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&text).map_err(|e| ProtocolError::InvalidResponse(e.to_string()))
    }
}

impl<P: TokenProvider> Transport for HttpTransport<P> {
    async fn get_json(&self, path: &str) -> Result<Value, ProtocolError> {
        self.send(reqwest::Method::GET, path, None).await
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value, ProtocolError> {
        self.send(reqwest::Method::POST, path, body).await
    }

    async fn patch_json(&self, path: &str, body: Option<&Value>) -> Result<Value, ProtocolError> {
        self.send(reqwest::Method::PATCH, path, body).await
    }

    async fn open_stream(&self) -> Result<FrameStream, ProtocolError> {
        self.stream_source
            .lock()
            .take()
            .map(FrameStream::new)
            .ok_or(ProtocolError::StreamUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::StaticToken;

    fn transport() -> HttpTransport<StaticToken> {
        HttpConfig::new("key")
            .with_base_url("https://example.invalid/v1/")
            .into_transport(StaticToken::new("token"))
            .unwrap()
    }

    #[test]
    fn url_joins_path() {
        let transport = transport();
        assert_eq!(
            transport.url("mowers/1234/actions"),
            "https://example.invalid/v1/mowers/1234/actions"
        );
        assert_eq!(transport.url("/mowers"), "https://example.invalid/v1/mowers");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = HttpConfig::new("key")
            .with_base_url("ftp://example.invalid")
            .into_transport(StaticToken::new("token"));
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn config_defaults() {
        let config = HttpConfig::new("key");
        assert_eq!(config.base_url(), HttpConfig::DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), HttpConfig::DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn stream_source_is_taken_once() {
        let (_tx, rx) = mpsc::channel(1);
        let transport = transport().with_stream_source(rx);

        assert!(transport.open_stream().await.is_ok());
        assert!(matches!(
            transport.open_stream().await,
            Err(ProtocolError::StreamUnavailable)
        ));
    }

    #[tokio::test]
    async fn no_stream_without_source() {
        assert!(matches!(
            transport().open_stream().await,
            Err(ProtocolError::StreamUnavailable)
        ));
    }
}
