// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport abstraction for the fleet API.
//!
//! The session talks to the API only through the [`Transport`] trait: three
//! JSON request methods and a push [`FrameStream`]. Access tokens come from a
//! [`TokenProvider`]; acquiring and refreshing them is left to the caller.
//!
//! # Transports
//!
//! - [`HttpTransport`]: reqwest-based REST transport (feature `http`)
//!
//! Tests and alternative stacks implement [`Transport`] directly.

#[cfg(feature = "http")]
mod http;
mod stream;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
pub use stream::{Frame, FrameStream};

use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::error::ProtocolError;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        })
    }
}

/// A request against the fleet API, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Path below the base URL, without leading slash.
    pub path: String,
    /// JSON body.
    pub body: Option<Value>,
}

impl Request {
    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
        }
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Authenticated access to the fleet API.
///
/// Every method returns `ProtocolError::AuthenticationFailed` on HTTP 401,
/// `ProtocolError::Forbidden` on 403 and `ProtocolError::Api` on any other
/// non-success status.
pub trait Transport: Send + Sync + 'static {
    /// Sends a GET request and decodes the JSON response.
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, ProtocolError>> + Send;

    /// Sends a POST request and decodes the JSON response.
    fn post_json(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> impl Future<Output = Result<Value, ProtocolError>> + Send;

    /// Sends a PATCH request and decodes the JSON response.
    fn patch_json(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> impl Future<Output = Result<Value, ProtocolError>> + Send;

    /// Opens the push channel.
    ///
    /// Transports without push support keep the default, which reports
    /// `ProtocolError::StreamUnavailable`.
    fn open_stream(&self) -> impl Future<Output = Result<FrameStream, ProtocolError>> + Send {
        async { Err(ProtocolError::StreamUnavailable) }
    }

    /// Dispatches `request` to the matching method.
    fn execute(&self, request: &Request) -> impl Future<Output = Result<Value, ProtocolError>> + Send {
        async move {
            match request.method {
                Method::Get => self.get_json(&request.path).await,
                Method::Post => self.post_json(&request.path, request.body.as_ref()).await,
                Method::Patch => self.patch_json(&request.path, request.body.as_ref()).await,
            }
        }
    }
}

/// Source of OAuth access tokens.
pub trait TokenProvider: Send + Sync + 'static {
    /// Returns a currently valid access token.
    fn access_token(&self) -> impl Future<Output = Result<String, ProtocolError>> + Send;

    /// Returns the value of the `Authorization-Provider` header.
    fn provider(&self) -> &str {
        "husqvarna"
    }
}

/// A fixed access token.
///
/// # Examples
///
/// ```
/// use automower_lib::protocol::StaticToken;
///
/// let token = StaticToken::new("eyJ0eXAi...");
/// assert_eq!(token.token(), "eyJ0eXAi...");
/// ```
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Wraps an access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, ProtocolError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_constructors() {
        let post = Request::post("mowers/1/actions", Some(json!({ "data": {} })));
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.path, "mowers/1/actions");

        let patch = Request::patch("mowers/1/workAreas/2", json!({}));
        assert_eq!(patch.method, Method::Patch);
        assert!(patch.body.is_some());
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[tokio::test]
    async fn static_token_is_returned() {
        let token = StaticToken::new("abc");
        assert_eq!(token.access_token().await.unwrap(), "abc");
        assert_eq!(token.provider(), "husqvarna");
    }
}
