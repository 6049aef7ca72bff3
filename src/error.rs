// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Automower client core.
//!
//! Failures are grouped by origin: value validation, transport communication,
//! payload parsing, and usage errors raised before any request is sent
//! (missing capability, mixed work areas, no data for a mower).

use thiserror::Error;

use crate::capabilities::Capability;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the fleet API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding a payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The mower lacks the capability required by a command.
    #[error("This mower does not support this command.")]
    FeatureNotSupported {
        /// The capability the command requires.
        capability: Capability,
    },

    /// A calendar update mixes tasks of different work areas.
    #[error("Only identical work areas are allowed in one command.")]
    WorkAreasMismatch,

    /// No snapshot is held for the requested mower.
    #[error("no data available for mower {0}")]
    NoDataAvailable(String),
}

impl Error {
    /// Returns true if the API rejected the access token (HTTP 401).
    ///
    /// Callers use this to trigger re-authentication.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::AuthenticationFailed))
    }

    /// Returns true if the API refused access to the resource (HTTP 403).
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::Forbidden(_)))
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u64,
    },

    /// A duration is shorter than one whole minute.
    #[error("duration must be at least one minute")]
    DurationTooShort,

    /// An unknown headlight mode string.
    #[error("invalid headlight mode: {0}")]
    InvalidHeadlightMode(String),
}

/// Errors related to transport communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The access token was rejected (HTTP 401).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Access to the resource is forbidden (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Connection to the API failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A success response carried a body that is not JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// No frame arrived within the read timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// The transport cannot open a push stream.
    #[error("push stream unavailable")]
    StreamUnavailable,
}

/// Errors related to decoding API payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the payload.
    #[error("missing field in payload: {0}")]
    MissingField(String),

    /// Unexpected payload format.
    #[error("unexpected payload format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
