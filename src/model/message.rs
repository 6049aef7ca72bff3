// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mower message log.
//!
//! Besides its current error, a mower keeps a log of diagnostic messages.
//! The log is fetched per mower:
//!
//! ```json
//! {"data": {"type": "messages", "id": "...", "attributes": {"messages": [...]}}}
//! ```
//!
//! and single new entries arrive as `message-event-v2` push events.

use serde::Deserialize;
use serde_json::Value;

use super::de;
use super::error_codes;
use crate::error::ParseError;
use crate::types::MowerLocalTime;

/// Severity of a logged message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Info,
    Debug,
    /// Software event.
    Sw,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One entry of a mower's message log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    /// When the message was logged, on the mower's clock.
    #[serde(deserialize_with = "de::local_timestamp")]
    pub time: Option<MowerLocalTime>,
    /// Error code, see [`error_text`](super::error_text).
    pub code: u32,
    pub severity: Severity,
    pub latitude: f64,
    pub longitude: f64,
}

impl Message {
    /// Decodes one message object.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if a field has the wrong type.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        Ok(Self::deserialize(value)?)
    }

    /// Returns the snake_case key of the message code.
    ///
    /// ```
    /// use automower_lib::model::Message;
    ///
    /// let message = Message { code: 2, ..Message::default() };
    /// assert_eq!(message.error_key().as_deref(), Some("no_loop_signal"));
    /// ```
    #[must_use]
    pub fn error_key(&self) -> Option<String> {
        error_codes::error_key(self.code)
    }
}

/// Decodes the message log document of one mower, newest first as sent.
///
/// A document whose `attributes` are null holds no messages.
///
/// # Errors
///
/// Returns `ParseError::MissingField` without a `data` object, or a decoding
/// error if an entry is malformed.
pub fn decode_messages(document: &Value) -> Result<Vec<Message>, ParseError> {
    let data = document
        .get("data")
        .filter(|data| data.is_object())
        .ok_or_else(|| ParseError::MissingField("data".to_string()))?;

    match data.get("attributes").and_then(|a| a.get("messages")) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries.iter().map(Message::from_value).collect(),
        Some(_) => Err(ParseError::UnexpectedFormat(
            "data.attributes.messages must be an array".to_string(),
        )),
    }
}
