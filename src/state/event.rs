// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push event kinds.
//!
//! The push channel delivers partial updates as
//! `{"id": "<mower>", "type": "<kind>", "attributes": {...}}`. Each structured
//! kind carries a narrow payload and updates exactly the fields listed below;
//! everything else falls back to a structural merge of the whole payload.
//!
//! | Wire type | Payload | Updates |
//! |-----------|---------|---------|
//! | `battery-event-v2` | `{"battery": {...}}` | `battery` (merged) |
//! | `calendar-event-v2` | `{"calendar": {"tasks": [...]}}` | `calendar.tasks` (replaced) |
//! | `cuttingHeight-event-v2` | `{"cuttingHeight": {"height": n}}` | `settings.cuttingHeight` |
//! | `headlights-event-v2` | `{"headLight": {"mode": m}}` | `settings.headlight.mode` |
//! | `message-event-v2` | `{"message": {...}}` | message log (prepended) |
//! | `mower-event-v2` | `{"mower": {...}}` | `mower` (merged) |
//! | `planner-event-v2` | `{"planner": {...}}` | `planner` (merged) |
//! | `position-event-v2` | `{"position": {...}}` | `positions` (prepended) |
//! | `settings-event` | settings tree | whole tree (merged) |

use std::fmt;

use serde_json::Value;

use crate::error::ParseError;

/// Legacy event types applied through the structural merge.
const LEGACY_GENERIC_EVENTS: [&str; 2] = ["status-event", "positions-event"];

/// The kind of a push event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Battery,
    Calendar,
    CuttingHeight,
    Headlights,
    /// New entry of the message log.
    Message,
    Mower,
    Planner,
    Position,
    /// Legacy settings event; its payload is a settings tree.
    Settings,
    /// Any other event type, applied by structural merge.
    Generic(String),
}

impl EventKind {
    /// Maps a wire type name to a kind.
    #[must_use]
    pub fn from_wire(name: &str) -> Self {
        match name {
            "battery-event-v2" => Self::Battery,
            "calendar-event-v2" => Self::Calendar,
            "cuttingHeight-event-v2" => Self::CuttingHeight,
            "headlights-event-v2" => Self::Headlights,
            "message-event-v2" => Self::Message,
            "mower-event-v2" => Self::Mower,
            "planner-event-v2" => Self::Planner,
            "position-event-v2" => Self::Position,
            "settings-event" => Self::Settings,
            other => Self::Generic(other.to_string()),
        }
    }

    /// Returns the wire type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Battery => "battery-event-v2",
            Self::Calendar => "calendar-event-v2",
            Self::CuttingHeight => "cuttingHeight-event-v2",
            Self::Headlights => "headlights-event-v2",
            Self::Message => "message-event-v2",
            Self::Mower => "mower-event-v2",
            Self::Planner => "planner-event-v2",
            Self::Position => "position-event-v2",
            Self::Settings => "settings-event",
            Self::Generic(name) => name,
        }
    }

    /// Returns whether the session applies events of this kind.
    ///
    /// Structured kinds and the legacy status and positions events are
    /// applied; other generic kinds are discarded.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Generic(name) => LEGACY_GENERIC_EVENTS.contains(&name.as_str()),
            _ => true,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial update addressed to one mower.
#[derive(Debug, Clone, PartialEq)]
pub struct PushEvent {
    /// Target mower.
    pub mower_id: String,
    /// Event kind.
    pub kind: EventKind,
    /// Attribute patch.
    pub attributes: Value,
}

impl PushEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(mower_id: impl Into<String>, kind: EventKind, attributes: Value) -> Self {
        Self {
            mower_id: mower_id.into(),
            kind,
            attributes,
        }
    }

    /// Parses a push message object.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `id` or `type` is missing.
    /// A missing `attributes` member is treated as an empty object.
    pub fn from_message(message: &Value) -> Result<Self, ParseError> {
        let mower_id = message
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField("id".to_string()))?;
        let kind = message
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField("type".to_string()))?;
        let attributes = message
            .get("attributes")
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        Ok(Self::new(mower_id, EventKind::from_wire(kind), attributes))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for name in [
            "battery-event-v2",
            "calendar-event-v2",
            "cuttingHeight-event-v2",
            "headlights-event-v2",
            "message-event-v2",
            "mower-event-v2",
            "planner-event-v2",
            "position-event-v2",
            "settings-event",
            "status-event",
        ] {
            assert_eq!(EventKind::from_wire(name).as_str(), name);
        }
    }

    #[test]
    fn supported_kinds() {
        assert!(EventKind::Battery.is_supported());
        assert!(EventKind::from_wire("status-event").is_supported());
        assert!(EventKind::from_wire("positions-event").is_supported());
        assert!(EventKind::from_wire("message-event-v2").is_supported());
        assert!(!EventKind::from_wire("firmware-event").is_supported());
    }

    #[test]
    fn parses_message() {
        let event = PushEvent::from_message(&json!({
            "id": "1234",
            "type": "battery-event-v2",
            "attributes": { "battery": { "batteryPercent": "99" } }
        }))
        .unwrap();

        assert_eq!(event.mower_id, "1234");
        assert_eq!(event.kind, EventKind::Battery);
        assert_eq!(event.attributes["battery"]["batteryPercent"], "99");
    }

    #[test]
    fn message_without_type_is_rejected() {
        let result = PushEvent::from_message(&json!({ "id": "1234" }));
        assert!(matches!(result, Err(ParseError::MissingField(f)) if f == "type"));
    }
}
