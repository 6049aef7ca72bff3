// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State of every mower of an account.

use std::collections::HashMap;

use serde_json::Value;

use super::device_state::DeviceState;
use super::event::EventKind;
use crate::capabilities::Capability;
use crate::error::{Error, ParseError, Result};
use crate::model::{Message, MowerAttributes, MowerDictionary};

/// Per-mower state, keyed by mower id.
///
/// Mowers are isolated from each other: an update addressed to one id never
/// touches another entry.
#[derive(Debug, Clone, Default)]
pub struct FleetState {
    devices: HashMap<String, DeviceState>,
}

impl FleetState {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of mowers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns true if no mower is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns true if `mower_id` is known.
    #[must_use]
    pub fn contains(&self, mower_id: &str) -> bool {
        self.devices.contains_key(mower_id)
    }

    /// Replaces the state of one mower with a full snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the snapshot does not decode; the previous
    /// state is kept.
    pub fn replace_snapshot(&mut self, mower_id: impl Into<String>, raw: Value) -> Result<()> {
        let mower_id = mower_id.into();
        let mut state = DeviceState::from_raw(raw)?;
        if let Some(previous) = self.devices.get(&mower_id) {
            state = state.with_messages_of(previous);
        }
        self.devices.insert(mower_id, state);
        Ok(())
    }

    /// Replaces the whole fleet with a polled snapshot.
    ///
    /// Mowers absent from `snapshot` are dropped and their ids returned.
    /// Every entry is decoded before anything is replaced. Message logs of
    /// remaining mowers are kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if any entry does not decode; the store is left
    /// unchanged.
    pub fn replace_all(&mut self, snapshot: HashMap<String, Value>) -> Result<Vec<String>> {
        let decoded = snapshot
            .into_iter()
            .map(|(id, raw)| {
                let state = DeviceState::from_raw(raw)?;
                let state = match self.devices.get(&id) {
                    Some(previous) => state.with_messages_of(previous),
                    None => state,
                };
                Ok((id, state))
            })
            .collect::<std::result::Result<HashMap<_, _>, ParseError>>()?;

        let mut removed: Vec<String> = self
            .devices
            .keys()
            .filter(|id| !decoded.contains_key(*id))
            .cloned()
            .collect();
        removed.sort();

        self.devices = decoded;
        Ok(removed)
    }

    /// Applies an event patch to one mower and returns whether it changed.
    ///
    /// An event for an unknown mower is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the patch is malformed or the result does
    /// not decode; the mower's state is kept.
    pub fn apply_event(&mut self, mower_id: &str, kind: &EventKind, patch: &Value) -> Result<bool> {
        let Some(state) = self.devices.get_mut(mower_id) else {
            tracing::warn!(mower_id = %mower_id, event_type = %kind, "Event for unknown mower ignored");
            return Ok(false);
        };
        Ok(state.apply(kind, patch)?)
    }

    /// Returns the state of one mower.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown.
    pub fn device(&self, mower_id: &str) -> Result<&DeviceState> {
        self.devices
            .get(mower_id)
            .ok_or_else(|| Error::NoDataAvailable(mower_id.to_string()))
    }

    /// Returns the decoded attributes of one mower.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown.
    pub fn attributes(&self, mower_id: &str) -> Result<&MowerAttributes> {
        self.device(mower_id).map(DeviceState::attributes)
    }

    /// Returns the message log of one mower, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown.
    pub fn messages(&self, mower_id: &str) -> Result<&[Message]> {
        self.device(mower_id).map(DeviceState::messages)
    }

    /// Replaces the message log of one mower.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown.
    pub fn replace_messages(&mut self, mower_id: &str, messages: Vec<Message>) -> Result<()> {
        self.devices
            .get_mut(mower_id)
            .ok_or_else(|| Error::NoDataAvailable(mower_id.to_string()))?
            .replace_messages(messages);
        Ok(())
    }

    /// Checks that a mower is known and has `capability`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` for an unknown mower and
    /// `Error::FeatureNotSupported` if the capability is missing.
    pub fn command_precondition(&self, mower_id: &str, capability: Option<Capability>) -> Result<()> {
        let state = self.device(mower_id)?;
        match capability {
            Some(capability) if !state.capabilities().supports(capability) => {
                Err(Error::FeatureNotSupported { capability })
            }
            _ => Ok(()),
        }
    }

    /// Returns decoded attributes of every mower.
    #[must_use]
    pub fn snapshot(&self) -> MowerDictionary {
        self.devices
            .iter()
            .map(|(id, state)| (id.clone(), state.attributes().clone()))
            .collect()
    }

    /// Returns the known mower ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.devices.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::fixtures;

    fn fleet() -> FleetState {
        let mut fleet = FleetState::new();
        fleet.replace_snapshot("high", fixtures::high_feature_mower()).unwrap();
        fleet.replace_snapshot("low", fixtures::low_feature_mower()).unwrap();
        fleet
    }

    #[test]
    fn events_are_isolated_per_mower() {
        let mut fleet = fleet();
        let low_before = fleet.attributes("low").unwrap().clone();

        let changed = fleet
            .apply_event(
                "high",
                &EventKind::Battery,
                &json!({ "battery": { "batteryPercent": 12 } }),
            )
            .unwrap();

        assert!(changed);
        assert_eq!(fleet.attributes("high").unwrap().battery.battery_percent, 12);
        assert_eq!(fleet.attributes("low").unwrap(), &low_before);
    }

    #[test]
    fn unknown_mower_event_is_ignored() {
        let mut fleet = fleet();
        let changed = fleet
            .apply_event("ghost", &EventKind::Battery, &json!({ "battery": {} }))
            .unwrap();
        assert!(!changed);
        assert_eq!(fleet.len(), 2);
    }

    #[test]
    fn replace_all_drops_missing_mowers() {
        let mut fleet = fleet();
        let mut snapshot = HashMap::new();
        snapshot.insert("high".to_string(), fixtures::high_feature_mower());

        let removed = fleet.replace_all(snapshot).unwrap();

        assert_eq!(removed, vec!["low".to_string()]);
        assert_eq!(fleet.ids(), vec!["high"]);
    }

    #[test]
    fn message_logs_survive_polls() {
        let mut fleet = fleet();
        fleet
            .replace_messages("high", vec![Message { code: 9, ..Message::default() }])
            .unwrap();

        let mut snapshot = HashMap::new();
        snapshot.insert("high".to_string(), fixtures::high_feature_mower());
        snapshot.insert("low".to_string(), fixtures::low_feature_mower());
        fleet.replace_all(snapshot).unwrap();

        assert_eq!(fleet.messages("high").unwrap()[0].code, 9);
        assert!(fleet.messages("low").unwrap().is_empty());
        assert!(matches!(
            fleet.replace_messages("ghost", Vec::new()),
            Err(Error::NoDataAvailable(_))
        ));
    }

    #[test]
    fn replace_all_is_atomic() {
        let mut fleet = fleet();
        let mut snapshot = HashMap::new();
        snapshot.insert("high".to_string(), fixtures::high_feature_mower());
        snapshot.insert("broken".to_string(), json!("not an object"));

        assert!(fleet.replace_all(snapshot).is_err());
        assert_eq!(fleet.ids(), vec!["high", "low"]);
    }

    #[test]
    fn unknown_mower_has_no_data() {
        let fleet = fleet();
        assert!(matches!(
            fleet.attributes("ghost"),
            Err(Error::NoDataAvailable(id)) if id == "ghost"
        ));
    }

    #[test]
    fn precondition_checks_capability() {
        let fleet = fleet();
        assert!(fleet.command_precondition("high", Some(Capability::Headlights)).is_ok());
        assert!(fleet.command_precondition("low", None).is_ok());
        assert!(matches!(
            fleet.command_precondition("low", Some(Capability::Headlights)),
            Err(Error::FeatureNotSupported {
                capability: Capability::Headlights
            })
        ));
        assert!(matches!(
            fleet.command_precondition("ghost", None),
            Err(Error::NoDataAvailable(_))
        ));
    }

    #[test]
    fn snapshot_contains_every_mower() {
        let snapshot = fleet().snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["low"].battery.battery_percent, 50);
    }
}
