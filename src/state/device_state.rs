// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State of a single mower.

use serde_json::{Value, json};

use super::attribute_tree::AttributeTree;
use super::event::EventKind;
use crate::capabilities::Capabilities;
use crate::error::ParseError;
use crate::model::{Message, MowerAttributes};

/// Positions kept per mower, newest first.
pub const MAX_POSITIONS: usize = 50;

/// Log messages kept per mower, newest first.
pub const MAX_MESSAGES: usize = 50;

/// Raw attribute tree of one mower plus its decoded form.
///
/// The raw tree is the source of truth; every update patches it and decodes
/// it again. An update whose result does not decode leaves the state as it
/// was. The message log is not part of the attribute tree and survives
/// snapshot replacement.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use automower_lib::state::{DeviceState, EventKind};
///
/// let mut state = DeviceState::from_raw(json!({ "battery": { "batteryPercent": 100 } })).unwrap();
///
/// let changed = state
///     .apply(&EventKind::Battery, &json!({ "battery": { "batteryPercent": 99 } }))
///     .unwrap();
/// assert!(changed);
/// assert_eq!(state.attributes().battery.battery_percent, 99);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    tree: AttributeTree,
    attributes: MowerAttributes,
    messages: Vec<Message>,
}

impl DeviceState {
    /// Decodes a full attribute snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the snapshot does not decode.
    pub fn from_raw(raw: Value) -> Result<Self, ParseError> {
        let attributes = MowerAttributes::from_value(&raw)?;
        Ok(Self {
            tree: AttributeTree::from(raw),
            attributes,
            messages: Vec::new(),
        })
    }

    /// Carries the message log of `previous` over into a fresh snapshot.
    #[must_use]
    pub fn with_messages_of(mut self, previous: &DeviceState) -> Self {
        self.messages.clone_from(&previous.messages);
        self
    }

    /// Returns the decoded attributes.
    #[must_use]
    pub fn attributes(&self) -> &MowerAttributes {
        &self.attributes
    }

    /// Returns the raw attribute tree.
    #[must_use]
    pub fn raw(&self) -> &AttributeTree {
        &self.tree
    }

    /// Returns the capability flags.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.attributes.capabilities
    }

    /// Returns the message log, newest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replaces the message log with a fetched one.
    pub fn replace_messages(&mut self, mut messages: Vec<Message>) {
        messages.truncate(MAX_MESSAGES);
        self.messages = messages;
    }

    /// Applies an event patch and returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if a structured payload lacks its
    /// section, or a decoding error if the patched tree no longer decodes.
    pub fn apply(&mut self, kind: &EventKind, patch: &Value) -> Result<bool, ParseError> {
        if *kind == EventKind::Message {
            return self.record_message(patch);
        }
        let mut tree = self.tree.clone();
        route(&mut tree, kind, patch)?;
        if tree == self.tree {
            return Ok(false);
        }
        self.attributes = MowerAttributes::from_value(&tree.to_value())?;
        self.tree = tree;
        Ok(true)
    }

    fn record_message(&mut self, patch: &Value) -> Result<bool, ParseError> {
        let message = Message::from_value(&field(patch, &["message"])?)?;
        if self.messages.first() == Some(&message) {
            return Ok(false);
        }
        self.messages.insert(0, message);
        self.messages.truncate(MAX_MESSAGES);
        Ok(true)
    }
}

fn route(tree: &mut AttributeTree, kind: &EventKind, patch: &Value) -> Result<(), ParseError> {
    match kind {
        EventKind::Battery => merge_section(tree, patch, "battery"),
        EventKind::Mower => merge_section(tree, patch, "mower"),
        EventKind::Planner => merge_section(tree, patch, "planner"),
        EventKind::CuttingHeight => {
            let height = field(patch, &["cuttingHeight", "height"])?;
            tree.set(&["settings", "cuttingHeight"], AttributeTree::Leaf(height));
            Ok(())
        }
        EventKind::Headlights => {
            let mode = field(patch, &["headLight", "mode"])?;
            tree.set(&["settings", "headlight", "mode"], AttributeTree::Leaf(mode));
            Ok(())
        }
        EventKind::Calendar => {
            let tasks = field(patch, &["calendar", "tasks"])?;
            tree.set(&["calendar", "tasks"], AttributeTree::Leaf(tasks));
            Ok(())
        }
        EventKind::Position => {
            let position = field(patch, &["position"])?;
            let mut positions = match tree.leaf(&["positions"]) {
                Some(Value::Array(existing)) => existing.clone(),
                _ => Vec::new(),
            };
            positions.insert(0, position);
            positions.truncate(MAX_POSITIONS);
            tree.set(&["positions"], AttributeTree::Leaf(Value::Array(positions)));
            Ok(())
        }
        // Recorded outside the tree.
        EventKind::Message => Ok(()),
        EventKind::Settings | EventKind::Generic(_) => {
            tree.merge(AttributeTree::from(patch.clone()));
            Ok(())
        }
    }
}

fn merge_section(tree: &mut AttributeTree, patch: &Value, key: &str) -> Result<(), ParseError> {
    let section = field(patch, &[key])?;
    tree.merge(AttributeTree::from(json!({ key: section })));
    Ok(())
}

fn field(patch: &Value, path: &[&str]) -> Result<Value, ParseError> {
    path.iter()
        .try_fold(patch, |value, key| value.get(key))
        .cloned()
        .ok_or_else(|| ParseError::MissingField(path.join(".")))
}
