// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded mower records.
//!
//! The fleet API returns a JSON:API document listing every mower of the
//! account:
//!
//! ```json
//! {"data": [{"type": "mower", "id": "c7233734-...", "attributes": {...}}]}
//! ```
//!
//! [`decode_mower_list`] splits that document into one raw attribute object
//! per mower id, and [`MowerAttributes::from_value`] turns an attribute object
//! into typed records. Decoding is lenient where the API is known to vary:
//! numbers that sometimes arrive as strings, enum values added by newer
//! firmware, optional feature sections.
//!
//! Timestamps that the API anchors on the mower's wall clock decode to
//! [`MowerLocalTime`](crate::types::MowerLocalTime); resolving them needs the
//! mower's time zone.

mod areas;
mod calendar;
mod de;
mod error_codes;
mod message;
mod status;

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub use areas::{Headlight, Position, Settings, Statistics, StayOutZones, WorkArea, Zone};
pub use calendar::{Calendar, CalendarTask};
pub use error_codes::{error_key, error_keys, error_text};
pub use message::{Message, Severity, decode_messages};
pub use status::{
    Battery, InactiveReason, Metadata, MowerActivity, MowerMode, MowerState, MowerStatus, Planner,
    PlannerAction, PlannerOverride, RestrictedReason, System,
};

use crate::capabilities::Capabilities;
use crate::error::ParseError;

/// Decoded attributes of every mower, keyed by mower id.
pub type MowerDictionary = HashMap<String, MowerAttributes>;

/// Everything the API reports about one mower.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MowerAttributes {
    pub system: System,
    pub battery: Battery,
    pub capabilities: Capabilities,
    pub mower: MowerStatus,
    pub calendar: Calendar,
    pub planner: Planner,
    pub metadata: Metadata,
    /// Recorded positions, newest first.
    pub positions: Vec<Position>,
    pub settings: Settings,
    pub statistics: Statistics,
    /// Present on mowers with stay-out zone support.
    pub stay_out_zones: Option<StayOutZones>,
    /// Present on mowers with work area support.
    pub work_areas: Option<Vec<WorkArea>>,
}

impl MowerAttributes {
    /// Decodes an attribute object.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if `attributes` is not an
    /// object, or `ParseError::Json` if a field has the wrong type.
    pub fn from_value(attributes: &Value) -> Result<Self, ParseError> {
        if !attributes.is_object() {
            return Err(ParseError::UnexpectedFormat(
                "mower attributes must be an object".to_string(),
            ));
        }
        Ok(Self::deserialize(attributes)?)
    }

    /// Returns the calendar tasks.
    #[must_use]
    pub fn tasks(&self) -> &[CalendarTask] {
        &self.calendar.tasks
    }

    /// Looks up a work area by id.
    #[must_use]
    pub fn work_area(&self, work_area_id: u64) -> Option<&WorkArea> {
        self.work_areas
            .as_deref()?
            .iter()
            .find(|area| area.work_area_id == work_area_id)
    }

    /// Returns the name of a work area.
    #[must_use]
    pub fn work_area_name(&self, work_area_id: u64) -> Option<&str> {
        self.work_area(work_area_id).map(|area| area.name.as_str())
    }
}

/// Splits a mower list document into raw attribute objects keyed by mower id.
///
/// Entries whose `type` is not `"mower"` are skipped.
///
/// # Errors
///
/// Returns `ParseError::MissingField` if the document has no `data` array or
/// an entry lacks its `id` or `attributes`.
///
/// # Examples
///
/// ```
/// use automower_lib::model::decode_mower_list;
///
/// let raw = serde_json::json!({
///     "data": [{ "type": "mower", "id": "1234", "attributes": { "battery": { "batteryPercent": 50 } } }]
/// });
/// let mowers = decode_mower_list(&raw).unwrap();
/// assert_eq!(mowers["1234"]["battery"]["batteryPercent"], 50);
/// ```
pub fn decode_mower_list(document: &Value) -> Result<HashMap<String, Value>, ParseError> {
    let entries = document
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::MissingField("data".to_string()))?;

    let mut mowers = HashMap::with_capacity(entries.len());
    for entry in entries {
        if entry.get("type").and_then(Value::as_str) != Some("mower") {
            continue;
        }
        let id = entry
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField("data[].id".to_string()))?;
        let attributes = entry
            .get("attributes")
            .ok_or_else(|| ParseError::MissingField("data[].attributes".to_string()))?;
        mowers.insert(id.to_string(), attributes.clone());
    }
    Ok(mowers)
}
