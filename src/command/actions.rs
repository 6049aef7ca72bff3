// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mowing actions.

use serde_json::{Map, Value, json};

use super::{Command, mower_path};
use crate::capabilities::{Capabilities, Capability};
use crate::error::Result;
use crate::protocol::Request;
use crate::types::Minutes;

/// Command to start, pause or park the mower.
///
/// # Examples
///
/// ```
/// use automower_lib::Capabilities;
/// use automower_lib::command::{ActionCommand, Command};
///
/// let request = ActionCommand::Pause.request("1234", &Capabilities::default()).unwrap();
/// assert_eq!(request.body.unwrap(), serde_json::json!({ "data": { "type": "Pause" } }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCommand {
    /// Pause the mower where it is.
    Pause,
    /// Drop any override and follow the calendar again.
    ResumeSchedule,
    /// Park until the next scheduled start.
    ParkUntilNextSchedule,
    /// Park until told otherwise.
    ParkUntilFurtherNotice,
    /// Park for a period.
    Park { duration: Minutes },
    /// Mow for a period, ignoring the calendar.
    Start { duration: Minutes },
    /// Mow one work area for a period.
    StartInWorkArea { work_area_id: u64, duration: Minutes },
}

impl ActionCommand {
    /// Returns the action type sent to the API.
    #[must_use]
    pub const fn action_type(&self) -> &'static str {
        match self {
            Self::Pause => "Pause",
            Self::ResumeSchedule => "ResumeSchedule",
            Self::ParkUntilNextSchedule => "ParkUntilNextSchedule",
            Self::ParkUntilFurtherNotice => "ParkUntilFurtherNotice",
            Self::Park { .. } => "Park",
            Self::Start { .. } => "Start",
            Self::StartInWorkArea { .. } => "StartInWorkArea",
        }
    }

    fn attributes(&self) -> Option<Value> {
        match self {
            Self::Park { duration } | Self::Start { duration } => {
                Some(json!({ "duration": duration.get() }))
            }
            Self::StartInWorkArea {
                work_area_id,
                duration,
            } => Some(json!({ "duration": duration.get(), "workAreaId": work_area_id })),
            _ => None,
        }
    }
}

impl Command for ActionCommand {
    fn required_capability(&self) -> Option<Capability> {
        match self {
            Self::StartInWorkArea { .. } => Some(Capability::WorkAreas),
            _ => None,
        }
    }

    fn request(&self, mower_id: &str, _capabilities: &Capabilities) -> Result<Request> {
        let mut data = Map::new();
        data.insert("type".to_string(), json!(self.action_type()));
        if let Some(attributes) = self.attributes() {
            data.insert("attributes".to_string(), attributes);
        }
        Ok(Request::post(
            mower_path(mower_id, "actions"),
            Some(json!({ "data": data })),
        ))
    }
}
