// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mower-wide settings.

use chrono::{DateTime, TimeZone};
use serde_json::{Value, json};

use super::{Command, mower_path};
use crate::capabilities::{Capabilities, Capability};
use crate::error::Result;
use crate::protocol::Request;
use crate::types::{CuttingHeight, HeadlightMode, MowerLocalTime};

/// Command to change a mower setting.
///
/// # Examples
///
/// ```
/// use automower_lib::Capabilities;
/// use automower_lib::command::{Command, SettingsCommand};
/// use automower_lib::types::CuttingHeight;
///
/// let cmd = SettingsCommand::CuttingHeight(CuttingHeight::new(5).unwrap());
/// let request = cmd.request("1234", &Capabilities::default()).unwrap();
///
/// assert_eq!(request.path, "mowers/1234/settings");
/// assert_eq!(request.body.unwrap()["data"]["attributes"]["cuttingHeight"], 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Set the cutting height level.
    CuttingHeight(CuttingHeight),
    /// Set the headlight mode.
    Headlight(HeadlightMode),
    /// Set the mower's clock.
    DateTime(MowerLocalTime),
}

impl SettingsCommand {
    /// Sets the mower clock to the wall-clock time of `instant`.
    ///
    /// The mower keeps local time only, so the instant's offset is dropped.
    #[must_use]
    pub fn date_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::DateTime(MowerLocalTime::from_zoned(instant))
    }

    fn attributes(&self) -> Value {
        match self {
            Self::CuttingHeight(height) => json!({ "cuttingHeight": height.value() }),
            Self::Headlight(mode) => json!({ "headlight": { "mode": mode.as_api_str() } }),
            Self::DateTime(time) => json!({ "dateTime": time.api_timestamp() }),
        }
    }
}

impl Command for SettingsCommand {
    fn required_capability(&self) -> Option<Capability> {
        match self {
            Self::Headlight(_) => Some(Capability::Headlights),
            _ => None,
        }
    }

    fn request(&self, mower_id: &str, _capabilities: &Capabilities) -> Result<Request> {
        Ok(Request::post(
            mower_path(mower_id, "settings"),
            Some(json!({ "data": { "type": "settings", "attributes": self.attributes() } })),
        ))
    }
}
