// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity, battery, operating status, planner and metadata records.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::de;
use super::error_codes;
use crate::types::MowerLocalTime;

/// Static identity of a mower.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct System {
    /// Name given by the owner.
    pub name: String,
    /// Model designation.
    pub model: String,
    /// Serial number.
    #[serde(deserialize_with = "de::string_or_number")]
    pub serial_number: String,
}

/// Battery status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Battery {
    /// Charge level in percent.
    #[serde(deserialize_with = "de::u8_or_string")]
    pub battery_percent: u8,
    /// Seconds until fully charged, when charging.
    pub remaining_charging_time: Option<u64>,
}

/// Operating mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowerMode {
    MainArea,
    Demo,
    SecondaryArea,
    Home,
    Poi,
    #[default]
    #[serde(other)]
    Unknown,
}

/// What the mower is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowerActivity {
    NotApplicable,
    Mowing,
    GoingHome,
    Charging,
    Leaving,
    ParkedInCs,
    StoppedInGarden,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Overall mower state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowerState {
    NotApplicable,
    Paused,
    InOperation,
    WaitUpdating,
    WaitPowerUp,
    Restricted,
    Off,
    Stopped,
    Error,
    FatalError,
    ErrorAtPowerUp,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MowerState {
    /// Returns true for the three error states.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error | Self::FatalError | Self::ErrorAtPowerUp)
    }
}

/// Why a mower that should operate is idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InactiveReason {
    None,
    Planning,
    SearchingForSatellites,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Current operating status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MowerStatus {
    /// Operating mode.
    pub mode: MowerMode,
    /// Current activity.
    pub activity: MowerActivity,
    /// Overall state.
    pub state: MowerState,
    /// Raw error code, `0` when there is no error.
    pub error_code: u32,
    /// When the current error occurred, on the mower's clock.
    #[serde(rename = "errorCodeTimestamp", deserialize_with = "de::local_timestamp")]
    pub error_time: Option<MowerLocalTime>,
    /// Why the mower is idle.
    pub inactive_reason: InactiveReason,
    /// Whether [`ConfirmError`](crate::command::ConfirmError) can clear the error.
    pub is_error_confirmable: bool,
    /// Work area the mower is currently in.
    pub work_area_id: Option<u64>,
}

impl MowerStatus {
    /// Returns the snake_case key of the current error, `None` without error.
    ///
    /// ```
    /// use automower_lib::model::MowerStatus;
    ///
    /// let status = MowerStatus { error_code: 9, ..MowerStatus::default() };
    /// assert_eq!(status.error_key().as_deref(), Some("trapped"));
    /// ```
    #[must_use]
    pub fn error_key(&self) -> Option<String> {
        error_codes::error_key(self.error_code)
    }
}

/// Planner override action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlannerAction {
    NotActive,
    ForcePark,
    ForceMow,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Manual override of the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerOverride {
    /// The override in effect.
    pub action: PlannerAction,
}

/// Why the planner holds the mower back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestrictedReason {
    None,
    WeekSchedule,
    ParkOverride,
    Sensor,
    DailyLimit,
    Fota,
    Frost,
    AllWorkAreasCompleted,
    External,
    NotApplicable,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Planner state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Planner {
    /// Next scheduled start, on the mower's clock.
    #[serde(rename = "nextStartTimestamp", deserialize_with = "de::local_timestamp")]
    pub next_start: Option<MowerLocalTime>,
    /// Manual override.
    #[serde(rename = "override")]
    pub planner_override: PlannerOverride,
    /// Restriction reason.
    pub restricted_reason: RestrictedReason,
    /// Third-party source of an `External` restriction.
    pub external_reason: Option<u32>,
}

/// Cloud connection metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Whether the mower is connected to the cloud.
    pub connected: bool,
    /// When the status was last updated.
    #[serde(deserialize_with = "de::utc_millis")]
    pub status_timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_enum_values_fall_back() {
        let status: MowerStatus = serde_json::from_value(json!({
            "mode": "SOMETHING_NEW",
            "activity": "MOWING",
            "state": "IN_OPERATION",
            "errorCode": 0,
            "errorCodeTimestamp": 0
        }))
        .unwrap();

        assert_eq!(status.mode, MowerMode::Unknown);
        assert_eq!(status.activity, MowerActivity::Mowing);
        assert_eq!(status.state, MowerState::InOperation);
        assert!(status.error_time.is_none());
        assert!(status.error_key().is_none());
    }

    #[test]
    fn planner_override_and_next_start() {
        let planner: Planner = serde_json::from_value(json!({
            "nextStartTimestamp": 1_685_991_600_000_i64,
            "override": { "action": "FORCE_MOW" },
            "restrictedReason": "WEEK_SCHEDULE"
        }))
        .unwrap();

        assert_eq!(planner.planner_override.action, PlannerAction::ForceMow);
        assert_eq!(planner.restricted_reason, RestrictedReason::WeekSchedule);
        assert_eq!(
            planner.next_start.unwrap().to_string(),
            "2023-06-05T19:00:00"
        );
    }

    #[test]
    fn battery_percent_from_string() {
        let battery: Battery =
            serde_json::from_value(json!({ "batteryPercent": "99" })).unwrap();
        assert_eq!(battery.battery_percent, 99);
        assert!(serde_json::from_value::<Battery>(json!({ "batteryPercent": "lots" })).is_err());
    }

    #[test]
    fn metadata_timestamp_is_utc_millis() {
        let metadata: Metadata = serde_json::from_value(json!({
            "connected": true,
            "statusTimestamp": 1_697_669_932_683_i64
        }))
        .unwrap();
        assert!(metadata.connected);
        assert_eq!(
            metadata.status_timestamp.unwrap().timestamp_millis(),
            1_697_669_932_683
        );
    }
}
