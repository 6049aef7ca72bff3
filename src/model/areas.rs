// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings, positions, zones, work areas and usage statistics.

use serde::Deserialize;

use super::de;
use crate::types::{HeadlightMode, MowerLocalTime};

/// Headlight settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Headlight {
    pub mode: Option<HeadlightMode>,
}

/// Mower-wide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Cutting height level (1-9).
    pub cutting_height: Option<u8>,
    pub headlight: Headlight,
}

/// A GPS position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// A stay-out zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

/// Stay-out zones of a mower.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StayOutZones {
    /// True while the mower has not yet synchronized zone changes.
    pub dirty: bool,
    pub zones: Vec<Zone>,
}

impl StayOutZones {
    /// Looks up a zone by id.
    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }
}

/// A work area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkArea {
    pub work_area_id: u64,
    /// Name; the unnamed default area is called `my_lawn`.
    #[serde(deserialize_with = "de::work_area_name")]
    pub name: String,
    /// Cutting height in percent.
    pub cutting_height: u8,
    pub enabled: bool,
    /// Mowing progress in percent.
    pub progress: Option<u8>,
    /// When the area was last completed, on the mower's clock.
    #[serde(deserialize_with = "de::local_timestamp")]
    pub last_time_completed: Option<MowerLocalTime>,
}

/// Lifetime usage counters. Durations are in seconds, distances in meters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub cutting_blade_usage_time: Option<u64>,
    #[serde(rename = "downTime")]
    pub downtime: Option<u64>,
    pub number_of_charging_cycles: Option<u64>,
    pub number_of_collisions: Option<u64>,
    pub total_charging_time: Option<u64>,
    pub total_cutting_time: Option<u64>,
    pub total_drive_distance: Option<u64>,
    pub total_running_time: Option<u64>,
    pub total_searching_time: Option<u64>,
    #[serde(rename = "upTime")]
    pub uptime: Option<u64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unnamed_work_area_is_my_lawn() {
        let area: WorkArea = serde_json::from_value(json!({
            "workAreaId": 0,
            "name": "",
            "cuttingHeight": 50,
            "enabled": false
        }))
        .unwrap();
        assert_eq!(area.name, "my_lawn");
        assert!(area.last_time_completed.is_none());
    }

    #[test]
    fn zone_lookup() {
        let zones: StayOutZones = serde_json::from_value(json!({
            "dirty": false,
            "zones": [
                { "id": "81C6EEA2-D139-4FEA-B134-F22A6B3EA403", "name": "Springflowers", "enabled": true }
            ]
        }))
        .unwrap();
        let zone = zones.zone("81C6EEA2-D139-4FEA-B134-F22A6B3EA403").unwrap();
        assert_eq!(zone.name, "Springflowers");
        assert!(zones.zone("missing").is_none());
    }

    #[test]
    fn headlight_mode_in_settings() {
        let settings: Settings = serde_json::from_value(json!({
            "cuttingHeight": 4,
            "headlight": { "mode": "EVENING_ONLY" }
        }))
        .unwrap();
        assert_eq!(settings.cutting_height, Some(4));
        assert_eq!(settings.headlight.mode, Some(HeadlightMode::EveningOnly));
    }
}
