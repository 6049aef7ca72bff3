// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stay-out zone and work area commands.

use serde_json::json;

use super::{Command, mower_path};
use crate::capabilities::{Capabilities, Capability};
use crate::error::Result;
use crate::protocol::Request;
use crate::types::WorkAreaCuttingHeight;

/// Command to enable or disable a stay-out zone.
///
/// # Examples
///
/// ```
/// use automower_lib::Capabilities;
/// use automower_lib::command::{Command, StayOutZoneCommand};
/// use automower_lib::protocol::Method;
///
/// let cmd = StayOutZoneCommand::new("81C6EEA2-D139-4FEA-B134-F22A6B3EA403", false);
/// let request = cmd.request("1234", &Capabilities::default()).unwrap();
///
/// assert_eq!(request.method, Method::Patch);
/// assert_eq!(request.path, "mowers/1234/stayOutZones/81C6EEA2-D139-4FEA-B134-F22A6B3EA403");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayOutZoneCommand {
    zone_id: String,
    enable: bool,
}

impl StayOutZoneCommand {
    /// Creates the command.
    #[must_use]
    pub fn new(zone_id: impl Into<String>, enable: bool) -> Self {
        Self {
            zone_id: zone_id.into(),
            enable,
        }
    }
}

impl Command for StayOutZoneCommand {
    fn required_capability(&self) -> Option<Capability> {
        Some(Capability::StayOutZones)
    }

    fn request(&self, mower_id: &str, _capabilities: &Capabilities) -> Result<Request> {
        let path = mower_path(
            mower_id,
            &format!("stayOutZones/{}", urlencoding::encode(&self.zone_id)),
        );
        Ok(Request::patch(
            path,
            json!({
                "data": { "type": "stayOutZone", "id": self.zone_id, "attributes": { "enable": self.enable } }
            }),
        ))
    }
}

/// Change applied to a work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkAreaChange {
    /// Set the cutting height in percent.
    CuttingHeight(WorkAreaCuttingHeight),
    /// Enable or disable the work area.
    Enable(bool),
}

/// Command to change one work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAreaCommand {
    work_area_id: u64,
    change: WorkAreaChange,
}

impl WorkAreaCommand {
    /// Creates the command.
    #[must_use]
    pub const fn new(work_area_id: u64, change: WorkAreaChange) -> Self {
        Self {
            work_area_id,
            change,
        }
    }
}

impl Command for WorkAreaCommand {
    fn required_capability(&self) -> Option<Capability> {
        Some(Capability::WorkAreas)
    }

    fn request(&self, mower_id: &str, _capabilities: &Capabilities) -> Result<Request> {
        let attributes = match self.change {
            WorkAreaChange::CuttingHeight(height) => json!({ "cuttingHeight": height.percent() }),
            WorkAreaChange::Enable(enable) => json!({ "enable": enable }),
        };
        Ok(Request::patch(
            mower_path(mower_id, &format!("workAreas/{}", self.work_area_id)),
            json!({
                "data": { "type": "workArea", "id": self.work_area_id, "attributes": attributes }
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stay_out_zone_body() {
        let request = StayOutZoneCommand::new("zone 1", true)
            .request("abc", &Capabilities::default())
            .unwrap();

        assert_eq!(request.path, "mowers/abc/stayOutZones/zone%201");
        assert_eq!(
            request.body.unwrap(),
            json!({ "data": { "type": "stayOutZone", "id": "zone 1", "attributes": { "enable": true } } })
        );
    }

    #[test]
    fn work_area_cutting_height() {
        let cmd = WorkAreaCommand::new(
            654_321,
            WorkAreaChange::CuttingHeight(WorkAreaCuttingHeight::new(40).unwrap()),
        );
        let request = cmd.request("abc", &Capabilities::default()).unwrap();

        assert_eq!(request.path, "mowers/abc/workAreas/654321");
        assert_eq!(
            request.body.unwrap(),
            json!({ "data": { "type": "workArea", "id": 654_321, "attributes": { "cuttingHeight": 40 } } })
        );
    }

    #[test]
    fn work_area_enable() {
        let cmd = WorkAreaCommand::new(0, WorkAreaChange::Enable(false));
        let body = cmd.request("abc", &Capabilities::default()).unwrap().body.unwrap();
        assert_eq!(body["data"]["attributes"], json!({ "enable": false }));
        assert_eq!(cmd.required_capability(), Some(Capability::WorkAreas));
    }
}
