// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use automower_lib::ProtocolError;
use automower_lib::protocol::{Frame, FrameStream, Method, Request, Transport};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;

pub const HIGH_ID: &str = "c7233734-b219-4287-a173-08e3643f89f0";
pub const LOW_ID: &str = "1234";

// ============================================================================
// Mock transport
// ============================================================================

/// In-memory transport recording every request.
///
/// `GET mowers` answers with the configured list, paths set with
/// [`respond`](Self::respond) with their document; other requests answer
/// `{}`.
#[derive(Default)]
pub struct MockTransport {
    mowers: Mutex<Value>,
    responses: Mutex<HashMap<String, Value>>,
    failure: Mutex<Option<ProtocolError>>,
    requests: Mutex<Vec<Request>>,
    stream: Mutex<Option<FrameStream>>,
}

impl MockTransport {
    pub fn with_mowers(mowers: Value) -> Self {
        let transport = Self::default();
        transport.set_mowers(mowers);
        transport
    }

    pub fn set_mowers(&self, mowers: Value) {
        *self.mowers.lock() = mowers;
    }

    /// Answers GET requests for `path` with `document`.
    pub fn respond(&self, path: &str, document: Value) {
        self.responses.lock().insert(path.to_string(), document);
    }

    /// Makes the next request fail with `error`.
    pub fn fail_next(&self, error: ProtocolError) {
        *self.failure.lock() = Some(error);
    }

    /// Returns a sender feeding the next opened push stream.
    pub fn push_channel(&self) -> mpsc::Sender<Frame> {
        let (tx, stream) = FrameStream::channel(16);
        *self.stream.lock() = Some(stream);
        tx
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Requests other than mower list polls.
    pub fn commands(&self) -> Vec<Request> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method != Method::Get)
            .cloned()
            .collect()
    }

    pub fn poll_count(&self) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == Method::Get && r.path == "mowers")
            .count()
    }

    fn answer(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ProtocolError> {
        self.requests.lock().push(Request {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        if let Some(error) = self.failure.lock().take() {
            return Err(error);
        }
        if method != Method::Get {
            return Ok(json!({}));
        }
        if path == "mowers" {
            return Ok(self.mowers.lock().clone());
        }
        Ok(self.responses.lock().get(path).cloned().unwrap_or_else(|| json!({})))
    }
}

impl Transport for MockTransport {
    async fn get_json(&self, path: &str) -> Result<Value, ProtocolError> {
        self.answer(Method::Get, path, None)
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value, ProtocolError> {
        self.answer(Method::Post, path, body)
    }

    async fn patch_json(&self, path: &str, body: Option<&Value>) -> Result<Value, ProtocolError> {
        self.answer(Method::Patch, path, body)
    }

    async fn open_stream(&self) -> Result<FrameStream, ProtocolError> {
        self.stream
            .lock()
            .take()
            .ok_or(ProtocolError::StreamUnavailable)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Wraps attribute objects into a mower list document.
pub fn mower_list(mowers: &[(&str, Value)]) -> Value {
    let data: Vec<Value> = mowers
        .iter()
        .map(|(id, attributes)| json!({ "type": "mower", "id": id, "attributes": attributes }))
        .collect();
    json!({ "data": data })
}

/// The default two-mower account.
pub fn fleet() -> Value {
    mower_list(&[(HIGH_ID, high_feature_mower()), (LOW_ID, low_feature_mower())])
}

/// A mower with every optional feature.
pub fn high_feature_mower() -> Value {
    json!({
        "system": { "name": "Test Mower 1", "model": "450XH-TEST", "serialNumber": 123 },
        "battery": { "batteryPercent": 100 },
        "capabilities": {
            "canConfirmError": true,
            "headlights": true,
            "position": true,
            "stayOutZones": true,
            "workAreas": true
        },
        "mower": {
            "mode": "MAIN_AREA",
            "activity": "PARKED_IN_CS",
            "state": "RESTRICTED",
            "errorCode": 0,
            "errorCodeTimestamp": 0,
            "inactiveReason": "NONE",
            "isErrorConfirmable": false,
            "workAreaId": 123_456
        },
        "calendar": {
            "tasks": [
                {
                    "start": 1140, "duration": 300,
                    "monday": true, "tuesday": false, "wednesday": true, "thursday": false,
                    "friday": true, "saturday": false, "sunday": false,
                    "workAreaId": 123_456
                },
                {
                    "start": 0, "duration": 480,
                    "monday": false, "tuesday": true, "wednesday": false, "thursday": true,
                    "friday": false, "saturday": true, "sunday": false,
                    "workAreaId": 0
                }
            ]
        },
        "planner": {
            "nextStartTimestamp": 1_685_991_600_000_i64,
            "override": { "action": "NOT_ACTIVE" },
            "restrictedReason": "WEEK_SCHEDULE"
        },
        "metadata": { "connected": true, "statusTimestamp": 1_697_669_932_683_i64 },
        "positions": [
            { "latitude": 35.539_081_4, "longitude": -82.552_776_7 },
            { "latitude": 35.539_032_7, "longitude": -82.552_730_8 }
        ],
        "settings": { "cuttingHeight": 4, "headlight": { "mode": "EVENING_ONLY" } },
        "statistics": { "cuttingBladeUsageTime": 123, "numberOfChargingCycles": 1380 },
        "stayOutZones": {
            "dirty": false,
            "zones": [
                { "id": "81C6EEA2-D139-4FEA-B134-F22A6B3EA403", "name": "Springflowers", "enabled": true }
            ]
        },
        "workAreas": [
            { "workAreaId": 123_456, "name": "Front lawn", "cuttingHeight": 50, "enabled": true },
            { "workAreaId": 0, "name": "", "cuttingHeight": 50, "enabled": false }
        ]
    })
}

/// A mower without optional features.
pub fn low_feature_mower() -> Value {
    json!({
        "system": { "name": "Test Mower 2", "model": "305", "serialNumber": "987654321" },
        "battery": { "batteryPercent": 50 },
        "capabilities": {
            "canConfirmError": false,
            "headlights": false,
            "position": false,
            "stayOutZones": false,
            "workAreas": false
        },
        "mower": {
            "mode": "MAIN_AREA",
            "activity": "MOWING",
            "state": "IN_OPERATION",
            "errorCode": 0,
            "errorCodeTimestamp": 0
        },
        "calendar": {
            "tasks": [
                {
                    "start": 480, "duration": 600,
                    "monday": true, "tuesday": true, "wednesday": true, "thursday": true,
                    "friday": true, "saturday": true, "sunday": true
                }
            ]
        },
        "planner": {
            "nextStartTimestamp": 0,
            "override": { "action": "NOT_ACTIVE" },
            "restrictedReason": "NONE"
        },
        "metadata": { "connected": true, "statusTimestamp": 1_697_669_932_683_i64 },
        "settings": { "cuttingHeight": 3 }
    })
}

/// A message log document.
pub fn message_log(mower_id: &str, messages: &[Value]) -> Value {
    json!({
        "data": {
            "type": "messages",
            "id": mower_id,
            "attributes": { "messages": messages }
        }
    })
}
