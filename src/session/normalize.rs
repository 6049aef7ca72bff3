// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push payload fix-ups applied before an event reaches the store.
//!
//! Two payload shapes need the cached state of the mower to be applied
//! correctly:
//!
//! - The legacy `settings-event` carries `cuttingHeight` and `headlight` at
//!   the top level, while snapshots nest them under `settings`; an empty task
//!   list in it means "unchanged", not "cleared".
//! - Calendar tasks pushed for a work-area mower may lack `workAreaId`; the id
//!   of the cached task at the same position is carried over.

use serde_json::{Map, Value, json};

use crate::state::{AttributeTree, DeviceState, EventKind, PushEvent};

/// Rewrites `event` in place using the cached state of its mower.
pub(crate) fn normalize(event: &mut PushEvent, cached: &DeviceState) {
    if event.kind == EventKind::Settings {
        event.attributes = settings_tree(&event.attributes, cached.raw());
    }
    if cached.capabilities().work_areas {
        backfill_work_area_ids(&mut event.attributes, cached.raw());
    }
}

fn settings_tree(flat: &Value, cached: &AttributeTree) -> Value {
    let tasks = flat
        .pointer("/calendar/tasks")
        .and_then(Value::as_array)
        .filter(|tasks| !tasks.is_empty())
        .map(|tasks| Value::Array(tasks.clone()))
        .or_else(|| cached.leaf(&["calendar", "tasks"]).cloned())
        .unwrap_or_else(|| json!([]));

    let mut settings = Map::new();
    if let Some(height) = flat
        .get("cuttingHeight")
        .or_else(|| cached.leaf(&["settings", "cuttingHeight"]))
    {
        settings.insert("cuttingHeight".to_string(), height.clone());
    }
    if let Some(mode) = flat
        .pointer("/headlight/mode")
        .or_else(|| cached.leaf(&["settings", "headlight", "mode"]))
    {
        settings.insert("headlight".to_string(), json!({ "mode": mode }));
    }

    json!({ "calendar": { "tasks": tasks }, "settings": settings })
}

fn backfill_work_area_ids(attributes: &mut Value, cached: &AttributeTree) {
    let Some(tasks) = attributes
        .pointer_mut("/calendar/tasks")
        .and_then(Value::as_array_mut)
    else {
        return;
    };
    let Some(Value::Array(previous)) = cached.leaf(&["calendar", "tasks"]) else {
        return;
    };

    for (task, previous) in tasks.iter_mut().zip(previous) {
        let Some(task) = task.as_object_mut() else {
            continue;
        };
        if !task.get("workAreaId").is_none_or(Value::is_null) {
            continue;
        }
        if let Some(id) = previous.get("workAreaId").filter(|id| !id.is_null()) {
            task.insert("workAreaId".to_string(), id.clone());
        }
    }
}
