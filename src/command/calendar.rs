// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calendar replacement.

use serde_json::json;

use super::{Command, mower_path};
use crate::capabilities::Capabilities;
use crate::error::{Error, Result};
use crate::model::CalendarTask;
use crate::protocol::Request;

/// Command to replace the weekly calendar.
///
/// All tasks of one command must belong to the same work area, or all to
/// none. On a mower with work areas, tasks of one work area are sent to that
/// work area's calendar; otherwise the mower calendar is replaced.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveTime, TimeDelta};
/// use automower_lib::{Capabilities, Error};
/// use automower_lib::command::{CalendarCommand, Command};
/// use automower_lib::model::CalendarTask;
/// use automower_lib::types::DaySet;
///
/// let task = CalendarTask::new(
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     TimeDelta::hours(2),
///     DaySet::ALL,
/// )
/// .unwrap();
///
/// let mixed = CalendarCommand::new(vec![task.clone().with_work_area(1), task.with_work_area(2)]);
/// assert!(matches!(
///     mixed.request("1234", &Capabilities::default()),
///     Err(Error::WorkAreasMismatch)
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCommand {
    tasks: Vec<CalendarTask>,
}

impl CalendarCommand {
    /// Creates the command.
    #[must_use]
    pub fn new(tasks: Vec<CalendarTask>) -> Self {
        Self { tasks }
    }

    /// Returns the tasks.
    #[must_use]
    pub fn tasks(&self) -> &[CalendarTask] {
        &self.tasks
    }

    /// Returns the work area shared by every task.
    ///
    /// # Errors
    ///
    /// Returns `Error::WorkAreasMismatch` if two tasks differ.
    pub fn work_area_id(&self) -> Result<Option<u64>> {
        let mut ids = self.tasks.iter().map(CalendarTask::work_area_id);
        let Some(first) = ids.next() else {
            return Ok(None);
        };
        if ids.any(|id| id != first) {
            return Err(Error::WorkAreasMismatch);
        }
        Ok(first)
    }
}

impl Command for CalendarCommand {
    fn request(&self, mower_id: &str, capabilities: &Capabilities) -> Result<Request> {
        let work_area_id = self.work_area_id()?;
        let path = match work_area_id {
            Some(id) if capabilities.work_areas => {
                mower_path(mower_id, &format!("workAreas/{id}/calendar"))
            }
            _ => mower_path(mower_id, "calendar"),
        };
        let body = json!({
            "data": { "type": "calendar", "attributes": { "tasks": self.tasks } }
        });
        Ok(Request::post(path, Some(body)))
    }
}
