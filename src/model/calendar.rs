// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekly calendar tasks.
//!
//! A task starts at a time of day, runs for a fixed duration and repeats on a
//! set of weekdays. On the wire both start and duration are minutes:
//!
//! ```json
//! {"start": 480, "duration": 840, "monday": true, ..., "workAreaId": 123456}
//! ```

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::DaySet;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// One weekly mowing task.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveTime, TimeDelta};
/// use automower_lib::model::CalendarTask;
/// use automower_lib::types::DaySet;
///
/// let task = CalendarTask::new(
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     TimeDelta::hours(14),
///     DaySet::ALL,
/// )
/// .unwrap()
/// .with_work_area(123_456);
///
/// assert_eq!(task.work_area_id(), Some(123_456));
/// assert!(CalendarTask::new(task.start(), TimeDelta::zero(), DaySet::ALL).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireTask", into = "WireTask")]
pub struct CalendarTask {
    start: NaiveTime,
    duration: TimeDelta,
    days: DaySet,
    work_area_id: Option<u64>,
}

impl CalendarTask {
    /// Creates a task without a work area.
    ///
    /// The start is truncated to the minute.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` unless the duration is between one
    /// minute and 24 hours.
    pub fn new(start: NaiveTime, duration: TimeDelta, days: DaySet) -> Result<Self, ValueError> {
        let minutes = duration.num_minutes();
        if !(1..=i64::from(MINUTES_PER_DAY)).contains(&minutes) {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: MINUTES_PER_DAY,
                actual: u64::try_from(minutes).unwrap_or(0),
            });
        }
        let start = start.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(start);
        Ok(Self {
            start,
            duration: TimeDelta::minutes(minutes),
            days,
            work_area_id: None,
        })
    }

    /// Assigns the task to a work area.
    #[must_use]
    pub fn with_work_area(mut self, work_area_id: u64) -> Self {
        self.work_area_id = Some(work_area_id);
        self
    }

    /// Returns the start time of day.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the duration.
    #[must_use]
    pub const fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Returns the weekdays the task runs on.
    #[must_use]
    pub const fn days(&self) -> DaySet {
        self.days
    }

    /// Returns the work area, if any.
    #[must_use]
    pub const fn work_area_id(&self) -> Option<u64> {
        self.work_area_id
    }
}

/// The calendar of a mower.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Calendar {
    /// Tasks in the order the API lists them.
    #[serde(default)]
    pub tasks: Vec<CalendarTask>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
// Wire layout: one flag per weekday.
#[allow(clippy::struct_excessive_bools)]
struct WireTask {
    start: u32,
    duration: u32,
    #[serde(default)]
    monday: bool,
    #[serde(default)]
    tuesday: bool,
    #[serde(default)]
    wednesday: bool,
    #[serde(default)]
    thursday: bool,
    #[serde(default)]
    friday: bool,
    #[serde(default)]
    saturday: bool,
    #[serde(default)]
    sunday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    work_area_id: Option<u64>,
}

impl TryFrom<WireTask> for CalendarTask {
    type Error = ValueError;

    fn try_from(wire: WireTask) -> Result<Self, Self::Error> {
        let start = NaiveTime::from_hms_opt(wire.start / 60, wire.start % 60, 0).ok_or(
            ValueError::OutOfRange {
                min: 0,
                max: MINUTES_PER_DAY - 1,
                actual: u64::from(wire.start),
            },
        )?;
        let days = DaySet::from_flags([
            wire.monday,
            wire.tuesday,
            wire.wednesday,
            wire.thursday,
            wire.friday,
            wire.saturday,
            wire.sunday,
        ]);
        let task = Self::new(start, TimeDelta::minutes(i64::from(wire.duration)), days)?;
        Ok(match wire.work_area_id {
            Some(id) => task.with_work_area(id),
            None => task,
        })
    }
}

impl From<CalendarTask> for WireTask {
    fn from(task: CalendarTask) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = task.days.flags();
        // Duration is validated to at most one day of minutes.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let duration = task.duration.num_minutes() as u32;
        Self {
            start: task.start.hour() * 60 + task.start.minute(),
            duration,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
            work_area_id: task.work_area_id,
        }
    }
}
