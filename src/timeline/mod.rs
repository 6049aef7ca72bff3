// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mowing timelines derived from weekly calendars.
//!
//! A [`Timeline`] expands every [`CalendarTask`] of a mower into an infinite
//! sequence of [`Occurrence`]s and merges them by start time. Nothing is
//! materialized up front: each query builds fresh per-task cursors and pulls
//! occurrences on demand, so queries are pure and can be repeated.
//!
//! Tasks are wall-clock times on the mower, so the timeline is built for an
//! explicit time zone, normally the mower's. The `now` instant may be given
//! in any zone.
//!
//! # Examples
//!
//! ```
//! use chrono::{NaiveTime, TimeDelta, TimeZone, Utc};
//! use chrono_tz::Europe::Berlin;
//! use automower_lib::model::CalendarTask;
//! use automower_lib::timeline::Timeline;
//! use automower_lib::types::DaySet;
//!
//! // 08:00 in Berlin
//! let now = Utc.with_ymd_and_hms(2024, 5, 4, 6, 0, 0).unwrap();
//! let task = CalendarTask::new(
//!     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
//!     TimeDelta::hours(14),
//!     DaySet::ALL,
//! )
//! .unwrap();
//!
//! let timeline = Timeline::new(&[task], &Berlin, &now);
//! let now = now.with_timezone(&Berlin);
//! let next = timeline.active_after(&now).next().unwrap();
//! assert_eq!(next.start, now);
//! assert_eq!(next.start.format("%H:%M").to_string(), "08:00");
//! assert_eq!(next.label(Some("Front lawn")), "Front lawn schedule 1");
//! ```

mod merge;
mod recurrence;

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};

pub use merge::MergeByStart;
pub use recurrence::{Frequency, RecurrenceRule, RuleStarts, TaskOccurrences};

use crate::model::CalendarTask;

/// One concrete mowing interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence<Tz: TimeZone> {
    /// Start of the interval.
    pub start: DateTime<Tz>,
    /// End of the interval, `start` plus the task duration.
    pub end: DateTime<Tz>,
    /// Rule the occurrence was generated from.
    pub rule: RecurrenceRule,
    /// Work area of the originating task.
    pub work_area_id: Option<u64>,
    /// Position of the originating task within its work area, from 1.
    pub schedule_no: u32,
}

impl<Tz: TimeZone> Occurrence<Tz> {
    /// Returns a display label such as "Front lawn schedule 2".
    ///
    /// Without a work area name the label is "Schedule 2".
    #[must_use]
    pub fn label(&self, work_area_name: Option<&str>) -> String {
        match work_area_name {
            Some(name) => format!("{name} schedule {}", self.schedule_no),
            None => format!("Schedule {}", self.schedule_no),
        }
    }
}

/// Queryable, time-ordered view of every task of one mower.
#[derive(Debug, Clone)]
pub struct Timeline<Tz: TimeZone> {
    sources: Vec<TaskOccurrences<Tz>>,
}

impl<Tz: TimeZone> Timeline<Tz> {
    /// Builds the timeline of `tasks` in `tz`, anchored at `now`.
    ///
    /// Schedule numbers count from 1 per work area, tasks without a work
    /// area forming their own group, in task list order.
    #[must_use]
    pub fn new<Z: TimeZone>(tasks: &[CalendarTask], tz: &Tz, now: &DateTime<Z>) -> Self {
        let mut counters: HashMap<Option<u64>, u32> = HashMap::new();
        let sources = tasks
            .iter()
            .map(|task| {
                let counter = counters.entry(task.work_area_id()).or_insert(0);
                *counter += 1;
                TaskOccurrences::new(task, tz, now, *counter)
            })
            .collect();
        Self { sources }
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if the mower has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Occurrences intersecting `[range_start, range_end)`, ascending.
    ///
    /// Per-task expansion stops at the first occurrence starting at or
    /// after `range_end`, so the sequence is finite.
    pub fn overlapping(
        &self,
        range_start: &DateTime<Tz>,
        range_end: &DateTime<Tz>,
    ) -> impl Iterator<Item = Occurrence<Tz>> + use<Tz> {
        let sources = self
            .sources
            .iter()
            .map(|source| {
                let from = range_start.clone();
                let until = range_end.clone();
                source
                    .clone()
                    .skip_while(move |o| o.end <= from)
                    .take_while(move |o| o.start < until)
            })
            .collect();
        MergeByStart::new(sources)
    }

    /// Occurrences still active at or after `instant`, ascending and
    /// unbounded.
    ///
    /// A run in progress at `instant` comes first. Cut at any `range_end`,
    /// the sequence equals `overlapping(instant, range_end)`.
    pub fn active_after(
        &self,
        instant: &DateTime<Tz>,
    ) -> impl Iterator<Item = Occurrence<Tz>> + use<Tz> {
        let sources = self
            .sources
            .iter()
            .map(|source| {
                let from = instant.clone();
                source.clone().skip_while(move |o| o.end <= from)
            })
            .collect();
        MergeByStart::new(sources)
    }

    /// The first occurrence starting at or after `instant`.
    #[must_use]
    pub fn next_after(&self, instant: &DateTime<Tz>) -> Option<Occurrence<Tz>> {
        self.active_after(instant).find(|o| o.start >= *instant)
    }
}
