// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Expansion of one calendar task into its occurrences.
//!
//! A task is turned into a [`RecurrenceRule`] anchored on the first day,
//! starting today, whose occurrence has not ended yet. The rule then yields
//! local start dates on demand; [`TaskOccurrences`] resolves each date in the
//! mower's time zone and attaches the fixed duration.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};

use super::Occurrence;
use crate::model::CalendarTask;
use crate::types::{DaySet, resolve_local};

/// Days scanned when looking for the anchor day, today included.
const ANCHOR_SCAN_DAYS: usize = 8;

/// How often a rule repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Every day.
    Daily,
    /// On the rule's weekdays.
    Weekly,
}

/// An infinite weekly or daily recurrence seeded at a local start time.
///
/// Renders as an iCalendar RRULE value:
///
/// ```
/// use chrono::{NaiveTime, TimeDelta};
/// use automower_lib::model::CalendarTask;
/// use automower_lib::timeline::RecurrenceRule;
/// use automower_lib::types::DaySet;
///
/// let task = CalendarTask::new(
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     TimeDelta::hours(5),
///     DaySet::from_flags([true, false, true, false, true, false, false]),
/// )
/// .unwrap();
/// let berlin = chrono_tz::Europe::Berlin;
/// let now = chrono::Utc::now();
/// let rule = RecurrenceRule::for_task(&task, &berlin, &now);
/// assert_eq!(rule.to_string(), "FREQ=WEEKLY;BYDAY=MO,WE,FR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecurrenceRule {
    frequency: Frequency,
    days: DaySet,
    dtstart: NaiveDateTime,
}

impl RecurrenceRule {
    /// Builds the rule for `task`, anchored relative to `now` as seen in `tz`.
    ///
    /// The anchor is the first day from today on that is in the task's
    /// day set, skipping today when today's run already ended before `now`.
    /// With an empty day set the rule is seeded today and yields nothing.
    #[must_use]
    pub fn for_task<Tz: TimeZone, Z: TimeZone>(
        task: &CalendarTask,
        tz: &Tz,
        now: &DateTime<Z>,
    ) -> Self {
        let now = now.with_timezone(tz);
        let days = task.days();
        let frequency = if days.is_all() {
            Frequency::Daily
        } else {
            Frequency::Weekly
        };
        let anchor = anchor_date(task, &now).unwrap_or_else(|| now.date_naive());

        Self {
            frequency,
            days,
            dtstart: anchor.and_time(task.start()),
        }
    }

    /// Returns the frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the weekdays the rule fires on.
    #[must_use]
    pub const fn days(&self) -> DaySet {
        self.days
    }

    /// Returns the local start of the first occurrence.
    #[must_use]
    pub const fn dtstart(&self) -> NaiveDateTime {
        self.dtstart
    }

    /// Iterates local start times from `dtstart` on.
    #[must_use]
    pub fn starts(&self) -> RuleStarts {
        RuleStarts {
            next: Some(self.dtstart.date()),
            days: self.days,
            time: self.dtstart.time(),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frequency {
            Frequency::Daily => f.write_str("FREQ=DAILY"),
            Frequency::Weekly => write!(f, "FREQ=WEEKLY;BYDAY={}", self.days),
        }
    }
}

fn anchor_date<Tz: TimeZone>(task: &CalendarTask, now: &DateTime<Tz>) -> Option<NaiveDate> {
    let tz = now.timezone();
    let today = now.date_naive();

    today
        .iter_days()
        .take(ANCHOR_SCAN_DAYS)
        .filter(|day| task.days().contains(day.weekday()))
        .find(|day| {
            let end = resolve_local(&tz, day.and_time(task.start())) + task.duration();
            *day != today || end >= *now
        })
}

/// Local start times of a rule, in increasing order.
#[derive(Debug, Clone)]
pub struct RuleStarts {
    next: Option<NaiveDate>,
    days: DaySet,
    time: NaiveTime,
}

impl Iterator for RuleStarts {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.days.is_empty() {
            return None;
        }
        loop {
            let day = self.next?;
            self.next = day.succ_opt();
            if self.days.contains(day.weekday()) {
                return Some(day.and_time(self.time));
            }
        }
    }
}

/// The occurrences of one task, in increasing start order.
///
/// Cloning yields an independent cursor at the same position.
#[derive(Debug, Clone)]
pub struct TaskOccurrences<Tz: TimeZone> {
    starts: RuleStarts,
    rule: RecurrenceRule,
    tz: Tz,
    duration: TimeDelta,
    work_area_id: Option<u64>,
    schedule_no: u32,
}

impl<Tz: TimeZone> TaskOccurrences<Tz> {
    /// Expands `task` in `tz` relative to `now`, labelling occurrences with
    /// `schedule_no`.
    #[must_use]
    pub fn new<Z: TimeZone>(
        task: &CalendarTask,
        tz: &Tz,
        now: &DateTime<Z>,
        schedule_no: u32,
    ) -> Self {
        let rule = RecurrenceRule::for_task(task, tz, now);
        Self {
            starts: rule.starts(),
            rule,
            tz: tz.clone(),
            duration: task.duration(),
            work_area_id: task.work_area_id(),
            schedule_no,
        }
    }

    /// Returns the rule this sequence follows.
    #[must_use]
    pub const fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }
}

impl<Tz: TimeZone> Iterator for TaskOccurrences<Tz> {
    type Item = Occurrence<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let local = self.starts.next()?;
        let start = resolve_local(&self.tz, local);
        Some(Occurrence {
            end: start.clone() + self.duration,
            start,
            rule: self.rule,
            work_area_id: self.work_area_id,
            schedule_no: self.schedule_no,
        })
    }
}
