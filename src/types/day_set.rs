// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Set of weekdays a calendar task runs on.

use std::fmt;

use chrono::Weekday;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A set of weekdays, iterated Monday first.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use automower_lib::types::DaySet;
///
/// let days = DaySet::from_flags([true, false, true, false, true, false, false]);
/// assert!(days.contains(Weekday::Wed));
/// assert!(!days.contains(Weekday::Sun));
/// assert_eq!(days.to_string(), "MO,WE,FR");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// No day.
    pub const EMPTY: Self = Self(0);

    /// Every day of the week.
    pub const ALL: Self = Self(0b0111_1111);

    /// Builds a set from seven flags, Monday first.
    #[must_use]
    pub fn from_flags(flags: [bool; 7]) -> Self {
        flags
            .iter()
            .zip(WEEK)
            .filter(|(on, _)| **on)
            .fold(Self::EMPTY, |set, (_, day)| set.with(day))
    }

    /// Returns the seven flags, Monday first.
    #[must_use]
    pub fn flags(&self) -> [bool; 7] {
        WEEK.map(|day| self.contains(day))
    }

    /// Returns a copy of this set including `day`.
    #[must_use]
    pub const fn with(self, day: Weekday) -> Self {
        Self(self.0 | (1 << day.num_days_from_monday()))
    }

    /// Returns whether `day` is in the set.
    #[must_use]
    pub const fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    /// Returns true if no day is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if all seven days are set.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Returns the number of days in the set.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the days in the set, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|day| self.contains(*day))
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&day.to_string()[..2].to_uppercase())?;
        }
        Ok(())
    }
}
