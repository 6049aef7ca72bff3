// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-minute durations for mower actions.

use std::time::Duration;

use crate::error::ValueError;

/// A command duration in whole minutes.
///
/// The API only accepts minutes. Conversion from a [`Duration`] floors to the
/// whole minute, so 30 minutes and 59 seconds become 30 minutes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use automower_lib::types::Minutes;
///
/// let minutes = Minutes::from_duration(Duration::from_secs(30 * 60 + 59)).unwrap();
/// assert_eq!(minutes.get(), 30);
///
/// assert!(Minutes::from_duration(Duration::from_secs(59)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Minutes(u64);

impl Minutes {
    /// Creates a duration of `minutes` minutes.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::DurationTooShort` for zero.
    pub fn new(minutes: u64) -> Result<Self, ValueError> {
        if minutes == 0 {
            return Err(ValueError::DurationTooShort);
        }
        Ok(Self(minutes))
    }

    /// Converts a duration, flooring to whole minutes.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::DurationTooShort` if the duration is under a minute.
    pub fn from_duration(duration: Duration) -> Result<Self, ValueError> {
        Self::new(duration.as_secs() / 60)
    }

    /// Returns the number of minutes.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl TryFrom<Duration> for Minutes {
    type Error = ValueError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::from_duration(duration)
    }
}
