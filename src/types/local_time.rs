// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mower wall-clock timestamps.
//!
//! The fleet API encodes timestamps such as the next planned start as epoch
//! values anchored in the mower's *local* time, not in UTC. A value decoded
//! from such a field is therefore only a wall-clock reading; turning it into
//! an absolute instant needs the mower's time zone, which callers pass
//! explicitly.
//!
//! # Examples
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use automower_lib::types::MowerLocalTime;
//!
//! // 2024-05-04 12:00 on the mower's clock
//! let local = MowerLocalTime::from_api_timestamp(1_714_824_000_000).unwrap();
//! let berlin_summer = FixedOffset::east_opt(2 * 3600).unwrap();
//!
//! let instant = local.in_timezone(&berlin_summer);
//! assert_eq!(instant.to_rfc3339(), "2024-05-04T12:00:00+02:00");
//! ```

use std::fmt;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone};

/// Epoch values above this are milliseconds (year 3000 in seconds).
const MILLIS_THRESHOLD: i64 = 32_503_680_000;

/// A timestamp on the mower's local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MowerLocalTime(NaiveDateTime);

impl MowerLocalTime {
    /// Wraps a wall-clock reading.
    #[must_use]
    pub const fn new(naive: NaiveDateTime) -> Self {
        Self(naive)
    }

    /// Decodes an API epoch value in seconds or milliseconds.
    ///
    /// Returns `None` for `0`, which the API uses for "not set", and for
    /// values chrono cannot represent.
    #[must_use]
    pub fn from_api_timestamp(value: i64) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let utc = if value > MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(value)
        } else {
            DateTime::from_timestamp(value, 0)
        }?;
        Some(Self(utc.naive_utc()))
    }

    /// Reads the wall clock of a zoned instant.
    #[must_use]
    pub fn from_zoned<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.naive_local())
    }

    /// Returns the API epoch value in seconds.
    #[must_use]
    pub fn api_timestamp(&self) -> i64 {
        self.0.and_utc().timestamp()
    }

    /// Returns the wall-clock reading.
    #[must_use]
    pub const fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Resolves the wall-clock reading in the given time zone.
    #[must_use]
    pub fn in_timezone<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        resolve_local(tz, self.0)
    }
}

impl fmt::Display for MowerLocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

/// Maps a local wall-clock time onto an instant.
///
/// Ambiguous times (DST fall back) pick the earlier instant. Times inside a
/// DST gap move forward by the gap, one hour in every zone the mowers ship to.
pub(crate) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => at,
        LocalResult::None => {
            let shifted = naive + TimeDelta::hours(1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => at,
                LocalResult::None => tz.from_utc_datetime(&naive),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, Utc};

    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn zero_means_unset() {
        assert!(MowerLocalTime::from_api_timestamp(0).is_none());
    }

    #[test]
    fn seconds_and_millis_decode_to_same_clock() {
        let secs = MowerLocalTime::from_api_timestamp(1_685_923_200).unwrap();
        let millis = MowerLocalTime::from_api_timestamp(1_685_923_200_000).unwrap();
        assert_eq!(secs, millis);
        assert_eq!(secs.naive(), naive(2023, 6, 5, 0, 0));
    }

    #[test]
    fn resolution_uses_given_zone() {
        let local = MowerLocalTime::new(naive(2024, 1, 1, 10, 0));
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            local.in_timezone(&plus_one).with_timezone(&Utc).naive_utc(),
            naive(2024, 1, 1, 9, 0)
        );
        assert_eq!(local.in_timezone(&Utc).naive_utc(), naive(2024, 1, 1, 10, 0));
    }

    #[test]
    fn zoned_wall_clock_round_trips_to_api_seconds() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = tz.from_local_datetime(&naive(2024, 5, 4, 8, 0)).unwrap();
        let local = MowerLocalTime::from_zoned(&at);
        assert_eq!(local.api_timestamp(), naive(2024, 5, 4, 8, 0).and_utc().timestamp());
    }

    #[test]
    fn spring_forward_gap_moves_one_hour_later() {
        let berlin = chrono_tz::Europe::Berlin;
        let at = resolve_local(&berlin, naive(2024, 3, 31, 2, 30));
        assert_eq!(at.to_rfc3339(), "2024-03-31T03:30:00+02:00");
    }

    #[test]
    fn fall_back_fold_picks_earlier_instant() {
        let berlin = chrono_tz::Europe::Berlin;
        let at = resolve_local(&berlin, naive(2024, 10, 27, 2, 30));
        assert_eq!(at.to_rfc3339(), "2024-10-27T02:30:00+02:00");
        assert_eq!(at.with_timezone(&Utc).naive_utc(), naive(2024, 10, 27, 0, 30));
    }

    #[test]
    fn wall_clock_in_named_zone() {
        let local = MowerLocalTime::new(naive(2024, 10, 27, 2, 30));
        let winter = MowerLocalTime::new(naive(2024, 12, 1, 2, 30));
        let berlin = chrono_tz::Europe::Berlin;
        assert_eq!(local.in_timezone(&berlin).to_rfc3339(), "2024-10-27T02:30:00+02:00");
        assert_eq!(winter.in_timezone(&berlin).to_rfc3339(), "2024-12-01T02:30:00+01:00");
    }
}
