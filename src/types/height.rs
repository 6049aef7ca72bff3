// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cutting height values.
//!
//! The mower-wide cutting height is a level between 1 and 9. Work areas
//! carry their own cutting height expressed as a percentage.

use std::fmt;

use crate::error::ValueError;

/// Mower-wide cutting height level (1-9).
///
/// # Examples
///
/// ```
/// use automower_lib::types::CuttingHeight;
///
/// let height = CuttingHeight::new(5).unwrap();
/// assert_eq!(height.value(), 5);
///
/// assert!(CuttingHeight::new(0).is_err());
/// assert!(CuttingHeight::new(10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CuttingHeight(u8);

impl CuttingHeight {
    /// Lowest cutting height level.
    pub const MIN: Self = Self(1);

    /// Highest cutting height level.
    pub const MAX: Self = Self(9);

    /// Creates a new cutting height level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the level is not within 1-9.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: u32::from(Self::MIN.0),
                max: u32::from(Self::MAX.0),
                actual: u64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CuttingHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Work area cutting height as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use automower_lib::types::WorkAreaCuttingHeight;
///
/// let height = WorkAreaCuttingHeight::new(40).unwrap();
/// assert_eq!(height.percent(), 40);
/// assert!(WorkAreaCuttingHeight::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkAreaCuttingHeight(u8);

impl WorkAreaCuttingHeight {
    /// Creates a new work area cutting height.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the percentage exceeds 100.
    pub fn new(percent: u8) -> Result<Self, ValueError> {
        if percent > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u64::from(percent),
            });
        }
        Ok(Self(percent))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for WorkAreaCuttingHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
