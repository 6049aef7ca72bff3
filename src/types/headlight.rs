// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Headlight modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Headlight operating mode.
///
/// Serialized in the API's upper snake case form (`ALWAYS_ON`).
///
/// # Examples
///
/// ```
/// use automower_lib::types::HeadlightMode;
///
/// let mode: HeadlightMode = "evening_only".parse().unwrap();
/// assert_eq!(mode, HeadlightMode::EveningOnly);
/// assert_eq!(mode.as_api_str(), "EVENING_ONLY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeadlightMode {
    /// Lights on whenever the mower operates.
    AlwaysOn,
    /// Lights never on.
    AlwaysOff,
    /// Lights on in the evening.
    EveningOnly,
    /// Lights on in the evening and at night.
    EveningAndNight,
}

impl HeadlightMode {
    /// Returns the API representation.
    #[must_use]
    pub const fn as_api_str(&self) -> &'static str {
        match self {
            Self::AlwaysOn => "ALWAYS_ON",
            Self::AlwaysOff => "ALWAYS_OFF",
            Self::EveningOnly => "EVENING_ONLY",
            Self::EveningAndNight => "EVENING_AND_NIGHT",
        }
    }
}

impl fmt::Display for HeadlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_api_str().to_lowercase())
    }
}

impl FromStr for HeadlightMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALWAYS_ON" => Ok(Self::AlwaysOn),
            "ALWAYS_OFF" => Ok(Self::AlwaysOff),
            "EVENING_ONLY" => Ok(Self::EveningOnly),
            "EVENING_AND_NIGHT" => Ok(Self::EveningAndNight),
            _ => Err(ValueError::InvalidHeadlightMode(s.to_string())),
        }
    }
}
