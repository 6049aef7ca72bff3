// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mower capability flags.
//!
//! Every mower reports which optional feature families it supports. Commands
//! that target one of these families declare a [`Capability`] and are rejected
//! with [`Error::FeatureNotSupported`](crate::Error::FeatureNotSupported)
//! before any request is built when the flag is off.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability flags reported by a mower.
///
/// # Examples
///
/// ```
/// use automower_lib::{Capabilities, Capability};
///
/// let caps = Capabilities {
///     headlights: true,
///     ..Capabilities::default()
/// };
/// assert!(caps.supports(Capability::Headlights));
/// assert!(!caps.supports(Capability::WorkAreas));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
// Each flag is an independent feature gate reported by the API.
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// The mower error can be confirmed remotely.
    pub can_confirm_error: bool,

    /// The mower has controllable headlights.
    pub headlights: bool,

    /// The mower reports GPS positions.
    pub position: bool,

    /// The mower supports stay-out zones.
    pub stay_out_zones: bool,

    /// The mower supports work areas.
    pub work_areas: bool,
}

impl Capabilities {
    /// Returns whether the given command family is permitted.
    #[must_use]
    pub const fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::CanConfirmError => self.can_confirm_error,
            Capability::Headlights => self.headlights,
            Capability::Position => self.position,
            Capability::StayOutZones => self.stay_out_zones,
            Capability::WorkAreas => self.work_areas,
        }
    }
}

/// A command family gated by a capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Remote error confirmation.
    CanConfirmError,
    /// Headlight control.
    Headlights,
    /// Position reporting.
    Position,
    /// Stay-out zone switching.
    StayOutZones,
    /// Work area commands and work area calendars.
    WorkAreas,
}

impl Capability {
    /// Returns the snake_case name of the capability.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CanConfirmError => "can_confirm_error",
            Self::Headlights => "headlights",
            Self::Position => "position",
            Self::StayOutZones => "stay_out_zones",
            Self::WorkAreas => "work_areas",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
