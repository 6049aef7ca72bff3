// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for mower commands and schedules.
//!
//! Each type checks its range at construction time, so a command built from
//! these values is always accepted by the API's validation.
//!
//! # Types
//!
//! - [`CuttingHeight`] - Mower-wide cutting height level (1-9)
//! - [`WorkAreaCuttingHeight`] - Work area cutting height (0-100%)
//! - [`HeadlightMode`] - Headlight operating mode
//! - [`Minutes`] - Action duration floored to whole minutes
//! - [`DaySet`] - Weekdays a calendar task runs on
//! - [`MowerLocalTime`] - Timestamp on the mower's wall clock

mod day_set;
mod headlight;
mod height;
mod local_time;
mod minutes;

pub use day_set::DaySet;
pub use headlight::HeadlightMode;
pub use height::{CuttingHeight, WorkAreaCuttingHeight};
pub use local_time::MowerLocalTime;
pub(crate) use local_time::resolve_local;
pub use minutes::Minutes;
