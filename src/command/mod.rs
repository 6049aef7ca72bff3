// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mower command definitions.
//!
//! Each command type declares the capability it needs and builds the API
//! request for one mower. Building a request does not touch the network, so
//! every precondition fails before anything is sent.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Capability |
//! |-------------|---------|------------|
//! | [`ActionCommand`] | Start, pause, park, resume | `workAreas` for `StartInWorkArea` |
//! | [`SettingsCommand`] | Cutting height, headlights, clock | `headlights` for `Headlight` |
//! | [`CalendarCommand`] | Replace the weekly schedule | none |
//! | [`StayOutZoneCommand`] | Enable or disable a stay-out zone | `stayOutZones` |
//! | [`WorkAreaCommand`] | Work area cutting height, enable | `workAreas` |
//! | [`ConfirmError`] | Clear a confirmable error | `canConfirmError` |
//! | [`ResetCuttingBladeUsage`] | Reset blade usage statistics | none |
//!
//! # Examples
//!
//! ```
//! use automower_lib::Capabilities;
//! use automower_lib::command::{ActionCommand, Command};
//! use automower_lib::protocol::Method;
//! use automower_lib::types::Minutes;
//!
//! let cmd = ActionCommand::Start { duration: Minutes::new(90).unwrap() };
//! let request = cmd.request("1234", &Capabilities::default()).unwrap();
//!
//! assert_eq!(request.method, Method::Post);
//! assert_eq!(request.path, "mowers/1234/actions");
//! assert_eq!(request.body.unwrap()["data"]["attributes"]["duration"], 90);
//! ```

mod actions;
mod calendar;
mod maintenance;
mod settings;
mod zones;

pub use actions::ActionCommand;
pub use calendar::CalendarCommand;
pub use maintenance::{ConfirmError, ResetCuttingBladeUsage};
pub use settings::SettingsCommand;
pub use zones::{StayOutZoneCommand, WorkAreaChange, WorkAreaCommand};

use crate::capabilities::{Capabilities, Capability};
use crate::error::Result;
use crate::protocol::Request;

/// A command that can be sent to a mower.
pub trait Command {
    /// Returns the capability the mower must have, if any.
    fn required_capability(&self) -> Option<Capability> {
        None
    }

    /// Builds the API request for `mower_id`.
    ///
    /// `capabilities` are the mower's current flags; commands whose endpoint
    /// depends on them (calendars) use them to pick the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be expressed for this mower.
    fn request(&self, mower_id: &str, capabilities: &Capabilities) -> Result<Request>;
}

/// Path of a mower resource.
pub(crate) fn mower_path(mower_id: &str, resource: &str) -> String {
    format!("mowers/{}/{resource}", urlencoding::encode(mower_id))
}
