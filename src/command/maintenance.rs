// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error confirmation and statistics reset.

use super::{Command, mower_path};
use crate::capabilities::{Capabilities, Capability};
use crate::error::Result;
use crate::protocol::Request;

/// Command to confirm a non-fatal mower error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmError;

impl Command for ConfirmError {
    fn required_capability(&self) -> Option<Capability> {
        Some(Capability::CanConfirmError)
    }

    fn request(&self, mower_id: &str, _capabilities: &Capabilities) -> Result<Request> {
        Ok(Request::post(mower_path(mower_id, "errors/confirm"), None))
    }
}

/// Command to reset the cutting blade usage time after a blade change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetCuttingBladeUsage;

impl Command for ResetCuttingBladeUsage {
    fn request(&self, mower_id: &str, _capabilities: &Capabilities) -> Result<Request> {
        Ok(Request::post(
            mower_path(mower_id, "statistics/resetCuttingBladeUsageTime"),
            None,
        ))
    }
}
