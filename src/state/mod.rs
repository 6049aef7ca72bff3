// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mower state management types.
//!
//! Each mower's state is kept as a raw [`AttributeTree`] and its decoded
//! [`MowerAttributes`](crate::model::MowerAttributes), wrapped in a
//! [`DeviceState`]. Push events patch the raw tree according to their
//! [`EventKind`]; [`FleetState`] holds the state of every mower.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use automower_lib::state::{EventKind, FleetState};
//!
//! let mut fleet = FleetState::new();
//! fleet.replace_snapshot("1234", json!({ "settings": { "cuttingHeight": 3 } })).unwrap();
//!
//! fleet
//!     .apply_event("1234", &EventKind::CuttingHeight, &json!({ "cuttingHeight": { "height": 6 } }))
//!     .unwrap();
//!
//! assert_eq!(fleet.attributes("1234").unwrap().settings.cutting_height, Some(6));
//! ```

mod attribute_tree;
mod device_state;
mod event;
mod fleet;

pub use attribute_tree::AttributeTree;
pub use device_state::{DeviceState, MAX_MESSAGES, MAX_POSITIONS};
pub use event::{EventKind, PushEvent};
pub use fleet::FleetState;
