// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for session notifications.
//!
//! A session notifies three kinds of observers:
//!
//! - [`DataCallback`] - receives the decoded state of every mower after each
//!   successful poll or applied push event, and once on registration
//! - [`PulseCallback`] - receives the arrival time of each liveness pulse
//! - [`MessageCallback`] - receives each new message log entry pushed by a
//!   mower
//!
//! Callbacks are stored in a [`CallbackRegistry`] and identified by a
//! [`SubscriptionId`]. They run on a dispatcher task rather than inline, so a
//! slow observer never delays state updates.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use automower_lib::model::MowerDictionary;
//! use automower_lib::protocol::{HttpConfig, StaticToken};
//! use automower_lib::session::AutomowerSession;
//!
//! # async fn example() -> automower_lib::Result<()> {
//! let transport = HttpConfig::new("my-application-key")
//!     .into_transport(StaticToken::new("access-token"))?;
//! let session = AutomowerSession::new(transport);
//!
//! let id = session.register_data_callback(Arc::new(|mowers: &MowerDictionary| {
//!     println!("{} mowers updated", mowers.len());
//! }));
//! session.connect().await?;
//!
//! // Later, unregister
//! session.unregister_data_callback(id);
//! # Ok(())
//! # }
//! ```

mod callback;
mod notifier;

pub use callback::{CallbackRegistry, DataCallback, MessageCallback, PulseCallback, SubscriptionId};
pub(crate) use notifier::Notifier;
