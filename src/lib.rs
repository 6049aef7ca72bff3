// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Automower Lib - client core for the Husqvarna Automower Connect API.
//!
//! This library keeps the state of every robotic mower of an account in
//! memory and sends commands to them.
//!
//! # Supported Features
//!
//! - **Synchronization**: periodic REST snapshots merged with push events
//! - **Calendars**: weekly mowing tasks expanded into a merged timeline
//! - **Commands**: mowing actions, settings, calendars, zones, work areas
//! - **Capability checks**: commands a mower cannot execute fail before
//!   any request is sent
//!
//! # Quick Start
//!
//! ## Polling a fleet
//!
//! ```no_run
//! use automower_lib::protocol::{HttpConfig, StaticToken};
//! use automower_lib::AutomowerSession;
//!
//! #[tokio::main]
//! async fn main() -> automower_lib::Result<()> {
//!     let transport = HttpConfig::new("my-application-key")
//!         .into_transport(StaticToken::new("access-token"))?;
//!     let session = AutomowerSession::new(transport);
//!     session.connect().await?;
//!
//!     for (id, mower) in session.data() {
//!         println!("{id}: {:?}, {} %", mower.mower.activity, mower.battery.battery_percent);
//!     }
//!
//!     session.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Upcoming mowing windows
//!
//! ```no_run
//! use chrono::{TimeDelta, Utc};
//! use chrono_tz::Europe::Berlin;
//! use automower_lib::protocol::{HttpConfig, StaticToken};
//! use automower_lib::AutomowerSession;
//!
//! #[tokio::main]
//! async fn main() -> automower_lib::Result<()> {
//!     let transport = HttpConfig::new("my-application-key")
//!         .into_transport(StaticToken::new("access-token"))?;
//!     let session = AutomowerSession::new(transport);
//!     session.refresh().await?;
//!
//!     let now = Utc::now().with_timezone(&Berlin);
//!     let week = now + TimeDelta::days(7);
//!     for id in session.data().keys() {
//!         let timeline = session.timeline(id, &Berlin, &now)?;
//!         for occurrence in timeline.overlapping(&now, &week) {
//!             println!("{id}: {} - {}", occurrence.start, occurrence.end);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Capability-gated commands
//!
//! ```no_run
//! use automower_lib::{AutomowerSession, Error};
//! use automower_lib::protocol::{HttpConfig, StaticToken};
//! use automower_lib::types::HeadlightMode;
//!
//! #[tokio::main]
//! async fn main() -> automower_lib::Result<()> {
//!     let transport = HttpConfig::new("my-application-key")
//!         .into_transport(StaticToken::new("access-token"))?;
//!     let session = AutomowerSession::new(transport);
//!     session.refresh().await?;
//!
//!     match session.set_headlight_mode("mower-id", HeadlightMode::EveningOnly).await {
//!         Err(Error::FeatureNotSupported { capability }) => {
//!             println!("mower has no {capability:?}");
//!         }
//!         other => other?,
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Push events
//!
//! Push frames reach the session through [`Transport::open_stream`]
//! (see [`AutomowerSession::start_listening`]) or are fed directly with
//! [`AutomowerSession::handle_text`].
//!
//! [`Transport::open_stream`]: protocol::Transport::open_stream

mod capabilities;
pub mod command;
pub mod error;
pub mod model;
pub mod protocol;
pub mod session;
pub mod state;
pub mod subscription;
pub mod timeline;
pub mod types;

pub use capabilities::{Capabilities, Capability};
pub use command::Command;
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use model::{MowerAttributes, MowerDictionary};
pub use session::{AutomowerSession, SessionConfig, SessionState};
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use timeline::{Occurrence, Timeline};
