// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synchronization of mower state.
//!
//! An [`AutomowerSession`] keeps the state of every mower of an account in
//! memory. Full snapshots come from REST polls; the push channel delivers
//! partial updates in between. Observers registered on the session are
//! notified after every successful poll and every applied push event.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --connect/refresh--> Synchronized --close--> Stopped
//!                                       |    ^
//!                         poll/listen error  refresh/connect
//!                                       v    |
//!                                       Failed
//! ```
//!
//! A failed poll loop is not restarted by `refresh`; `connect` starts a new
//! one.
//!
//! Snapshots are the periodic source of truth. A poll that completes after a
//! push event may overwrite what the event changed if the snapshot is older
//! than the event.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::Utc;
//! use chrono_tz::Europe::Berlin;
//! use automower_lib::protocol::{HttpConfig, StaticToken};
//! use automower_lib::session::AutomowerSession;
//!
//! # async fn example() -> automower_lib::Result<()> {
//! let transport = HttpConfig::new("my-application-key")
//!     .into_transport(StaticToken::new("access-token"))?;
//! let session = AutomowerSession::new(transport);
//! session.connect().await?;
//!
//! for (id, mower) in session.data() {
//!     println!("{id}: {} % battery", mower.battery.battery_percent);
//!     // Calendars are wall-clock times on the mower.
//!     let now = Utc::now().with_timezone(&Berlin);
//!     let timeline = session.timeline(&id, &Berlin, &now)?;
//!     if let Some(next) = timeline.next_after(&now) {
//!         println!("  next run {} - {}", next.start, next.end);
//!     }
//! }
//!
//! session.pause_mowing("c7233734-b219-4287-a173-08e3643f89f0").await?;
//! session.close().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod normalize;

pub use config::SessionConfig;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::command::{
    self, ActionCommand, CalendarCommand, Command, ConfirmError, ResetCuttingBladeUsage,
    SettingsCommand, StayOutZoneCommand, WorkAreaChange, WorkAreaCommand,
};
use crate::error::{ParseError, ProtocolError, Result};
use crate::model::{
    CalendarTask, Message, MowerAttributes, MowerDictionary, decode_messages, decode_mower_list,
};
use crate::protocol::{Frame, FrameStream, Transport};
use crate::state::{EventKind, FleetState, PushEvent};
use crate::subscription::{
    CallbackRegistry, DataCallback, MessageCallback, Notifier, PulseCallback, SubscriptionId,
};
use crate::timeline::Timeline;
use crate::types::{CuttingHeight, HeadlightMode, Minutes, WorkAreaCuttingHeight};

/// Path of the mower list.
const MOWERS_PATH: &str = "mowers";

/// Lifecycle state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No snapshot received yet.
    Uninitialized,
    /// At least one snapshot received.
    Synchronized,
    /// A background loop stopped with an error.
    Failed(String),
    /// The session was closed.
    Stopped,
}

impl SessionState {
    /// Returns true once a snapshot has been received and nothing failed.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        matches!(self, Self::Synchronized)
    }
}

struct SessionInner<T> {
    transport: T,
    config: SessionConfig,
    fleet: RwLock<FleetState>,
    state: RwLock<SessionState>,
    callbacks: CallbackRegistry,
    notifier: Notifier,
    last_pulse: RwLock<Option<DateTime<Utc>>>,
}

/// Client session for one fleet API account.
///
/// Owns the mower state, the background poll and push tasks, and the
/// registered observers.
pub struct AutomowerSession<T: Transport> {
    inner: Arc<SessionInner<T>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Transport> AutomowerSession<T> {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    /// Creates a session with a custom configuration.
    #[must_use]
    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                transport,
                config,
                fleet: RwLock::new(FleetState::new()),
                state: RwLock::new(SessionState::Uninitialized),
                callbacks: CallbackRegistry::new(),
                notifier: Notifier::new(),
                last_pulse: RwLock::new(None),
            }),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Connects the session.
    ///
    /// Notifies every observer with the current state. With polling enabled,
    /// performs one full poll and then starts the background poll loop.
    ///
    /// # Errors
    ///
    /// Returns the transport or decoding error of the initial poll; no poll
    /// loop is started in that case.
    pub async fn connect(&self) -> Result<()> {
        self.inner.notify_data();

        if self.inner.config.poll() {
            self.inner.refresh().await?;
            let inner = Arc::clone(&self.inner);
            self.tasks.lock().push(tokio::spawn(poll_loop(inner)));
            tracing::info!(
                mowers = self.inner.fleet.read().len(),
                interval_secs = self.inner.config.poll_interval().as_secs(),
                "Session connected"
            );
        }
        Ok(())
    }

    /// Polls the mower list once and replaces the stored state.
    ///
    /// Mowers missing from the list are dropped.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or `Error::Parse` if the list does not
    /// decode; the stored state is then unchanged.
    ///
    /// A successful refresh moves an uninitialized or failed session to
    /// `Synchronized`. A stopped session stays stopped.
    pub async fn refresh(&self) -> Result<()> {
        self.inner.refresh().await
    }

    /// Opens the push channel and processes it on a background task.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the channel cannot be opened.
    pub async fn start_listening(&self) -> Result<()> {
        let stream = self.inner.transport.open_stream().await?;
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            if let Err(e) = inner.listen(stream).await {
                tracing::error!(error = %e, "Push listener stopped");
                inner.set_state(SessionState::Failed(e.to_string()));
            }
        });
        self.tasks.lock().push(task);
        Ok(())
    }

    /// Processes `stream` until it closes.
    ///
    /// Malformed messages are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Timeout` if no frame arrives within the
    /// configured read timeout.
    pub async fn listen(&self, stream: FrameStream) -> Result<()> {
        self.inner.listen(stream).await
    }

    /// Processes one push frame and returns whether the state changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the frame holds a malformed event.
    pub fn handle_frame(&self, frame: Frame) -> Result<bool> {
        self.inner.handle_frame(frame)
    }

    /// Processes one push text message and returns whether the state changed.
    ///
    /// Empty text is a liveness pulse. Connection-ready messages are only
    /// logged, and unsupported event types are discarded.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the message is not JSON, lacks its id or
    /// type, or its patch cannot be applied.
    pub fn handle_text(&self, text: &str) -> Result<bool> {
        self.inner.handle_text(text)
    }

    /// Stops every background task and waits for them to finish.
    ///
    /// Calling `close` again does nothing.
    pub async fn close(&self) {
        let tasks = std::mem::take(&mut *self.tasks.lock());
        for task in &tasks {
            task.abort();
        }
        for task in tasks {
            if let Err(e) = task.await
                && !e.is_cancelled()
            {
                tracing::warn!(error = %e, "Background task panicked");
            }
        }
        self.inner.notifier.stop();

        let mut state = self.inner.state.write();
        if *state != SessionState::Stopped {
            tracing::info!("Session closed");
            *state = SessionState::Stopped;
        }
    }

    // ========================================================================
    // State access
    // ========================================================================

    /// Returns the decoded state of every mower.
    #[must_use]
    pub fn data(&self) -> MowerDictionary {
        self.inner.fleet.read().snapshot()
    }

    /// Returns the decoded state of one mower.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown.
    pub fn mower(&self, mower_id: &str) -> Result<MowerAttributes> {
        self.inner.fleet.read().attributes(mower_id).cloned()
    }

    /// Builds the timeline of one mower's calendar in the mower's time zone
    /// `tz`, anchored at `now`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown.
    pub fn timeline<Tz: TimeZone, Z: TimeZone>(
        &self,
        mower_id: &str,
        tz: &Tz,
        now: &DateTime<Z>,
    ) -> Result<Timeline<Tz>> {
        let fleet = self.inner.fleet.read();
        Ok(Timeline::new(fleet.attributes(mower_id)?.tasks(), tz, now))
    }

    /// Fetches the message log of one mower and stores it.
    ///
    /// Returns the log, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown, the
    /// transport error, or `Error::Parse` if the log does not decode.
    pub async fn messages(&self, mower_id: &str) -> Result<Vec<Message>> {
        self.inner.fleet.read().command_precondition(mower_id, None)?;
        let document = self
            .inner
            .transport
            .get_json(&command::mower_path(mower_id, "messages"))
            .await?;
        let messages = decode_messages(&document)?;
        tracing::debug!(mower_id = %mower_id, count = messages.len(), "Message log fetched");
        self.inner
            .fleet
            .write()
            .replace_messages(mower_id, messages.clone())?;
        Ok(messages)
    }

    /// Returns the stored message log of one mower, newest first.
    ///
    /// The log holds the last fetched entries plus those pushed since.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` if the mower is unknown.
    pub fn recent_messages(&self, mower_id: &str) -> Result<Vec<Message>> {
        Ok(self.inner.fleet.read().messages(mower_id)?.to_vec())
    }

    /// Returns when the last liveness pulse arrived.
    #[must_use]
    pub fn last_pulse(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_pulse.read()
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Registers a state observer and schedules it once with the current
    /// state.
    ///
    /// Registering the same callback again returns its id and schedules
    /// nothing.
    pub fn register_data_callback(&self, callback: DataCallback) -> SubscriptionId {
        if let Some(id) = self.inner.callbacks.data_id(&callback) {
            return id;
        }
        let id = self.inner.callbacks.register_data(Arc::clone(&callback));
        self.inner.notify_data_to(vec![callback]);
        id
    }

    /// Unregisters a state observer; returns false if it was not registered.
    pub fn unregister_data_callback(&self, id: SubscriptionId) -> bool {
        self.inner.callbacks.unsubscribe_data(id)
    }

    /// Registers a pulse observer.
    pub fn register_pulse_callback(&self, callback: PulseCallback) -> SubscriptionId {
        self.inner.callbacks.register_pulse(callback)
    }

    /// Unregisters a pulse observer; returns false if it was not registered.
    pub fn unregister_pulse_callback(&self, id: SubscriptionId) -> bool {
        self.inner.callbacks.unsubscribe_pulse(id)
    }

    /// Registers an observer of pushed message log entries.
    pub fn register_message_callback(&self, callback: MessageCallback) -> SubscriptionId {
        self.inner.callbacks.register_message(callback)
    }

    /// Unregisters a message observer; returns false if it was not registered.
    pub fn unregister_message_callback(&self, id: SubscriptionId) -> bool {
        self.inner.callbacks.unsubscribe_message(id)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Sends `command` to a mower.
    ///
    /// Preconditions are checked against the stored state before anything
    /// is sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDataAvailable` for an unknown mower,
    /// `Error::FeatureNotSupported` if the mower lacks the required
    /// capability, the command's own validation error, or the transport
    /// error.
    pub async fn send_command<C: Command + ?Sized>(&self, mower_id: &str, command: &C) -> Result<Value> {
        let request = {
            let fleet = self.inner.fleet.read();
            fleet.command_precondition(mower_id, command.required_capability())?;
            let capabilities = fleet.device(mower_id)?.capabilities();
            command.request(mower_id, &capabilities)?
        };

        tracing::debug!(
            mower_id = %mower_id,
            method = %request.method,
            path = %request.path,
            "Sending command"
        );
        Ok(self.inner.transport.execute(&request).await?)
    }

    async fn send(&self, mower_id: &str, command: impl Command) -> Result<()> {
        self.send_command(mower_id, &command).await.map(|_| ())
    }

    /// Pauses the mower.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command).
    pub async fn pause_mowing(&self, mower_id: &str) -> Result<()> {
        self.send(mower_id, ActionCommand::Pause).await
    }

    /// Drops any override and resumes the calendar.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command).
    pub async fn resume_schedule(&self, mower_id: &str) -> Result<()> {
        self.send(mower_id, ActionCommand::ResumeSchedule).await
    }

    /// Parks the mower until the next scheduled start.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command).
    pub async fn park_until_next_schedule(&self, mower_id: &str) -> Result<()> {
        self.send(mower_id, ActionCommand::ParkUntilNextSchedule).await
    }

    /// Parks the mower until told otherwise.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command).
    pub async fn park_until_further_notice(&self, mower_id: &str) -> Result<()> {
        self.send(mower_id, ActionCommand::ParkUntilFurtherNotice).await
    }

    /// Parks the mower for `duration`, floored to whole minutes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for durations under one minute; see also
    /// [`send_command`](Self::send_command).
    pub async fn park_for(&self, mower_id: &str, duration: Duration) -> Result<()> {
        let duration = Minutes::from_duration(duration)?;
        self.send(mower_id, ActionCommand::Park { duration }).await
    }

    /// Mows for `duration`, floored to whole minutes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for durations under one minute; see also
    /// [`send_command`](Self::send_command).
    pub async fn start_for(&self, mower_id: &str, duration: Duration) -> Result<()> {
        let duration = Minutes::from_duration(duration)?;
        self.send(mower_id, ActionCommand::Start { duration }).await
    }

    /// Mows one work area for `duration`.
    ///
    /// # Errors
    ///
    /// Returns `Error::FeatureNotSupported` without work area support; see
    /// also [`start_for`](Self::start_for).
    pub async fn start_in_work_area(
        &self,
        mower_id: &str,
        work_area_id: u64,
        duration: Duration,
    ) -> Result<()> {
        let duration = Minutes::from_duration(duration)?;
        self.send(
            mower_id,
            ActionCommand::StartInWorkArea {
                work_area_id,
                duration,
            },
        )
        .await
    }

    /// Sets the cutting height level (1-9).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for an out-of-range height; see also
    /// [`send_command`](Self::send_command).
    pub async fn set_cutting_height(&self, mower_id: &str, height: u8) -> Result<()> {
        let height = CuttingHeight::new(height)?;
        self.send(mower_id, SettingsCommand::CuttingHeight(height)).await
    }

    /// Sets the headlight mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::FeatureNotSupported` without headlights; see also
    /// [`send_command`](Self::send_command).
    pub async fn set_headlight_mode(&self, mower_id: &str, mode: HeadlightMode) -> Result<()> {
        self.send(mower_id, SettingsCommand::Headlight(mode)).await
    }

    /// Sets the mower clock to the wall-clock time of `instant`.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command).
    pub async fn set_datetime<Tz: TimeZone>(&self, mower_id: &str, instant: &DateTime<Tz>) -> Result<()> {
        self.send(mower_id, SettingsCommand::date_time(instant)).await
    }

    /// Replaces the calendar.
    ///
    /// # Errors
    ///
    /// Returns `Error::WorkAreasMismatch` if the tasks belong to different
    /// work areas; see also [`send_command`](Self::send_command).
    pub async fn set_calendar(&self, mower_id: &str, tasks: Vec<CalendarTask>) -> Result<()> {
        self.send(mower_id, CalendarCommand::new(tasks)).await
    }

    /// Enables or disables a stay-out zone.
    ///
    /// # Errors
    ///
    /// Returns `Error::FeatureNotSupported` without stay-out zone support;
    /// see also [`send_command`](Self::send_command).
    pub async fn switch_stay_out_zone(&self, mower_id: &str, zone_id: &str, enable: bool) -> Result<()> {
        self.send(mower_id, StayOutZoneCommand::new(zone_id, enable)).await
    }

    /// Sets the cutting height of a work area in percent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for a value above 100 and
    /// `Error::FeatureNotSupported` without work area support.
    pub async fn set_work_area_cutting_height(
        &self,
        mower_id: &str,
        work_area_id: u64,
        percent: u8,
    ) -> Result<()> {
        let height = WorkAreaCuttingHeight::new(percent)?;
        let command = WorkAreaCommand::new(work_area_id, WorkAreaChange::CuttingHeight(height));
        self.send(mower_id, command).await
    }

    /// Enables or disables a work area.
    ///
    /// # Errors
    ///
    /// Returns `Error::FeatureNotSupported` without work area support.
    pub async fn set_work_area_enabled(&self, mower_id: &str, work_area_id: u64, enable: bool) -> Result<()> {
        let command = WorkAreaCommand::new(work_area_id, WorkAreaChange::Enable(enable));
        self.send(mower_id, command).await
    }

    /// Confirms a non-fatal mower error.
    ///
    /// # Errors
    ///
    /// Returns `Error::FeatureNotSupported` if the mower cannot confirm
    /// errors remotely.
    pub async fn confirm_error(&self, mower_id: &str) -> Result<()> {
        self.send(mower_id, ConfirmError).await
    }

    /// Resets the cutting blade usage time.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command).
    pub async fn reset_cutting_blade_usage(&self, mower_id: &str) -> Result<()> {
        self.send(mower_id, ResetCuttingBladeUsage).await
    }
}

impl<T: Transport> Drop for AutomowerSession<T> {
    fn drop(&mut self) {
        for task in self.tasks.get_mut().drain(..) {
            task.abort();
        }
    }
}

impl<T: Transport> std::fmt::Debug for AutomowerSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomowerSession")
            .field("state", &*self.inner.state.read())
            .field("mowers", &self.inner.fleet.read().ids())
            .field("callbacks", &self.inner.callbacks)
            .finish_non_exhaustive()
    }
}

async fn poll_loop<T: Transport>(inner: Arc<SessionInner<T>>) {
    loop {
        tokio::time::sleep(inner.config.poll_interval()).await;
        if let Err(e) = inner.refresh().await {
            tracing::error!(error = %e, "Polling stopped");
            inner.set_state(SessionState::Failed(e.to_string()));
            return;
        }
    }
}

impl<T: Transport> SessionInner<T> {
    fn set_state(&self, state: SessionState) {
        *self.state.write() = state;
    }

    async fn refresh(&self) -> Result<()> {
        let document = self.transport.get_json(MOWERS_PATH).await?;
        let snapshot = decode_mower_list(&document)?;
        let evicted = self.fleet.write().replace_all(snapshot)?;
        for mower_id in &evicted {
            tracing::info!(mower_id = %mower_id, "Mower removed from account");
        }
        tracing::debug!(mowers = self.fleet.read().len(), "Snapshot applied");

        {
            let mut state = self.state.write();
            match &*state {
                SessionState::Uninitialized => *state = SessionState::Synchronized,
                SessionState::Failed(reason) => {
                    tracing::info!(previous_error = %reason, "Session recovered");
                    *state = SessionState::Synchronized;
                }
                SessionState::Synchronized | SessionState::Stopped => {}
            }
        }
        self.notify_data();
        Ok(())
    }

    async fn listen(&self, mut stream: FrameStream) -> Result<()> {
        let timeout = self.config.stream_read_timeout();
        loop {
            let frame = tokio::time::timeout(timeout, stream.next())
                .await
                .map_err(|_| {
                    ProtocolError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
                })?;
            match frame {
                None | Some(Frame::Close) => {
                    tracing::info!("Push channel closed");
                    return Ok(());
                }
                Some(frame) => {
                    if let Err(e) = self.handle_frame(frame) {
                        tracing::warn!(error = %e, "Discarding push message");
                    }
                }
            }
        }
    }

    fn handle_frame(&self, frame: Frame) -> Result<bool> {
        match frame {
            Frame::Text(text) => self.handle_text(&text),
            Frame::Binary(bytes) => match String::from_utf8(bytes) {
                Ok(text) => self.handle_text(&text),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding non UTF-8 push frame");
                    Ok(false)
                }
            },
            Frame::Close => Ok(false),
        }
    }

    fn handle_text(&self, text: &str) -> Result<bool> {
        if text.trim().is_empty() {
            self.pulse();
            return Ok(false);
        }

        let message: Value = serde_json::from_str(text).map_err(ParseError::from)?;
        if let Some(ready) = message.get("ready") {
            tracing::debug!(
                ready = %ready,
                connection_id = message.get("connectionId").and_then(serde_json::Value::as_str).unwrap_or_default(),
                "Push channel ready"
            );
            return Ok(false);
        }

        let event = PushEvent::from_message(&message)?;
        if !event.kind.is_supported() {
            tracing::warn!(event_type = %event.kind, "Received unknown push message type");
            return Ok(false);
        }

        tracing::debug!(mower_id = %event.mower_id, event_type = %event.kind, "Push event received");
        let mower_id = event.mower_id.clone();
        let is_message = event.kind == EventKind::Message;
        let changed = self.apply_event(event)?;
        if changed && is_message {
            self.notify_message(&mower_id);
        } else if changed {
            self.notify_data();
        }
        Ok(changed)
    }

    fn apply_event(&self, mut event: PushEvent) -> Result<bool> {
        let mut fleet = self.fleet.write();
        if let Ok(cached) = fleet.device(&event.mower_id) {
            normalize::normalize(&mut event, cached);
        }
        fleet.apply_event(&event.mower_id, &event.kind, &event.attributes)
    }

    fn pulse(&self) {
        let now = Utc::now();
        *self.last_pulse.write() = Some(now);
        tracing::debug!(at = %now, "Liveness pulse");

        let callbacks = self.callbacks.pulse_callbacks();
        if callbacks.is_empty() {
            return;
        }
        self.notifier.schedule(Box::new(move || {
            for callback in &callbacks {
                callback(now);
            }
        }));
    }

    fn notify_message(&self, mower_id: &str) {
        let callbacks = self.callbacks.message_callbacks();
        if callbacks.is_empty() {
            return;
        }
        let Some(message) = self
            .fleet
            .read()
            .messages(mower_id)
            .ok()
            .and_then(|log| log.first().cloned())
        else {
            return;
        };
        let mower_id = mower_id.to_string();
        self.notifier.schedule(Box::new(move || {
            for callback in &callbacks {
                callback(&mower_id, &message);
            }
        }));
    }

    fn notify_data(&self) {
        self.notify_data_to(self.callbacks.data_callbacks());
    }

    fn notify_data_to(&self, callbacks: Vec<DataCallback>) {
        if callbacks.is_empty() {
            return;
        }
        let snapshot = self.fleet.read().snapshot();
        self.notifier.schedule(Box::new(move || {
            for callback in &callbacks {
                callback(&snapshot);
            }
        }));
    }
}
