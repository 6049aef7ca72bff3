// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session configuration.

use std::time::Duration;

/// Configuration for an [`AutomowerSession`](super::AutomowerSession).
///
/// # Examples
///
/// ```
/// use automower_lib::session::SessionConfig;
/// use std::time::Duration;
///
/// let config = SessionConfig::new()
///     .with_poll_interval(Duration::from_secs(600))
///     .with_stream_read_timeout(Duration::from_secs(120));
///
/// assert!(config.poll());
/// assert_eq!(config.poll_interval(), Duration::from_secs(600));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    poll: bool,
    poll_interval: Duration,
    stream_read_timeout: Duration,
}

impl SessionConfig {
    /// Default interval between REST polls.
    pub const REST_POLL_CYCLE: Duration = Duration::from_secs(300);
    /// Default push channel read timeout.
    pub const DEFAULT_STREAM_READ_TIMEOUT: Duration = Duration::from_secs(300);

    /// Creates the default configuration: polling on, 300 s cycle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            poll: true,
            poll_interval: Self::REST_POLL_CYCLE,
            stream_read_timeout: Self::DEFAULT_STREAM_READ_TIMEOUT,
        }
    }

    /// Enables or disables REST polling.
    ///
    /// Without polling, `connect` performs no request and state is only
    /// filled by explicit [`refresh`](super::AutomowerSession::refresh) calls.
    #[must_use]
    pub fn with_poll(mut self, poll: bool) -> Self {
        self.poll = poll;
        self
    }

    /// Sets the interval between REST polls.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets how long the push listener waits for a frame.
    #[must_use]
    pub fn with_stream_read_timeout(mut self, timeout: Duration) -> Self {
        self.stream_read_timeout = timeout;
        self
    }

    /// Returns whether REST polling is enabled.
    #[must_use]
    pub fn poll(&self) -> bool {
        self.poll
    }

    /// Returns the interval between REST polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the push channel read timeout.
    #[must_use]
    pub fn stream_read_timeout(&self) -> Duration {
        self.stream_read_timeout
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
