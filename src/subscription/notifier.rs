// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fire-and-forget callback delivery.

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type Job = Box<dyn FnOnce() + Send>;

/// Runs callback jobs on a dedicated task, in scheduling order.
///
/// Scheduling never blocks or waits for the callbacks. The dispatcher task
/// starts with the first job scheduled inside a Tokio runtime; jobs
/// scheduled before that are queued.
pub(crate) struct Notifier {
    tx: mpsc::UnboundedSender<Job>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<Job>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Notifier {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
            task: Mutex::new(None),
        }
    }

    /// Queues `job` behind every job scheduled before it.
    pub(crate) fn schedule(&self, job: Job) {
        if self.tx.send(job).is_err() {
            tracing::debug!("Notifier stopped, dropping callback");
            return;
        }
        self.ensure_started();
    }

    fn ensure_started(&self) {
        let mut rx = self.rx.lock();
        if rx.is_none() {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        if let Some(mut jobs) = rx.take() {
            let task = handle.spawn(async move {
                while let Some(job) = jobs.recv().await {
                    job();
                }
            });
            *self.task.lock() = Some(task);
        }
    }

    /// Stops delivering; queued jobs are dropped.
    pub(crate) fn stop(&self) {
        self.rx.lock().take();
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("started", &self.task.lock().is_some())
            .finish_non_exhaustive()
    }
}
