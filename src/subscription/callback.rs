// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for session subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unregistering
//! - [`CallbackRegistry`] - Registry for data, pulse and message callbacks

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::model::{Message, MowerDictionary};

/// Unique identifier for a subscription.
///
/// IDs are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Callback receiving the decoded state of every mower.
pub type DataCallback = Arc<dyn Fn(&MowerDictionary) + Send + Sync>;

/// Callback receiving the arrival time of a liveness pulse.
pub type PulseCallback = Arc<dyn Fn(DateTime<Utc>) + Send + Sync>;

/// Callback receiving a mower id and a new entry of its message log.
pub type MessageCallback = Arc<dyn Fn(&str, &Message) + Send + Sync>;

type Entries<C> = RwLock<Vec<(SubscriptionId, C)>>;

/// Registry of session callbacks.
///
/// Callbacks are identified by their `Arc`: registering a callback that is
/// already present returns its existing id and adds nothing. Callbacks are
/// kept in registration order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use automower_lib::model::MowerDictionary;
/// use automower_lib::subscription::{CallbackRegistry, DataCallback};
///
/// let registry = CallbackRegistry::new();
/// let callback: DataCallback = Arc::new(|mowers: &MowerDictionary| println!("{} mowers", mowers.len()));
///
/// let id = registry.register_data(Arc::clone(&callback));
/// assert_eq!(registry.register_data(callback), id);
/// assert_eq!(registry.callback_count(), 1);
///
/// assert!(registry.unsubscribe(id));
/// assert!(!registry.unsubscribe(id));
/// ```
pub struct CallbackRegistry {
    next_id: AtomicU64,
    data_callbacks: Entries<DataCallback>,
    pulse_callbacks: Entries<PulseCallback>,
    message_callbacks: Entries<MessageCallback>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            data_callbacks: RwLock::new(Vec::new()),
            pulse_callbacks: RwLock::new(Vec::new()),
            message_callbacks: RwLock::new(Vec::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a state callback and returns its id.
    pub fn register_data(&self, callback: DataCallback) -> SubscriptionId {
        let mut callbacks = self.data_callbacks.write();
        if let Some(id) = find(callbacks.as_slice(), &callback) {
            return id;
        }
        let id = self.next_id();
        callbacks.push((id, callback));
        id
    }

    /// Registers a pulse callback and returns its id.
    pub fn register_pulse(&self, callback: PulseCallback) -> SubscriptionId {
        let mut callbacks = self.pulse_callbacks.write();
        if let Some(id) = find(callbacks.as_slice(), &callback) {
            return id;
        }
        let id = self.next_id();
        callbacks.push((id, callback));
        id
    }

    /// Registers a message callback and returns its id.
    pub fn register_message(&self, callback: MessageCallback) -> SubscriptionId {
        let mut callbacks = self.message_callbacks.write();
        if let Some(id) = find(callbacks.as_slice(), &callback) {
            return id;
        }
        let id = self.next_id();
        callbacks.push((id, callback));
        id
    }

    /// Returns the id of an already registered state callback.
    #[must_use]
    pub fn data_id(&self, callback: &DataCallback) -> Option<SubscriptionId> {
        find(self.data_callbacks.read().as_slice(), callback)
    }

    /// Returns the id of an already registered pulse callback.
    #[must_use]
    pub fn pulse_id(&self, callback: &PulseCallback) -> Option<SubscriptionId> {
        find(self.pulse_callbacks.read().as_slice(), callback)
    }

    /// Unregisters a callback of either kind by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.unsubscribe_data(id) || self.unsubscribe_pulse(id) || self.unsubscribe_message(id)
    }

    /// Unregisters a state callback; pulse callbacks are left alone.
    pub fn unsubscribe_data(&self, id: SubscriptionId) -> bool {
        remove(&self.data_callbacks, id)
    }

    /// Unregisters a pulse callback; state callbacks are left alone.
    pub fn unsubscribe_pulse(&self, id: SubscriptionId) -> bool {
        remove(&self.pulse_callbacks, id)
    }

    /// Unregisters a message callback.
    pub fn unsubscribe_message(&self, id: SubscriptionId) -> bool {
        remove(&self.message_callbacks, id)
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.data_callbacks.write().clear();
        self.pulse_callbacks.write().clear();
        self.message_callbacks.write().clear();
    }

    // =========================================================================
    // Snapshots for dispatch
    // =========================================================================

    /// Returns the registered state callbacks in registration order.
    #[must_use]
    pub fn data_callbacks(&self) -> Vec<DataCallback> {
        self.data_callbacks
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect()
    }

    /// Returns the registered pulse callbacks in registration order.
    #[must_use]
    pub fn pulse_callbacks(&self) -> Vec<PulseCallback> {
        self.pulse_callbacks
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect()
    }

    /// Returns the registered message callbacks in registration order.
    #[must_use]
    pub fn message_callbacks(&self) -> Vec<MessageCallback> {
        self.message_callbacks
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect()
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.data_callbacks.read().len()
            + self.pulse_callbacks.read().len()
            + self.message_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

fn find<C: ?Sized>(entries: &[(SubscriptionId, Arc<C>)], callback: &Arc<C>) -> Option<SubscriptionId> {
    entries
        .iter()
        .find(|(_, existing)| Arc::ptr_eq(existing, callback))
        .map(|(id, _)| *id)
}

fn remove<C>(entries: &Entries<C>, id: SubscriptionId) -> bool {
    let mut entries = entries.write();
    let before = entries.len();
    entries.retain(|(existing, _)| *existing != id);
    entries.len() != before
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use super::*;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let registry = CallbackRegistry::new();
        let callback: PulseCallback = Arc::new(|_: DateTime<Utc>| {});

        let first = registry.register_pulse(Arc::clone(&callback));
        let second = registry.register_pulse(Arc::clone(&callback));

        assert_eq!(first, second);
        assert_eq!(registry.pulse_callbacks().len(), 1);
        assert_eq!(registry.pulse_id(&callback), Some(first));
    }

    #[test]
    fn distinct_closures_get_distinct_ids() {
        let registry = CallbackRegistry::new();
        let a = registry.register_data(Arc::new(|_: &MowerDictionary| {}));
        let b = registry.register_data(Arc::new(|_: &MowerDictionary| {}));
        assert_ne!(a, b);
        assert_eq!(registry.callback_count(), 2);
    }

    #[test]
    fn callbacks_are_kept_in_order() {
        let registry = CallbackRegistry::new();
        let calls = Arc::new(RwLock::new(Vec::new()));
        for n in 0..3 {
            let calls = Arc::clone(&calls);
            registry.register_data(Arc::new(move |_: &MowerDictionary| calls.write().push(n)));
        }

        let mowers = MowerDictionary::new();
        for callback in registry.data_callbacks() {
            callback(&mowers);
        }
        assert_eq!(*calls.read(), vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribe_removes_callback() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);
        let id = registry.register_pulse(Arc::new(move |_: DateTime<Utc>| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());
        assert!(registry.pulse_callbacks().is_empty());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_by_kind_ignores_the_other_kind() {
        let registry = CallbackRegistry::new();
        let data = registry.register_data(Arc::new(|_: &MowerDictionary| {}));
        let pulse = registry.register_pulse(Arc::new(|_: DateTime<Utc>| {}));

        let message = registry.register_message(Arc::new(|_: &str, _: &Message| {}));

        assert!(!registry.unsubscribe_data(pulse));
        assert!(!registry.unsubscribe_pulse(data));
        assert!(!registry.unsubscribe_message(data));
        assert_eq!(registry.callback_count(), 3);

        assert!(registry.unsubscribe_pulse(pulse));
        assert!(registry.unsubscribe_data(data));
        assert!(registry.unsubscribe(message));
        assert!(registry.is_empty());
    }

    #[test]
    fn unsubscribe_unknown_is_false() {
        let registry = CallbackRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(99)));
    }

    #[test]
    fn clear_removes_everything() {
        let registry = CallbackRegistry::new();
        registry.register_data(Arc::new(|_: &MowerDictionary| {}));
        registry.register_pulse(Arc::new(|_: DateTime<Utc>| {}));
        registry.register_message(Arc::new(|_: &str, _: &Message| {}));
        assert_eq!(registry.callback_count(), 3);
        registry.clear();
        assert!(registry.is_empty());
    }
}
