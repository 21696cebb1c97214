//! Subscriber registry for the store's three observables.
//!
//! Each observable (preference, resolved, system) keeps an ordered list
//! of `(id, callback)` pairs. Removal is by id, not callback equality,
//! so registering the same closure twice yields two independent
//! registrations. Notification snapshots the list and invokes callbacks
//! with no registry lock held, so a callback may freely subscribe,
//! unsubscribe, or re-enter the store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::theme::{ColorMode, Preference};

pub(crate) type PreferenceCallback = Arc<dyn Fn(Preference) + Send + Sync>;
pub(crate) type ModeCallback = Arc<dyn Fn(ColorMode) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObservableKind {
    Preference,
    Resolved,
    System,
}

#[derive(Default)]
pub(crate) struct SubscriberSet {
    next_id: AtomicU64,
    preference: Mutex<Vec<(u64, PreferenceCallback)>>,
    resolved: Mutex<Vec<(u64, ModeCallback)>>,
    system: Mutex<Vec<(u64, ModeCallback)>>,
}

impl SubscriberSet {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn add_preference(set: &Arc<Self>, callback: PreferenceCallback) -> Subscription {
        let id = set.next_id();
        set.preference.lock().unwrap().push((id, callback));
        Subscription::new(id, ObservableKind::Preference, Arc::downgrade(set))
    }

    pub(crate) fn add_resolved(set: &Arc<Self>, callback: ModeCallback) -> Subscription {
        let id = set.next_id();
        set.resolved.lock().unwrap().push((id, callback));
        Subscription::new(id, ObservableKind::Resolved, Arc::downgrade(set))
    }

    pub(crate) fn add_system(set: &Arc<Self>, callback: ModeCallback) -> Subscription {
        let id = set.next_id();
        set.system.lock().unwrap().push((id, callback));
        Subscription::new(id, ObservableKind::System, Arc::downgrade(set))
    }

    pub(crate) fn notify_preference(&self, value: Preference) {
        let snapshot: Vec<PreferenceCallback> = {
            let list = self.preference.lock().unwrap();
            list.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in snapshot {
            callback(value);
        }
    }

    pub(crate) fn notify_resolved(&self, value: ColorMode) {
        let snapshot: Vec<ModeCallback> = {
            let list = self.resolved.lock().unwrap();
            list.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in snapshot {
            callback(value);
        }
    }

    pub(crate) fn notify_system(&self, value: ColorMode) {
        let snapshot: Vec<ModeCallback> = {
            let list = self.system.lock().unwrap();
            list.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in snapshot {
            callback(value);
        }
    }

    fn remove(&self, kind: ObservableKind, id: u64) {
        match kind {
            ObservableKind::Preference => {
                self.preference.lock().unwrap().retain(|(i, _)| *i != id)
            }
            ObservableKind::Resolved => self.resolved.lock().unwrap().retain(|(i, _)| *i != id),
            ObservableKind::System => self.system.lock().unwrap().retain(|(i, _)| *i != id),
        }
    }
}

/// Handle for one store subscription.
///
/// Call [`Subscription::unsubscribe`] to remove the listener; calling it
/// again is a no-op. Dropping the handle unsubscribes as well, so every
/// registration is paired with a removal even when the owner forgets.
/// Use [`Subscription::leak`] for listeners that should outlive the
/// handle.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    kind: ObservableKind,
    set: Weak<SubscriberSet>,
    active: bool,
}

impl Subscription {
    fn new(id: u64, kind: ObservableKind, set: Weak<SubscriberSet>) -> Self {
        Self {
            id,
            kind,
            set,
            active: true,
        }
    }

    /// Removes exactly this listener. Safe to call repeatedly.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(set) = self.set.upgrade() {
            set.remove(self.kind, self.id);
        }
    }

    /// True until the first [`Subscription::unsubscribe`] (or leak).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Detaches the handle, leaving the listener registered for the
    /// store's lifetime.
    pub fn leak(mut self) {
        self.active = false;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
