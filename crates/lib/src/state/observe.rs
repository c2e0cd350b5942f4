//! Event recorders for documents and root maps.
//!
//! A recorder owns its `yrs` subscription; dropping the recorder stops the
//! recording.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use yrs::types::EntryChange;
use yrs::{Doc, MapRef, Observable, Subscription, TransactionMut};

use super::StateError;
use crate::Result;

fn lock<T>(records: &Mutex<T>) -> MutexGuard<'_, T> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Records every v1 update a document emits.
///
/// `yrs` emits an update per committed transaction that changed the document,
/// whether or not the change is visible in the document's contents.
pub struct UpdateRecorder {
    updates: Arc<Mutex<Vec<Vec<u8>>>>,
    _subscription: Subscription,
}

impl UpdateRecorder {
    /// Starts recording the updates emitted by `doc`.
    pub fn attach(doc: &Doc) -> Result<Self> {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&updates);

        let subscription = doc
            .observe_update_v1(move |_txn, event| {
                lock(&sink).push(event.update.clone());
            })
            .map_err(|e| StateError::Subscribe {
                reason: format!("{e:?}"),
            })?;

        Ok(Self {
            updates,
            _subscription: subscription,
        })
    }

    /// Number of updates recorded so far.
    pub fn count(&self) -> usize {
        lock(&self.updates).len()
    }

    /// The recorded updates, oldest first.
    pub fn updates(&self) -> Vec<Vec<u8>> {
        lock(&self.updates).clone()
    }
}

/// How a single map key changed in one event.
///
/// Values are rendered with the library's string conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyChange {
    Added { new: String },
    Updated { old: String, new: String },
    Removed { old: String },
}

impl KeyChange {
    fn from_entry(change: &EntryChange, txn: &TransactionMut) -> Self {
        match change {
            EntryChange::Inserted(new) => KeyChange::Added {
                new: new.clone().to_string(txn),
            },
            EntryChange::Updated(old, new) => KeyChange::Updated {
                old: old.clone().to_string(txn),
                new: new.clone().to_string(txn),
            },
            EntryChange::Removed(old) => KeyChange::Removed {
                old: old.clone().to_string(txn),
            },
        }
    }

    /// Whether the change alters what a reader of the map sees.
    ///
    /// An update writing the value already present is reported by the library
    /// like any other update; this is the only way to tell it apart.
    pub fn is_visible(&self) -> bool {
        match self {
            KeyChange::Updated { old, new } => old != new,
            KeyChange::Added { .. } | KeyChange::Removed { .. } => true,
        }
    }
}

/// Key changes carried by one map event, sorted by key.
pub type KeyChanges = Vec<(String, KeyChange)>;

/// Records the key changes of every event fired by a root map.
pub struct MapChangeRecorder {
    events: Arc<Mutex<Vec<KeyChanges>>>,
    _subscription: Subscription,
}

impl MapChangeRecorder {
    /// Starts recording the events fired by `map`.
    pub fn attach(map: &MapRef) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let subscription = map.observe(move |txn, event| {
            let mut changes: KeyChanges = event
                .keys(txn)
                .iter()
                .map(|(key, change)| (key.to_string(), KeyChange::from_entry(change, txn)))
                .collect();
            changes.sort_by(|a, b| a.0.cmp(&b.0));
            lock(&sink).push(changes);
        });

        Self {
            events,
            _subscription: subscription,
        }
    }

    /// Number of events recorded so far.
    pub fn count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Number of events with at least one visible change.
    pub fn visible_count(&self) -> usize {
        lock(&self.events)
            .iter()
            .filter(|event| event.iter().any(|(_, change)| change.is_visible()))
            .count()
    }

    /// The recorded events, oldest first.
    pub fn events(&self) -> Vec<KeyChanges> {
        lock(&self.events).clone()
    }
}
