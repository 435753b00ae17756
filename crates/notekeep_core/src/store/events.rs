//! Change notification for store observers.
//!
//! # Invariants
//! - Events are emitted only after the change is durably persisted.
//! - Observers run in subscription order on the caller's thread.

use crate::model::note::{Note, NoteId};
use std::collections::BTreeMap;

/// Change emitted by `NoteStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Collection was replaced by `load`.
    Loaded { count: usize },
    Created(Note),
    Updated(Note),
    Deleted(NoteId),
}

/// Handle returned by `NoteStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Registry of change observers keyed by subscription id.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    observers: BTreeMap<SubscriptionId, Observer>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, observer);
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn notify(&mut self, event: &StoreEvent) {
        for observer in self.observers.values_mut() {
            observer(event);
        }
    }
}
