//! Authoritative note collection with synchronous snapshot persistence.
//!
//! # Responsibility
//! - Own the in-memory note collection and mediate every read and write.
//! - Persist a full snapshot under one key before a mutation returns.
//! - Notify subscribers after each successful change.
//!
//! # Invariants
//! - Note ids are unique within the collection.
//! - `last_modified` never moves backwards for a given note.
//! - A mutation whose snapshot write fails is rolled back in memory, so the
//!   collection always equals the last successfully written snapshot.
//! - `load` never fails; recovery is reported through `LoadStatus`.

use crate::config::StoreConfig;
use crate::kv::KvStore;
use crate::model::note::{Note, NoteId};
use crate::search::filter::filter_notes;
use crate::store::clock::{Clock, SystemClock};
use crate::store::error::{StoreError, StoreResult};
use crate::store::events::{Observers, StoreEvent, SubscriptionId};
use crate::store::snapshot::{decode_snapshot, encode_snapshot};
use log::{debug, error, info, warn};
use uuid::Uuid;

/// How `load` obtained the current collection.
#[derive(Debug)]
pub enum LoadStatus {
    /// Snapshot was present and decoded.
    Restored,
    /// No snapshot has been written under the key yet.
    Missing,
    /// Snapshot could not be read or decoded; collection reset to empty.
    ///
    /// The unreadable value stays in the backing store only until the next
    /// successful mutation or `persist`, which overwrites it. Callers that
    /// want to keep it must copy `LoadReport::rejected` first.
    Recovered(StoreError),
}

/// Result of `NoteStore::load`.
#[derive(Debug)]
pub struct LoadReport {
    /// Collection now held by the store.
    pub notes: Vec<Note>,
    pub status: LoadStatus,
    /// Raw stored bytes that failed to decode, if any.
    pub rejected: Option<Vec<u8>>,
}

impl LoadReport {
    /// Returns whether stored data was discarded during load.
    pub fn is_recovered(&self) -> bool {
        matches!(self.status, LoadStatus::Recovered(_))
    }
}

/// Note collection backed by a key-value byte-store.
///
/// Single-threaded by design: every operation runs to completion,
/// including the backing-store write, before returning.
pub struct NoteStore<K: KvStore, C: Clock = SystemClock> {
    kv: K,
    config: StoreConfig,
    clock: C,
    notes: Vec<Note>,
    observers: Observers,
}

impl<K: KvStore> NoteStore<K> {
    /// Creates an empty store over `kv` without reading it.
    ///
    /// Call `load` to restore the persisted collection.
    ///
    /// # Errors
    /// - `InvalidConfig` when the storage key is blank.
    pub fn new(kv: K, config: StoreConfig) -> StoreResult<Self> {
        let config = config.normalized().map_err(StoreError::InvalidConfig)?;
        Ok(Self {
            kv,
            config,
            clock: SystemClock,
            notes: Vec::new(),
            observers: Observers::default(),
        })
    }

    /// Creates a store and immediately loads the persisted collection.
    pub fn open(kv: K, config: StoreConfig) -> StoreResult<(Self, LoadReport)> {
        let mut store = Self::new(kv, config)?;
        let report = store.load();
        Ok((store, report))
    }
}

impl<K: KvStore, C: Clock> NoteStore<K, C> {
    /// Replaces the time source used for `last_modified` stamps.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> NoteStore<K, C2> {
        NoteStore {
            kv: self.kv,
            config: self.config,
            clock,
            notes: self.notes,
            observers: self.observers,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the backing store.
    pub fn backend(&self) -> &K {
        &self.kv
    }

    /// Consumes the store and returns the backing store.
    pub fn into_backend(self) -> K {
        self.kv
    }

    /// Replaces the in-memory collection with the persisted snapshot.
    ///
    /// Missing or unreadable snapshots yield an empty collection. Unreadable
    /// ones are logged and reported as `LoadStatus::Recovered`.
    pub fn load(&mut self) -> LoadReport {
        let key = self.config.storage_key.as_str();
        let mut rejected = None;
        let (notes, status) = match self.kv.get(key) {
            Ok(None) => (Vec::new(), LoadStatus::Missing),
            Ok(Some(bytes)) => match decode_snapshot(&bytes) {
                Ok(notes) => (notes, LoadStatus::Restored),
                Err(err) => {
                    rejected = Some(bytes);
                    (Vec::new(), LoadStatus::Recovered(StoreError::Decode(err)))
                }
            },
            Err(err) => (
                Vec::new(),
                LoadStatus::Recovered(StoreError::StorageRead(err)),
            ),
        };

        match &status {
            LoadStatus::Recovered(err) => warn!(
                "event=notes_load module=store status=recovered key={key} error_code={} rejected_bytes={} error={err}",
                err.code(),
                rejected.as_ref().map_or(0, Vec::len)
            ),
            LoadStatus::Missing => info!("event=notes_load module=store status=missing key={key}"),
            LoadStatus::Restored => info!(
                "event=notes_load module=store status=ok key={key} count={}",
                notes.len()
            ),
        }

        self.notes = notes;
        self.observers.notify(&StoreEvent::Loaded {
            count: self.notes.len(),
        });
        LoadReport {
            notes: self.notes.clone(),
            status,
            rejected,
        }
    }

    /// Lists notes in insertion order.
    ///
    /// An absent or empty `filter` returns the whole collection; otherwise
    /// only notes whose title or content contains it, ignoring case.
    pub fn list(&self, filter: Option<&str>) -> Vec<Note> {
        let notes = filter_notes(&self.notes, filter);
        debug!(
            "event=notes_list module=store status=ok filtered={} count={}",
            filter.is_some_and(|value| !value.is_empty()),
            notes.len()
        );
        notes
    }

    /// Lists notes carrying exactly the `folder` label, in insertion order.
    pub fn list_in_folder(&self, folder: &str) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.folder == folder)
            .cloned()
            .collect()
    }

    /// Returns distinct folder labels in first-appearance order.
    pub fn folders(&self) -> Vec<String> {
        let mut folders: Vec<String> = Vec::new();
        for note in &self.notes {
            if !folders.contains(&note.folder) {
                folders.push(note.folder.clone());
            }
        }
        folders
    }

    /// Returns a copy of one note.
    pub fn get(&self, id: NoteId) -> Option<Note> {
        self.position(id).map(|index| self.notes[index].clone())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Creates a note with configured defaults, persists and returns it.
    ///
    /// # Errors
    /// - `Encode` / `StorageWrite` when the snapshot cannot be written; the
    ///   note is not kept in that case.
    pub fn create(&mut self) -> StoreResult<Note> {
        let mut id = Uuid::new_v4();
        while self.position(id).is_some() {
            id = Uuid::new_v4();
        }
        let note = Note::with_id(
            id,
            self.config.default_title.as_str(),
            self.config.default_folder.as_str(),
            self.clock.now_epoch_ms(),
        );

        self.notes.push(note.clone());
        if let Err(err) = self.write_snapshot() {
            self.notes.pop();
            log_mutation_failure("note_create", id, &err);
            return Err(err);
        }

        info!("event=note_create module=store status=ok note_id={id}");
        self.observers.notify(&StoreEvent::Created(note.clone()));
        Ok(note)
    }

    /// Replaces the stored note sharing `note.id` and persists.
    ///
    /// The caller supplies the full value; `last_modified` is restamped with
    /// the current time, never earlier than the stored stamp.
    ///
    /// # Errors
    /// - `NotFound` when no note has that id; the collection is unchanged.
    /// - `Encode` / `StorageWrite` when the snapshot cannot be written; the
    ///   previous value is restored.
    pub fn update(&mut self, note: Note) -> StoreResult<Note> {
        let id = note.id;
        let Some(index) = self.position(id) else {
            debug!("event=note_update module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id));
        };

        let stamp = self
            .clock
            .now_epoch_ms()
            .max(self.notes[index].last_modified);
        let updated = Note {
            last_modified: stamp,
            ..note
        };
        let previous = std::mem::replace(&mut self.notes[index], updated.clone());
        if let Err(err) = self.write_snapshot() {
            self.notes[index] = previous;
            log_mutation_failure("note_update", id, &err);
            return Err(err);
        }

        info!("event=note_update module=store status=ok note_id={id}");
        self.observers.notify(&StoreEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Permanently removes the note with `id` and persists.
    ///
    /// # Errors
    /// - `NotFound` when no note has that id; the collection is unchanged.
    /// - `Encode` / `StorageWrite` when the snapshot cannot be written; the
    ///   note is put back at its original position.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<()> {
        let Some(index) = self.position(id) else {
            debug!("event=note_delete module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id));
        };

        let removed = self.notes.remove(index);
        if let Err(err) = self.write_snapshot() {
            self.notes.insert(index, removed);
            log_mutation_failure("note_delete", id, &err);
            return Err(err);
        }

        info!("event=note_delete module=store status=ok note_id={id}");
        self.observers.notify(&StoreEvent::Deleted(id));
        Ok(())
    }

    /// Writes the full current collection to the backing store.
    pub fn persist(&mut self) -> StoreResult<()> {
        self.write_snapshot().inspect_err(|err| {
            error!(
                "event=notes_persist module=store status=error error_code={} error={err}",
                err.code()
            );
        })
    }

    /// Registers an observer called after every successful change.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes an observer. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Returns the number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn write_snapshot(&mut self) -> StoreResult<()> {
        let bytes = encode_snapshot(&self.notes).map_err(StoreError::Encode)?;
        self.kv
            .put(self.config.storage_key.as_str(), &bytes)
            .map_err(StoreError::StorageWrite)?;
        debug!(
            "event=notes_persist module=store status=ok count={} bytes={}",
            self.notes.len(),
            bytes.len()
        );
        Ok(())
    }
}

fn log_mutation_failure(event: &str, id: NoteId, err: &StoreError) {
    error!(
        "event={event} module=store status=error note_id={id} error_code={} error={err}",
        err.code()
    );
}
