use notekeep_core::{
    KvStore, LoadStatus, MemoryKvStore, Note, NoteStore, StoreConfig, StoreError, StoreEvent,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use uuid::Uuid;

fn open_store(kv: &MemoryKvStore) -> NoteStore<MemoryKvStore> {
    let (store, _) = NoteStore::open(kv.clone(), StoreConfig::default())
        .expect("store should open");
    store
}

fn ids(notes: &[Note]) -> Vec<Uuid> {
    notes.iter().map(|note| note.id).collect()
}

#[test]
fn create_uses_defaults_and_persists_immediately() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);

    let created = store.create().expect("create should persist");
    assert_eq!(created.title, "New Note");
    assert_eq!(created.content, "");
    assert_eq!(created.folder, "Notes");
    assert!(created.last_modified > 0);

    let reopened = open_store(&kv);
    assert_eq!(reopened.list(None), vec![created]);
}

#[test]
fn edited_note_survives_reload_on_fresh_store() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let original = store.create().expect("create should persist");

    let mut edited = original.clone();
    edited.title = "Groceries".to_string();
    edited.content = "milk, eggs".to_string();
    store.update(edited).expect("update of existing note should succeed");
    store.persist().expect("persist should succeed");

    let (fresh, report) = NoteStore::open(kv.clone(), StoreConfig::default())
        .expect("store should open");
    assert!(matches!(report.status, LoadStatus::Restored));
    let notes = fresh.list(None);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, original.id);
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].content, "milk, eggs");
    assert!(notes[0].last_modified >= original.last_modified);
    assert_eq!(report.notes, notes);
}

#[test]
fn delete_first_of_two_leaves_only_second() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let first = store.create().expect("create should persist");
    let second = store.create().expect("create should persist");

    store.delete(first.id).expect("delete of existing note should succeed");

    let remaining = store.list(None);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert!(store.get(first.id).is_none());
}

#[test]
fn mixed_operations_round_trip_through_storage() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let mut created = Vec::new();
    for _ in 0..5 {
        created.push(store.create().expect("create should persist"));
    }
    let mut work = created[1].clone();
    work.folder = "Work".to_string();
    work.content = "quarterly report".to_string();
    store.update(work).expect("update of existing note should succeed");
    store.delete(created[3].id).expect("delete of existing note should succeed");
    let before = store.list(None);

    store.persist().expect("persist should succeed");
    let after = open_store(&kv).list(None);

    assert_eq!(after, before);
}

#[test]
fn created_ids_are_unique() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let note = store.create().expect("create should persist");
        assert!(seen.insert(note.id), "duplicate id {}", note.id);
    }
    assert_eq!(store.len(), 200);
}

#[test]
fn update_unknown_id_is_reported_and_changes_nothing() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    store.create().expect("create should persist");
    let before = store.list(None);
    let stored_before = kv.get("notes").expect("read should succeed");

    let stranger = Note::new("ghost", "Notes", 1);
    match store.update(stranger.clone()).unwrap_err() {
        StoreError::NotFound(id) => assert_eq!(id, stranger.id),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(store.list(None), before);
    assert_eq!(kv.get("notes").expect("read should succeed"), stored_before);
}

#[test]
fn delete_twice_reaches_same_state_as_once() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let target = store.create().expect("create should persist");
    store.create().expect("create should persist");

    store.delete(target.id).expect("delete of existing note should succeed");
    let after_once = store.list(None);

    let err = store.delete(target.id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == target.id));
    assert_eq!(store.list(None), after_once);
}

#[test]
fn empty_filter_returns_collection_in_insertion_order() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let created: Vec<Note> = (0..4).map(|_| store.create().expect("create should persist")).collect();

    assert_eq!(ids(&store.list(None)), ids(&created));
    assert_eq!(ids(&store.list(Some(""))), ids(&created));
}

#[test]
fn filter_matches_title_or_content_ignoring_case() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);

    let mut hello = store.create().expect("create should persist");
    hello.title = "Hello World".to_string();
    let hello = store.update(hello).expect("update of existing note should succeed");

    let mut bye = store.create().expect("create should persist");
    bye.title = "bye".to_string();
    store.update(bye).expect("update of existing note should succeed");

    let mut shout = store.create().expect("create should persist");
    shout.content = "say HELLO".to_string();
    let shout = store.update(shout).expect("update of existing note should succeed");

    let hits = store.list(Some("hello"));
    assert_eq!(ids(&hits), vec![hello.id, shout.id]);
}

#[test]
fn filter_whitespace_is_part_of_the_needle() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let mut titled = |title: &str| {
        let mut note = store.create().expect("create should persist");
        note.title = title.to_string();
        store.update(note).expect("update of existing note should succeed")
    };
    let _hello = titled("hello");
    let spaced = titled("no spaces");
    let _plain = titled("x");
    let mut gap = store.create().expect("create should persist");
    gap.content = "wide   gap".to_string();
    let gap = store.update(gap).expect("update of existing note should succeed");

    assert_eq!(ids(&store.list(Some("o "))), vec![spaced.id]);
    assert_eq!(ids(&store.list(Some("   "))), vec![gap.id]);
}

#[test]
fn update_replaces_whole_value() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let mut note = store.create().expect("create should persist");
    note.content = "draft".to_string();
    let note = store.update(note).expect("update of existing note should succeed");

    let mut replacement = Note::with_id(note.id, "Only title", "Archive", 0);
    replacement.content.clear();
    let stored = store.update(replacement).expect("update of existing note should succeed");

    assert_eq!(stored.title, "Only title");
    assert_eq!(stored.content, "");
    assert_eq!(stored.folder, "Archive");
    assert!(stored.last_modified >= note.last_modified);
    assert_eq!(store.get(note.id), Some(stored));
}

#[test]
fn malformed_snapshot_loads_empty_and_is_reported() {
    let mut kv = MemoryKvStore::new();
    kv.put("notes", b"{ definitely not notes").expect("write should succeed");

    let (store, report) = NoteStore::open(kv.clone(), StoreConfig::default())
        .expect("store should open");

    assert!(store.is_empty());
    assert!(report.is_recovered());
    assert!(matches!(
        report.status,
        LoadStatus::Recovered(StoreError::Decode(_))
    ));
    assert_eq!(report.rejected.as_deref(), Some(&b"{ definitely not notes"[..]));
}

#[test]
fn rejected_bytes_can_be_kept_before_first_write_overwrites_them() {
    let mut kv = MemoryKvStore::new();
    kv.put("notes", b"[truncated").expect("write should succeed");

    let (mut store, report) = NoteStore::open(kv.clone(), StoreConfig::default())
        .expect("store should open");
    let rejected = report.rejected.expect("undecodable bytes should be handed back");
    kv.put("notes.rejected", &rejected).expect("write should succeed");

    store.create().expect("create should persist");

    assert_eq!(
        kv.get("notes.rejected").expect("read should succeed").as_deref(),
        Some(&b"[truncated"[..])
    );
    assert_ne!(
        kv.get("notes").expect("read should succeed").as_deref(),
        Some(&b"[truncated"[..])
    );
}

#[test]
fn missing_snapshot_loads_empty() {
    let (store, report) = NoteStore::open(MemoryKvStore::new(), StoreConfig::default())
        .expect("store should open");
    assert!(store.is_empty());
    assert!(matches!(report.status, LoadStatus::Missing));
    assert!(!report.is_recovered());
}

#[test]
fn snapshot_uses_configured_key_only() {
    let kv = MemoryKvStore::new();
    let (mut store, _) = NoteStore::open(kv.clone(), StoreConfig::with_storage_key("sketchbook"))
        .expect("store should open");
    store.create().expect("create should persist");

    assert_eq!(kv.len(), 1);
    assert!(kv.get("sketchbook").expect("read should succeed").is_some());
    assert!(kv.get("notes").expect("read should succeed").is_none());
}

#[test]
fn persisted_blob_is_json_array_with_documented_fields() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let note = store.create().expect("create should persist");

    let bytes = kv
        .get("notes")
        .expect("read should succeed")
        .expect("snapshot should be written");
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).expect("snapshot should be valid JSON");
    let records = value.as_array().expect("snapshot should be a JSON array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], note.id.to_string());
    assert_eq!(records[0]["title"], "New Note");
    assert_eq!(records[0]["content"], "");
    assert_eq!(records[0]["lastModified"], note.last_modified);
    assert_eq!(records[0]["folder"], "Notes");
}

#[test]
fn folders_and_folder_listing_follow_insertion_order() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let inbox = store.create().expect("create should persist");
    let mut work = store.create().expect("create should persist");
    work.folder = "Work".to_string();
    let work = store.update(work).expect("update of existing note should succeed");
    let second_inbox = store.create().expect("create should persist");

    assert_eq!(store.folders(), vec!["Notes".to_string(), "Work".to_string()]);
    assert_eq!(ids(&store.list_in_folder("Notes")), vec![inbox.id, second_inbox.id]);
    assert_eq!(ids(&store.list_in_folder("Work")), vec![work.id]);
    assert!(store.list_in_folder("work").is_empty());
}

#[test]
fn subscribers_see_each_successful_change() {
    let kv = MemoryKvStore::new();
    let mut store = open_store(&kv);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let subscription = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let created = store.create().expect("create should persist");
    let created_id = created.id;
    let mut edited = created.clone();
    edited.title = "Renamed".to_string();
    let edited = store.update(edited).expect("update of existing note should succeed");
    let _ = store.delete(Uuid::new_v4());
    store.delete(created_id).expect("delete of existing note should succeed");
    store.load();

    assert_eq!(
        *events.borrow(),
        vec![
            StoreEvent::Created(created),
            StoreEvent::Updated(edited),
            StoreEvent::Deleted(created_id),
            StoreEvent::Loaded { count: 0 },
        ]
    );

    assert!(store.unsubscribe(subscription));
    assert_eq!(store.subscriber_count(), 0);
    store.create().expect("create should persist");
    assert_eq!(events.borrow().len(), 4);
}
