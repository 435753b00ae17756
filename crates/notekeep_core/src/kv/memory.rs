//! In-process key-value store.

use super::{KvResult, KvStore};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Map-backed store for tests and ephemeral sessions.
///
/// Clones share one underlying map, so a second `NoteStore` opened over a
/// clone sees exactly the bytes the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Rc<RefCell<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> KvResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
