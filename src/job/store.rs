//! In-process stand-in for the job document collection.
//!
//! The real system persists jobs in a document database whose trigger
//! delivery is out of scope here; handlers only need read-after and
//! write-back. Each collection is a map under a single mutex, so an
//! individual `update` is atomic with respect to concurrent handlers.

use std::collections::HashMap;
use std::sync::Mutex;

/// One document collection keyed by document id.
#[derive(Debug, Default)]
pub struct DocumentStore<T> {
    docs: Mutex<HashMap<String, T>>,
}

impl<T: Clone> DocumentStore<T> {
    pub fn new() -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, id: &str, doc: T) {
        let mut docs = self.docs.lock().expect("store lock poisoned");
        docs.insert(id.to_string(), doc);
    }

    pub fn get(&self, id: &str) -> Option<T> {
        let docs = self.docs.lock().expect("store lock poisoned");
        docs.get(id).cloned()
    }

    /// Mutate a document in place. Returns false when the id is unknown.
    pub fn update<F: FnOnce(&mut T)>(&self, id: &str, f: F) -> bool {
        let mut docs = self.docs.lock().expect("store lock poisoned");
        match docs.get_mut(id) {
            Some(doc) => {
                f(doc);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_update() {
        let store: DocumentStore<u32> = DocumentStore::new();
        store.insert("a", 1);

        assert_eq!(store.get("a"), Some(1));
        assert!(store.update("a", |v| *v += 10));
        assert_eq!(store.get("a"), Some(11));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let store: DocumentStore<u32> = DocumentStore::new();
        assert!(!store.update("missing", |v| *v += 1));
        assert_eq!(store.get("missing"), None);
    }
}
