use super::{CacheEntry, CacheStore};
use crate::error::Result;
use std::collections::HashMap;

/// In-memory cache for testing.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    entries: HashMap<String, CacheEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for InMemoryStore {
    fn get(&self, filename: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.get(filename).cloned())
    }

    fn put(&mut self, entry: &CacheEntry) -> Result<()> {
        self.entries.insert(entry.filename.clone(), entry.clone());
        Ok(())
    }
}
