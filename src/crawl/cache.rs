// src/crawl/cache.rs
// =============================================================================
// Dedup cache: URL string -> Page, shared by every crawl task.
//
// One std Mutex guards the map. It is only held for a single lookup or insert,
// never across an .await, so a plain blocking mutex is enough.
//
// get() followed by set() is NOT atomic. Two tasks that miss on the same URL
// at the same time will both download it; the later set() wins.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::page::Page;

#[derive(Debug, Default)]
pub struct PageCache {
    pages: Mutex<HashMap<String, Arc<Page>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached page for `url`, if any
    pub fn get(&self, url: &str) -> Option<Arc<Page>> {
        self.lock().get(url).cloned()
    }

    /// Stores `page` for `url`, replacing any previous entry
    pub fn set(&self, url: &str, page: Arc<Page>) {
        self.lock().insert(url.to_string(), page);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock can't leave the map half-written
    // (insert and get are single calls), so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Page>>> {
        self.pages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
