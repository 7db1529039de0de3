//! Bounded LRU cache for externally loaded locale packs

use super::MessageMap;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::trace;

/// Default number of externally loaded packs kept in memory
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Least-recently-used cache of locale packs
///
/// Both [`get`](Self::get) and [`set`](Self::set) promote the entry to
/// most-recently-used. Not synchronized; the owning store wraps it in a mutex.
#[derive(Debug)]
pub struct LocalePackCache {
    capacity: usize,
    entries: HashMap<String, Arc<MessageMap>>,
    /// Front is least recently used
    order: VecDeque<String>,
}

impl LocalePackCache {
    /// Create a cache holding at most `capacity` packs (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check presence without touching recency
    pub fn contains(&self, locale: &str) -> bool {
        self.entries.contains_key(locale)
    }

    /// Fetch a pack and mark it most recently used
    pub fn get(&mut self, locale: &str) -> Option<Arc<MessageMap>> {
        let pack = self.entries.get(locale).cloned()?;
        self.touch(locale);
        Some(pack)
    }

    /// Insert or replace a pack, returning the locale evicted to make room
    pub fn set(&mut self, locale: impl Into<String>, pack: impl Into<Arc<MessageMap>>) -> Option<String> {
        let locale = locale.into();

        if self.entries.insert(locale.clone(), pack.into()).is_some() {
            self.touch(&locale);
            return None;
        }

        self.order.push_back(locale);
        if self.entries.len() <= self.capacity {
            return None;
        }

        let evicted = self.order.pop_front()?;
        self.entries.remove(&evicted);
        trace!(locale = %evicted, capacity = self.capacity, "Evicted locale pack");
        Some(evicted)
    }

    /// Drop a single pack
    pub fn remove(&mut self, locale: &str) -> Option<Arc<MessageMap>> {
        let pack = self.entries.remove(locale)?;
        self.order.retain(|l| l != locale);
        Some(pack)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Cached locales, least recently used first
    pub fn locales(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    fn touch(&mut self, locale: &str) {
        if let Some(pos) = self.order.iter().position(|l| l == locale) {
            if let Some(entry) = self.order.remove(pos) {
                self.order.push_back(entry);
            }
        }
    }
}

impl Default for LocalePackCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
