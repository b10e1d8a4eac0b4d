// @zen-component: VOC-VocabularyCache
//
//! In-memory vocabulary cache with a freshness window.
//!
//! A stale entry is kept after expiry: if the refresh fails it is served
//! instead of the error.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::DEFAULT_VOCABULARY_TTL;
use crate::models::FilterOption;

/// A fetched vocabulary and when it was fetched.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<FilterOption>,
    fetched_at: Instant,
}

/// Vocabulary tables keyed by vocabulary name.
#[derive(Debug)]
pub struct VocabularyCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl VocabularyCache {
    /// Create a new cache with the default 5 minute window.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_VOCABULARY_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the vocabulary for `key`, calling `fetch` only when the cached
    /// copy is missing or older than the window.
    ///
    /// A failed refresh falls back to the previous copy; the error only
    /// surfaces when nothing was ever cached for `key`.
    pub async fn get<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Vec<FilterOption>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<FilterOption>, E>>,
        E: std::fmt::Display,
    {
        let previous = self.lookup(key);
        if let Some(entry) = &previous
            && entry.fetched_at.elapsed() < self.ttl
        {
            debug!(key, "vocabulary cache hit");
            return Ok(entry.value.clone());
        }

        match fetch().await {
            Ok(value) => {
                self.insert(key, value.clone());
                Ok(value)
            }
            Err(e) => match previous {
                Some(stale) => {
                    warn!(key, "vocabulary refresh failed, serving stale copy: {e}");
                    Ok(stale.value)
                }
                None => Err(e),
            },
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &str) -> Option<CacheEntry> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn insert(&self, key: &str, value: Vec<FilterOption>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    fetched_at: Instant::now(),
                },
            );
        }
    }
}

impl Default for VocabularyCache {
    fn default() -> Self {
        Self::new()
    }
}
