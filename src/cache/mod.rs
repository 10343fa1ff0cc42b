//! Memoizing cache for overlap results.
//!
//! Entries are keyed by [`Fingerprint`] and expire `ttl` after creation.
//! There is no background reaper: whenever an insert pushes the entry count
//! past `max_entries`, expired entries are swept out in the same call.
//!
//! Computation runs outside the lock. Two concurrent misses for the same
//! fingerprint may both compute; results are pure, so whichever insert lands
//! last is identical to the other. Entries are inserted whole behind an `Arc`
//! and never mutated afterwards.

mod fingerprint;

pub use fingerprint::Fingerprint;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::overlap::OverlapResult;

/// Default entry lifetime (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default entry count above which expired entries are swept.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// A stored computation.
#[derive(Debug)]
pub struct CacheEntry {
    pub fingerprint: Fingerprint,
    pub result: Arc<OverlapResult>,
    pub created_at: Instant,
}

impl CacheEntry {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Thread-safe overlap cache with TTL expiry and size-triggered sweeping.
#[derive(Debug)]
pub struct OverlapCache {
    entries: RwLock<HashMap<Fingerprint, Arc<CacheEntry>>>,
    ttl: Duration,
    max_entries: usize,
}

impl OverlapCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl(), config.max_entries)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Return the cached result for `fingerprint`, or compute and store it.
    pub fn get_or_compute<F>(&self, fingerprint: &Fingerprint, compute: F) -> Arc<OverlapResult>
    where
        F: FnOnce() -> OverlapResult,
    {
        self.get_or_compute_at(fingerprint, Instant::now(), compute)
    }

    /// [`get_or_compute`](Self::get_or_compute) against an explicit clock
    /// reading.
    pub fn get_or_compute_at<F>(
        &self,
        fingerprint: &Fingerprint,
        now: Instant,
        compute: F,
    ) -> Arc<OverlapResult>
    where
        F: FnOnce() -> OverlapResult,
    {
        if let Some(entry) = self.lookup(fingerprint, now) {
            debug!(fingerprint = %fingerprint, "Overlap cache hit");
            return Arc::clone(&entry.result);
        }

        debug!(fingerprint = %fingerprint, "Overlap cache miss, computing");
        let result = Arc::new(compute());
        self.store(
            CacheEntry {
                fingerprint: fingerprint.clone(),
                result: Arc::clone(&result),
                created_at: now,
            },
            now,
        );
        result
    }

    /// Fetch a live entry without computing.
    pub fn get_at(&self, fingerprint: &Fingerprint, now: Instant) -> Option<Arc<CacheEntry>> {
        self.lookup(fingerprint, now)
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now, self.ttl));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, fingerprint: &Fingerprint, now: Instant) -> Option<Arc<CacheEntry>> {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => {
                warn!("Overlap cache lock poisoned, treating as miss");
                return None;
            }
        };

        entries
            .get(fingerprint)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .cloned()
    }

    fn store(&self, entry: CacheEntry, now: Instant) {
        // A poisoned map still holds whole entries; overwrite and carry on.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(entry.fingerprint.clone(), Arc::new(entry));

        if entries.len() > self.max_entries {
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now, self.ttl));
            debug!(
                evicted = before - entries.len(),
                remaining = entries.len(),
                max_entries = self.max_entries,
                "Swept expired overlap cache entries"
            );
        }
    }
}

impl Default for OverlapCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}
