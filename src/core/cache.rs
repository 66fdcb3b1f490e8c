use crate::domain::model::SummaryLookup;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

/// Lifetime of every cached lookup, found or not.
pub const SUMMARY_TTL_HOURS: i64 = 24;

/// Wall-clock source for entry timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    lookup: SummaryLookup,
    created_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.created_at) < ttl
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub coalesced: u64,
}

// An uninitialised cell is a fetch in flight; callers that find one wait on it.
type Slot = Arc<OnceCell<CacheEntry>>;

/// Process-wide TTL cache for summary lookups with per-key single-flight.
///
/// The map lock only guards slot lookup/replacement and is never held across
/// an await; the fetch itself is serialized per key by the slot's `OnceCell`,
/// so unrelated keys proceed in parallel. Expiry is checked lazily on access.
pub struct SummaryCache {
    slots: Mutex<HashMap<String, Slot>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    coalesced: AtomicU64,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl: TimeDelta::hours(SUMMARY_TTL_HOURS),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expired: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
        }
    }

    /// Return the live entry for `key`, or run `fetch` once to create it.
    ///
    /// Concurrent callers for the same missing key share one `fetch` and all
    /// observe its result. `NotFound` is cached like any other result.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> SummaryLookup
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SummaryLookup>,
    {
        let slot = self.slot_for(key);
        let clock = Arc::clone(&self.clock);

        let entry = slot
            .get_or_init(move || async move {
                let lookup = fetch().await;
                CacheEntry {
                    lookup,
                    created_at: clock.now(),
                }
            })
            .await;

        entry.lookup.clone()
    }

    fn slot_for(&self, key: &str) -> Slot {
        let now = self.clock.now();
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(slot) = slots.get(key) {
            match slot.get() {
                Some(entry) if entry.is_live(now, self.ttl) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key, "summary cache hit");
                    return Arc::clone(slot);
                }
                Some(_) => {
                    self.expired.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key, "summary cache entry expired");
                }
                // The map holds one reference; any other belongs to a caller
                // still running or awaiting the fetch.
                None if Arc::strong_count(slot) > 1 => {
                    self.coalesced.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key, "joining in-flight summary fetch");
                    return Arc::clone(slot);
                }
                None => {
                    tracing::debug!(key, "previous summary fetch was abandoned");
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key, "summary cache miss");
        let slot: Slot = Arc::new(OnceCell::new());
        slots.insert(key.to_string(), Arc::clone(&slot));
        slot
    }

    /// Number of keys with a live entry.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .values()
            .filter(|slot| slot.get().is_some_and(|entry| entry.is_live(now, self.ttl)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
        }
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new()
    }
}
