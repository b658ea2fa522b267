use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::core::ChartType;

use super::Clock;

/// Deterministic cache key for one render request.
///
/// Built from the source id, unit filter, chart type and resolved
/// dimensions. Titles and axis labels are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    #[must_use]
    pub fn new(
        source_id: &str,
        unit_filter: Option<&str>,
        chart_type: ChartType,
        width: u32,
        height: u32,
    ) -> Self {
        Self(format!(
            "{source_id}|{}|{chart_type}|{width}|{height}",
            unit_filter.unwrap_or_default()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cached render.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub rendered_markup: Arc<str>,
    pub created_at: DateTime<Utc>,
    pub points_plotted: usize,
}

impl CacheEntry {
    #[must_use]
    pub fn new(
        rendered_markup: impl Into<Arc<str>>,
        created_at: DateTime<Utc>,
        points_plotted: usize,
    ) -> Self {
        Self {
            rendered_markup: rendered_markup.into(),
            created_at,
            points_plotted,
        }
    }

    /// Valid while `now - created_at < ttl`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at < ttl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Lookups that found an entry past its TTL (also counted as misses).
    pub stale: u64,
    pub size: usize,
}

/// Process-wide render cache with reader/writer locking.
///
/// Stale entries read as absent but stay in the map until the same key is
/// stored again; nothing is evicted, so the map grows with the number of
/// distinct fingerprints seen.
#[derive(Debug)]
pub struct RenderCache {
    entries: RwLock<HashMap<Fingerprint, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
}

impl RenderCache {
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stale: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns the entry for `fingerprint` if present and still fresh.
    #[must_use]
    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<CacheEntry> {
        let now = self.clock.now();
        let found = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            entries.get(fingerprint).cloned()
        };

        match found {
            Some(entry) if entry.is_fresh(now, self.ttl) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(%fingerprint, "render cache hit");
                Some(entry)
            }
            Some(entry) => {
                self.stale.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(
                    %fingerprint,
                    age_secs = (now - entry.created_at).num_seconds(),
                    "render cache entry stale"
                );
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(%fingerprint, "render cache miss");
                None
            }
        }
    }

    /// Inserts or overwrites `fingerprint`. Last writer wins.
    pub fn store(&self, fingerprint: Fingerprint, entry: CacheEntry) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(fingerprint, entry);
    }

    /// Number of stored entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> RenderCacheStats {
        RenderCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            size: self.len(),
        }
    }
}
