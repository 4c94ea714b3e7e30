//! Report caching keyed by document content.
//!
//! Analysis is pure, so a report for the same bytes under the same
//! configuration never changes; the cache key is a content hash rather
//! than a filename, which survives renames and catches re-uploads of
//! edited files. Entries expire after a TTL so long-running services do
//! not grow without bound.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use crate::report::DocumentReport;

/// Hex SHA-256 of a document's raw bytes, used as the cache key.
pub fn content_key(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Storage for finished reports.
pub trait ReportCache {
    /// Look up a non-expired report.
    fn get(&self, key: &str) -> Option<DocumentReport>;

    /// Store a report under `key`, replacing any previous entry.
    fn put(&self, key: &str, report: DocumentReport);

    /// Drop every entry.
    fn clear(&self);
}

struct Entry {
    report: DocumentReport,
    expires_at: DateTime<Utc>,
}

/// In-process [`ReportCache`] with per-entry expiry.
///
/// Expired entries are evicted lazily on lookup. The default TTL is one
/// hour.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}

impl MemoryCache {
    /// Create a cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of stored entries, including any not yet evicted.
    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportCache for MemoryCache {
    fn get(&self, key: &str) -> Option<DocumentReport> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        match entries.get(key) {
            Some(entry) if entry.expires_at > Utc::now() => {
                log::debug!("report cache hit for {}", key);
                Some(entry.report.clone())
            }
            Some(_) => {
                log::debug!("report cache entry expired for {}", key);
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: &str, report: DocumentReport) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(
            key.to_string(),
            Entry {
                report,
                expires_at: Utc::now() + self.ttl,
            },
        );
    }

    fn clear(&self) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.clear();
    }
}
