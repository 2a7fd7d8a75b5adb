//! Counters for receipt chain commits
//!
//! ```ignore
//! let metrics = store.metrics();
//! println!("{} receipts evicted", metrics.evicted());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters shared between the writer and its readers.
#[derive(Debug, Default)]
pub struct ReceiptStoreMetrics {
    /// Commits applied to the store
    pub commits: AtomicU64,
    /// Commits aborted before or during the atomic apply
    pub commits_failed: AtomicU64,
    /// Receipts linked onto the tail
    pub receipts_linked: AtomicU64,
    /// Nodes evicted from the head
    pub receipts_evicted: AtomicU64,
    /// Receipts not linked: empty, duplicate or reserved hash
    pub receipts_skipped: AtomicU64,
}

impl ReceiptStoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful commit
    pub fn record_commit(&self, linked: u64, evicted: u64, skipped: u64) {
        self.commits.fetch_add(1, Ordering::Relaxed);
        self.receipts_linked.fetch_add(linked, Ordering::Relaxed);
        self.receipts_evicted.fetch_add(evicted, Ordering::Relaxed);
        self.receipts_skipped.fetch_add(skipped, Ordering::Relaxed);
    }

    /// Record an aborted commit
    pub fn record_failure(&self) {
        self.commits_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.commits_failed.load(Ordering::Relaxed)
    }

    pub fn linked(&self) -> u64 {
        self.receipts_linked.load(Ordering::Relaxed)
    }

    pub fn evicted(&self) -> u64 {
        self.receipts_evicted.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.receipts_skipped.load(Ordering::Relaxed)
    }
}
