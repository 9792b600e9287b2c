use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub books_created: Arc<AtomicU64>,
    pub books_updated: Arc<AtomicU64>,
    pub books_deleted: Arc<AtomicU64>,
    pub searches: Arc<AtomicU64>,
    pub sorts: Arc<AtomicU64>,
    pub not_found: Arc<AtomicU64>,
    pub store_failures: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            books_created: Arc::new(AtomicU64::new(0)),
            books_updated: Arc::new(AtomicU64::new(0)),
            books_deleted: Arc::new(AtomicU64::new(0)),
            searches: Arc::new(AtomicU64::new(0)),
            sorts: Arc::new(AtomicU64::new(0)),
            not_found: Arc::new(AtomicU64::new(0)),
            store_failures: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_created(&self) {
        self.books_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_updated(&self) {
        self.books_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_deleted(&self) {
        self.books_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_searches(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_sorts(&self) {
        self.sorts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_store_failures(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            books_created: self.books_created.load(Ordering::Relaxed),
            books_updated: self.books_updated.load(Ordering::Relaxed),
            books_deleted: self.books_deleted.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            sorts: self.sorts.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub books_created: u64,
    pub books_updated: u64,
    pub books_deleted: u64,
    pub searches: u64,
    pub sorts: u64,
    pub not_found: u64,
    pub store_failures: u64,
    pub uptime_seconds: u64,
}
