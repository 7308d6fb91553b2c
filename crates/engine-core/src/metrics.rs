use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    polls: AtomicU64,
    empty_polls: AtomicU64,
    records_read: AtomicU64,
    bytes_read: AtomicU64,
    failure_count: AtomicU64,
}

/// Counters for a running source. Cloning shares the same counters.
#[derive(Debug, Clone)]
pub struct SourceMetrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub polls: u64,
    pub empty_polls: u64,
    pub records_read: u64,
    pub bytes_read: u64,
    pub failure_count: u64,
}

impl SourceMetrics {
    pub fn new() -> Self {
        SourceMetrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    /// Records one completed poll and what it produced.
    pub fn record_poll(&self, records: u64, bytes: u64) {
        self.inner.polls.fetch_add(1, Ordering::Relaxed);
        if records == 0 {
            self.inner.empty_polls.fetch_add(1, Ordering::Relaxed);
        }
        self.inner.records_read.fetch_add(records, Ordering::Relaxed);
        self.inner.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn increment_failures(&self, count: u64) {
        self.inner.failure_count.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            polls: self.inner.polls.load(Ordering::Relaxed),
            empty_polls: self.inner.empty_polls.load(Ordering::Relaxed),
            records_read: self.inner.records_read.load(Ordering::Relaxed),
            bytes_read: self.inner.bytes_read.load(Ordering::Relaxed),
            failure_count: self.inner.failure_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for SourceMetrics {
    fn default() -> Self {
        Self::new()
    }
}
