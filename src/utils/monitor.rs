use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counts upstream calls made by this process. Diagnostic only.
#[derive(Debug)]
pub struct QueryCounter {
    count: AtomicU64,
    start_time: Instant,
}

impl QueryCounter {
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records one call and returns its 1-based sequence number.
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn log_stats(&self) {
        tracing::info!(
            "📊 Upstream queries: {}, uptime: {:?}",
            self.get(),
            self.uptime()
        );
    }
}

impl Default for QueryCounter {
    fn default() -> Self {
        Self::new()
    }
}
