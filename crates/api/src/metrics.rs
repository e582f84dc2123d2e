use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    failed_requests: AtomicUsize,
    cache_hits: AtomicUsize,

    // Timing (in microseconds)
    total_annotate_time_us: AtomicU64,
    total_extract_time_us: AtomicU64,

    // Counts
    sentences_processed: AtomicUsize,
    relations_extracted: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            total_annotate_time_us: AtomicU64::new(0),
            total_extract_time_us: AtomicU64::new(0),
            sentences_processed: AtomicUsize::new(0),
            relations_extracted: AtomicUsize::new(0),
        })
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_annotate(&self, duration: Duration) {
        self.total_annotate_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_extract(&self, duration: Duration, sentences: usize, relations: usize) {
        self.total_extract_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.sentences_processed.fetch_add(sentences, Ordering::Relaxed);
        self.relations_extracted.fetch_add(relations, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.total_requests.load(Ordering::Relaxed);
        MetricsSnapshot {
            total_requests: total,
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            avg_annotate_time_ms: avg_ms(&self.total_annotate_time_us, total),
            avg_extract_time_ms: avg_ms(&self.total_extract_time_us, total),
            sentences_processed: self.sentences_processed.load(Ordering::Relaxed),
            relations_extracted: self.relations_extracted.load(Ordering::Relaxed),
        }
    }
}

fn avg_ms(total_us: &AtomicU64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total_us.load(Ordering::Relaxed) as f64 / count as f64 / 1000.0
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub failed_requests: usize,
    pub cache_hits: usize,
    pub avg_annotate_time_ms: f64,
    pub avg_extract_time_ms: f64,
    pub sentences_processed: usize,
    pub relations_extracted: usize,
}

pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
