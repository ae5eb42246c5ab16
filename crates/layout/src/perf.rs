use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Trait for measuring layout performance.
///
/// The engine reports pass timings and measurement-cache hits through this trait so the
/// default no-op implementation costs nothing.
pub trait Profiler: Send + Sync {
    fn record(&self, key: &str, duration: Duration);
    fn count_hit(&self);
    fn count_miss(&self);
    /// Record a completed layout pass over `nodes` nodes.
    fn record_pass(&self, nodes: usize, duration: Duration);
    fn reset(&self);
}

/// Lets a caller keep a handle on a profiler it hands to an engine.
impl<P: Profiler + ?Sized> Profiler for Arc<P> {
    fn record(&self, key: &str, duration: Duration) {
        (**self).record(key, duration);
    }
    fn count_hit(&self) {
        (**self).count_hit();
    }
    fn count_miss(&self) {
        (**self).count_miss();
    }
    fn record_pass(&self, nodes: usize, duration: Duration) {
        (**self).record_pass(nodes, duration);
    }
    fn reset(&self) {
        (**self).reset();
    }
}

/// A no-op profiler for production use.
pub struct NoOpProfiler;

impl Profiler for NoOpProfiler {
    #[inline(always)]
    fn record(&self, _key: &str, _duration: Duration) {}
    #[inline(always)]
    fn count_hit(&self) {}
    #[inline(always)]
    fn count_miss(&self) {}
    #[inline(always)]
    fn record_pass(&self, _nodes: usize, _duration: Duration) {}
    #[inline(always)]
    fn reset(&self) {}
}

/// Aggregating profiler for debugging and benchmarks.
pub struct DebugProfiler {
    stats: Mutex<HashMap<String, Duration>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    passes: AtomicUsize,
    nodes_laid_out: AtomicUsize,
    pass_time_ns: AtomicU64,
}

impl DebugProfiler {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            passes: AtomicUsize::new(0),
            nodes_laid_out: AtomicUsize::new(0),
            pass_time_ns: AtomicU64::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Acquire)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Acquire)
    }

    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::Acquire)
    }

    /// Total time recorded under `key`.
    pub fn total(&self, key: &str) -> Option<Duration> {
        self.stats.lock().ok()?.get(key).copied()
    }

    /// Average time per node across all recorded passes.
    pub fn avg_node_time(&self) -> Option<Duration> {
        let nodes = self.nodes_laid_out.load(Ordering::Acquire);
        if nodes == 0 {
            return None;
        }
        let time_ns = self.pass_time_ns.load(Ordering::Acquire);
        Some(Duration::from_nanos(time_ns / nodes as u64))
    }

    pub fn log_summary(&self) {
        let passes = self.passes();
        log::info!("=== Layout Profile ({} passes) ===", passes);

        let hits = self.hits();
        let total = hits + self.misses();
        if total > 0 {
            log::info!(
                "Measure cache hits: {} ({:.1}%)",
                hits,
                (hits as f64 / total as f64) * 100.0
            );
        }
        if let Some(avg) = self.avg_node_time() {
            log::info!(
                "Nodes laid out: {} (avg {:?}/node)",
                self.nodes_laid_out.load(Ordering::Acquire),
                avg
            );
        }
        if let Ok(stats) = self.stats.lock() {
            for (k, v) in stats.iter() {
                log::info!("{}: {:?}", k, v);
            }
        }
    }
}

impl Default for DebugProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for DebugProfiler {
    fn record(&self, key: &str, duration: Duration) {
        if let Ok(mut g) = self.stats.lock() {
            *g.entry(key.to_string()).or_default() += duration;
        }
    }

    fn count_hit(&self) {
        self.hits.fetch_add(1, Ordering::Release);
    }

    fn count_miss(&self) {
        self.misses.fetch_add(1, Ordering::Release);
    }

    fn record_pass(&self, nodes: usize, duration: Duration) {
        self.passes.fetch_add(1, Ordering::Release);
        self.nodes_laid_out.fetch_add(nodes, Ordering::Release);
        // Saturating conversion to prevent overflow on very long durations
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.pass_time_ns.fetch_add(nanos, Ordering::Release);
    }

    fn reset(&self) {
        if let Ok(mut g) = self.stats.lock() {
            g.clear();
        }
        self.hits.store(0, Ordering::Release);
        self.misses.store(0, Ordering::Release);
        self.passes.store(0, Ordering::Release);
        self.nodes_laid_out.store(0, Ordering::Release);
        self.pass_time_ns.store(0, Ordering::Release);
    }
}
