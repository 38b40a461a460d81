//! Thread-safe memory usage accounting.
//!
//! The usage counter is the one piece of arena state that crosses threads.
//! The cursor and block list stay behind `&mut self`; the counter lives in
//! an `Arc<AtomicUsize>` so any thread can sample it through a cloned
//! [`UsageCounter`] while the owning thread keeps allocating.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Cloneable handle onto an arena's memory-usage counter.
///
/// Reports total bytes reserved from the system allocator, including
/// per-block bookkeeping overhead and bytes wasted to alignment slop or
/// abandoned block tails — not bytes handed to callers. Monotonic
/// non-decreasing for the arena's lifetime.
///
/// All accesses use relaxed ordering: the counter is observational and
/// never drives an allocation decision, so atomicity of the value itself is
/// the only requirement.
#[derive(Clone, Debug, Default)]
pub struct UsageCounter {
    bytes: Arc<AtomicUsize>,
}

impl UsageCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Total bytes reserved so far.
    pub fn bytes(&self) -> usize {
        self.bytes.load(Ordering::Relaxed)
    }

    /// Record a block acquisition. The counter only ever grows.
    pub(crate) fn record(&self, bytes: usize) {
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }
}
