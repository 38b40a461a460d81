//! Benchmark workloads and utilities for the moraine arena.
//!
//! Provides deterministic, seeded request sequences shared by the criterion
//! benches so runs are comparable across machines and commits.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A single allocation request in a generated workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    /// Bytes to allocate.
    pub bytes: usize,
    /// Whether to use the aligned allocation path.
    pub aligned: bool,
}

/// Generate a deterministic mixed workload of `n` requests.
///
/// Sizes follow the memtable-like shape the arena is built for: mostly
/// small keys and values (1..=128 bytes), with roughly one request in
/// sixteen large enough (1..=4096) to exercise refills and dedicated
/// blocks.
pub fn mixed_workload(seed: u64, n: usize) -> Vec<Request> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let bytes = if rng.random_range(0..16) == 0 {
                rng.random_range(1..=4096)
            } else {
                rng.random_range(1..=128)
            };
            Request {
                bytes,
                aligned: rng.random_bool(0.5),
            }
        })
        .collect()
}
