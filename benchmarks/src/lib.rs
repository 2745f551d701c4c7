//! Shared helpers for catena benchmark suites.

use catena_kernel::graph::PuzzleGraph;
use catena_kernel::puzzle::Puzzle;

/// Deterministic puzzle set over `alphabet` tokens, ids `0..count`.
///
/// Tokens are two-digit strings, matching the usual puzzle halves.
#[must_use]
pub fn puzzle_set(seed: u64, count: usize, alphabet: u64) -> Vec<Puzzle> {
    let mut state = seed;
    let mut next = || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % alphabet
    };
    (0..count as u64)
        .map(|id| Puzzle::new(id, format!("{:02}", next()), format!("{:02}", next())))
        .collect()
}

/// Build the graph for [`puzzle_set`].
///
/// # Panics
///
/// Panics if `count` is zero. Benchmark setup failures are fatal.
#[must_use]
pub fn graph(seed: u64, count: usize, alphabet: u64) -> PuzzleGraph {
    PuzzleGraph::build(&puzzle_set(seed, count, alphabet)).expect("non-empty puzzle set")
}
