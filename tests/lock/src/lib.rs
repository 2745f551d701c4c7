//! Shared fixtures for the lock tests and the `chain_fixture` binary.

#![forbid(unsafe_code)]

use std::time::Duration;

use catena_harness::PuzzleRecord;
use catena_kernel::puzzle::Puzzle;
use catena_search::StopSignal;

/// `12→23`, `23→34`, plus an unconnected `99→01`.
#[must_use]
pub fn linked_pair_with_stray() -> Vec<Puzzle> {
    vec![
        Puzzle::new(1, "12", "23"),
        Puzzle::new(2, "23", "34"),
        Puzzle::new(3, "99", "01"),
    ]
}

/// `a→b→c→a`.
#[must_use]
pub fn triangle() -> Vec<Puzzle> {
    vec![
        Puzzle::new(1, "a", "b"),
        Puzzle::new(2, "b", "c"),
        Puzzle::new(3, "c", "a"),
    ]
}

/// Deterministic pseudo-random puzzle set over tokens `t0..t{alphabet}`.
///
/// Ids are `0..count`. Same seed, same set, on every platform.
#[must_use]
pub fn lcg_puzzles(seed: u64, count: usize, alphabet: u64) -> Vec<Puzzle> {
    let mut state = seed;
    let mut next = || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % alphabet
    };
    (0..count as u64)
        .map(|id| {
            let takes = next();
            let gives = next();
            Puzzle::new(id, format!("t{takes}"), format!("t{gives}"))
        })
        .collect()
}

/// Wire records for a puzzle set, without labels.
#[must_use]
pub fn records(puzzles: &[Puzzle]) -> Vec<PuzzleRecord> {
    puzzles
        .iter()
        .map(|p| PuzzleRecord {
            id: p.id.0,
            takes: p.takes.to_string(),
            gives: p.gives.to_string(),
            puzzle_number: None,
        })
        .collect()
}

/// A deadline no fixture-sized search comes near.
#[must_use]
pub fn generous() -> StopSignal {
    StopSignal::after(Duration::from_secs(120))
}
