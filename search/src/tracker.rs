//! Best-so-far chain shared by every worker of one search.
//!
//! The best is ranked by `(length desc, start_rank asc)`, packed into one
//! `u64` so the hot path can reject a candidate with a single atomic load.
//! Only a strict improvement under that ranking takes the lock.
//!
//! Within one worker a later trail never has a lower start rank than an
//! earlier one, so the ranking reduces to "strictly longer wins, first found
//! keeps ties". Across workers the lower start rank breaks ties, which makes
//! an exhaustive parallel run return the same chain as a sequential one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use catena_kernel::graph::EdgeIx;

/// A strict improvement of the tracked best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    pub length: usize,
    pub start_rank: u32,
    /// Expansions performed (across workers) when the improvement landed.
    pub expansion: u64,
    /// Time since the tracker was created.
    pub elapsed_micros: u64,
}

/// A copy of the tracked best.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedBest {
    pub edges: Vec<EdgeIx>,
    pub start_rank: Option<u32>,
}

#[derive(Debug, Default)]
struct TrackerState {
    best: TrackedBest,
    improvements: Vec<Improvement>,
}

/// Shared, monotonically improving best chain.
#[derive(Debug)]
pub struct BestTracker {
    key: AtomicU64,
    state: Mutex<TrackerState>,
    started: Instant,
}

fn rank_key(length: usize, start_rank: u32) -> u64 {
    // Lengths are bounded by the u32 edge index range.
    ((length as u64) << 32) | u64::from(u32::MAX - start_rank)
}

impl BestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: AtomicU64::new(0),
            state: Mutex::new(TrackerState::default()),
            started: Instant::now(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        // A panicking worker cannot leave the state half-written: every
        // field is assigned after all fallible work.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Length of the tracked best. Never decreases.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn best_len(&self) -> usize {
        (self.key.load(Ordering::Acquire) >> 32) as usize
    }

    /// Cheap pre-check: could `propose` accept a trail of this length?
    #[must_use]
    pub fn would_accept(&self, length: usize, start_rank: u32) -> bool {
        length > 0 && rank_key(length, start_rank) > self.key.load(Ordering::Acquire)
    }

    /// Replace the best iff the candidate ranks strictly higher.
    ///
    /// Returns whether the candidate was taken.
    pub fn propose(&self, candidate: &[EdgeIx], start_rank: u32, expansion: u64) -> bool {
        if !self.would_accept(candidate.len(), start_rank) {
            return false;
        }
        let key = rank_key(candidate.len(), start_rank);
        let mut state = self.lock();
        // Re-check under the lock: another worker may have won meanwhile.
        if key <= self.key.load(Ordering::Acquire) {
            return false;
        }
        state.best.edges.clear();
        state.best.edges.extend_from_slice(candidate);
        state.best.start_rank = Some(start_rank);
        #[allow(clippy::cast_possible_truncation)]
        let elapsed_micros = self.started.elapsed().as_micros() as u64;
        state.improvements.push(Improvement {
            length: candidate.len(),
            start_rank,
            expansion,
            elapsed_micros,
        });
        self.key.store(key, Ordering::Release);
        true
    }

    /// Copy of the current best. Holds the lock only for the copy.
    #[must_use]
    pub fn snapshot(&self) -> TrackedBest {
        self.lock().best.clone()
    }

    #[must_use]
    pub fn improvements(&self) -> Vec<Improvement> {
        self.lock().improvements.clone()
    }
}

impl Default for BestTracker {
    fn default() -> Self {
        Self::new()
    }
}
