//! Anytime longest-trail search.
//!
//! Depth-first enumeration of edge-disjoint trails from every starting node,
//! keeping the longest trail seen in a shared [`BestTracker`]. The stop
//! signal, the expansion budget, and the halt flags are polled before every
//! expansion, so the search returns promptly whenever it is told to, with the
//! best chain found so far.
//!
//! # Determinism
//!
//! For a given puzzle sequence and policy, a run that is not interrupted
//! (`Exhausted` or `PerfectChain`) returns the same chain regardless of the
//! worker count: ties go to the lowest start rank, and within one start to
//! the trail discovered first.

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use catena_kernel::digest::chain_digest;
use catena_kernel::graph::{Chain, NodeIx, PuzzleGraph};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::adjacency::{start_nodes, OrderedAdjacency};
use crate::error::SearchError;
use crate::frontier::TrailFrontier;
use crate::policy::SearchPolicy;
use crate::report::{SearchReport, TerminationReason};
use crate::stop::{StopCause, StopSignal};
use crate::tracker::BestTracker;

/// Local expansions a worker accumulates before publishing them.
const FLUSH_EVERY: u64 = 256;

/// Minimum spacing between `search progress` events.
const PROGRESS_EVERY: Duration = Duration::from_secs(5);

/// Result of a search: the best chain plus the audit report.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Empty only if the graph has no edges, which graph construction rules
    /// out; in practice always at least one puzzle long.
    pub chain: Chain,
    pub report: SearchReport,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.report.termination.is_optimal()
    }
}

/// External reasons to stop, first one recorded wins.
#[derive(Debug, Clone, Copy)]
enum Interrupt {
    Stopped(StopCause),
    Budget,
}

/// Hands out one progress slot per interval, to whichever worker asks first.
#[derive(Debug)]
struct ProgressClock {
    interval_micros: u64,
    next_due: AtomicU64,
}

impl ProgressClock {
    #[allow(clippy::cast_possible_truncation)]
    fn new(interval: Duration) -> Self {
        let interval_micros = interval.as_micros() as u64;
        Self {
            interval_micros,
            next_due: AtomicU64::new(interval_micros),
        }
    }

    fn claim(&self, now_micros: u64) -> bool {
        let due = self.next_due.load(Ordering::Acquire);
        now_micros >= due
            && self
                .next_due
                .compare_exchange(
                    due,
                    now_micros.saturating_add(self.interval_micros),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
    }
}

struct Shared<'g> {
    graph: &'g PuzzleGraph,
    adjacency: OrderedAdjacency,
    tracker: BestTracker,
    stop: &'g StopSignal,
    max_expansions: Option<u64>,
    expansions: AtomicU64,
    starts_completed: AtomicUsize,
    interrupt: OnceLock<Interrupt>,
    /// Lowest start rank that produced a perfect chain; `u32::MAX` if none.
    perfect_rank: AtomicU32,
    starts_total: usize,
    started: Instant,
    progress: ProgressClock,
}

impl Shared<'_> {
    fn is_perfect(&self, length: usize) -> bool {
        length == self.graph.edge_count()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn log_progress(&self) {
        let elapsed_micros = self.started.elapsed().as_micros() as u64;
        if !self.progress.claim(elapsed_micros) {
            return;
        }
        let expansions = self.expansions.load(Ordering::Relaxed);
        info!(
            expansions,
            expansions_per_sec = expansions.saturating_mul(1_000_000) / elapsed_micros.max(1),
            best_length = self.tracker.best_len(),
            starts_completed = self.starts_completed.load(Ordering::Relaxed),
            starts_total = self.starts_total,
            elapsed_ms = elapsed_micros / 1_000,
            "search progress"
        );
    }

    fn termination(&self) -> TerminationReason {
        if self.perfect_rank.load(Ordering::Acquire) != u32::MAX {
            return TerminationReason::PerfectChain;
        }
        match self.interrupt.get() {
            Some(Interrupt::Stopped(StopCause::Cancelled)) => TerminationReason::Cancelled,
            Some(Interrupt::Stopped(StopCause::DeadlineReached)) => {
                TerminationReason::DeadlineReached
            }
            Some(Interrupt::Budget) => TerminationReason::ExpansionBudgetExceeded,
            None => TerminationReason::Exhausted,
        }
    }
}

/// One worker's private state. Reused across the starts it is handed.
struct Walker<'s, 'g> {
    shared: &'s Shared<'g>,
    frontier: TrailFrontier,
    pending: u64,
}

impl<'s, 'g> Walker<'s, 'g> {
    fn new(shared: &'s Shared<'g>) -> Self {
        Self {
            shared,
            frontier: TrailFrontier::new(shared.graph.edge_count()),
            pending: 0,
        }
    }

    /// Explore every trail from `start`. Returns whether the subtree was
    /// explored to the end.
    fn explore(&mut self, rank: u32, start: NodeIx) -> bool {
        let shared = self.shared;
        self.frontier.reset(start);
        while let Some(node) = self.frontier.current() {
            if !self.tick(rank) {
                self.flush();
                return false;
            }
            let Some(edge) = self.frontier.next_edge(shared.adjacency.out(node)) else {
                let _ = self.frontier.backtrack();
                continue;
            };
            self.frontier.descend(edge, shared.graph.edge(edge).to);

            let length = self.frontier.depth();
            if !shared.tracker.would_accept(length, rank) {
                continue;
            }
            let expansion = shared.expansions.load(Ordering::Relaxed) + self.pending;
            if shared.tracker.propose(self.frontier.trail(), rank, expansion) {
                debug!(length, start_rank = rank, expansion, "new best chain");
                if shared.is_perfect(length) {
                    shared.perfect_rank.fetch_min(rank, Ordering::AcqRel);
                    self.flush();
                    return false;
                }
            }
        }
        self.flush();
        true
    }

    /// Account for one expansion, or report that this worker must stop.
    fn tick(&mut self, rank: u32) -> bool {
        let shared = self.shared;
        // A perfect chain from a lower rank makes this start irrelevant;
        // lower ranks keep going so the tie-break stays exact.
        if rank > shared.perfect_rank.load(Ordering::Acquire) {
            return false;
        }
        if shared.interrupt.get().is_some() {
            return false;
        }
        if let Some(cause) = shared.stop.poll() {
            let _ = shared.interrupt.set(Interrupt::Stopped(cause));
            return false;
        }
        if let Some(max) = shared.max_expansions {
            if shared.expansions.load(Ordering::Relaxed) + self.pending >= max {
                let _ = shared.interrupt.set(Interrupt::Budget);
                return false;
            }
        }
        self.pending += 1;
        if self.pending >= FLUSH_EVERY {
            self.flush();
            shared.log_progress();
        }
        true
    }

    fn flush(&mut self) {
        if self.pending > 0 {
            self.shared
                .expansions
                .fetch_add(self.pending, Ordering::Relaxed);
            self.pending = 0;
        }
    }
}

/// Find the longest chain reachable before `stop` fires.
///
/// Always returns a non-empty chain for a valid graph: the first edge of the
/// first start node is recorded before any stop check, so even an
/// already-expired deadline yields a one-puzzle chain.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation and
/// [`SearchError::WorkerPool`] if a multi-worker pool cannot be started.
/// Deadlines, cancellation, and budgets are not errors; they show up as the
/// report's [`TerminationReason`].
pub fn search(
    graph: &PuzzleGraph,
    stop: &StopSignal,
    policy: &SearchPolicy,
) -> Result<SearchOutcome, SearchError> {
    policy.validate()?;
    let started = Instant::now();

    let adjacency = OrderedAdjacency::new(graph, policy.edge_order);
    let starts = start_nodes(graph, policy.start_order);
    let starts_total = starts.len();
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        starts = starts_total,
        workers = policy.workers,
        edge_order = policy.edge_order.as_str(),
        start_order = policy.start_order.as_str(),
        "search started"
    );

    let shared = Shared {
        graph,
        adjacency,
        tracker: BestTracker::new(),
        stop,
        max_expansions: policy.max_expansions,
        expansions: AtomicU64::new(0),
        starts_completed: AtomicUsize::new(0),
        interrupt: OnceLock::new(),
        perfect_rank: AtomicU32::new(u32::MAX),
        starts_total,
        started,
        progress: ProgressClock::new(PROGRESS_EVERY),
    };

    // Seed: any single edge is a valid chain.
    if let Some(&first) = starts.first().and_then(|&s| shared.adjacency.out(s).first()) {
        let _ = shared.tracker.propose(&[first], 0, 0);
        if shared.is_perfect(1) {
            shared.perfect_rank.store(0, Ordering::Release);
        }
    }

    if shared.perfect_rank.load(Ordering::Acquire) == u32::MAX {
        let ranked: Vec<(u32, NodeIx)> = starts
            .iter()
            .enumerate()
            .filter_map(|(rank, &node)| u32::try_from(rank).ok().map(|r| (r, node)))
            .collect();
        if policy.workers == 1 {
            run_sequential(&shared, &ranked);
        } else {
            run_parallel(&shared, &ranked, policy.workers)?;
        }
    }

    let best = shared.tracker.snapshot();
    let chain = graph.chain_from_edges(&best.edges);
    let termination = shared.termination();
    #[allow(clippy::cast_possible_truncation)]
    let elapsed_micros = started.elapsed().as_micros() as u64;

    let report = SearchReport {
        termination,
        policy: policy.clone(),
        expansions: shared.expansions.load(Ordering::Relaxed),
        starts_total,
        starts_completed: shared.starts_completed.load(Ordering::Relaxed),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        best_length: chain.len(),
        best_start_rank: best.start_rank,
        improvements: shared.tracker.improvements(),
        elapsed_micros,
        puzzle_set_digest: graph.puzzle_set_digest().clone(),
        chain_digest: chain_digest(&chain),
    };
    info!(
        termination = termination.as_str(),
        length = report.best_length,
        expansions = report.expansions,
        starts_completed = report.starts_completed,
        elapsed_micros,
        "search finished"
    );

    Ok(SearchOutcome { chain, report })
}

fn run_sequential(shared: &Shared<'_>, ranked: &[(u32, NodeIx)]) {
    let mut walker = Walker::new(shared);
    for &(rank, start) in ranked {
        if !walker.explore(rank, start) {
            break;
        }
        shared.starts_completed.fetch_add(1, Ordering::Relaxed);
    }
}

fn run_parallel(
    shared: &Shared<'_>,
    ranked: &[(u32, NodeIx)],
    workers: usize,
) -> Result<(), SearchError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| SearchError::WorkerPool {
            detail: e.to_string(),
        })?;
    pool.install(|| {
        ranked
            .par_iter()
            .with_max_len(1)
            .for_each_init(
                || Walker::new(shared),
                |walker, &(rank, start)| {
                    if walker.explore(rank, start) {
                        shared.starts_completed.fetch_add(1, Ordering::Relaxed);
                    }
                },
            );
    });
    Ok(())
}
