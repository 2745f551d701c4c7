//! The query boundary: request in, formatted longest chain out.
//!
//! A request carries a puzzle set and an optional timeout. The service
//! clamps the timeout, builds the graph, runs the engine against a deadline,
//! and shapes the best chain into a [`ChainResponse`]. A fresh graph and
//! tracker are built per request; nothing is kept between calls.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use catena_kernel::graph::{GraphError, PuzzleGraph};
use catena_kernel::puzzle::derive::LabeledPuzzle;
use catena_kernel::puzzle::{Puzzle, PuzzleId};
use catena_search::{search, CancelToken, SearchError, SearchReport, StopSignal};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ServiceConfig, TimeoutConfig};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    InvalidPuzzleSet(#[from] GraphError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// One puzzle as it arrives over the query boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: u64,
    pub takes: String,
    pub gives: String,
    /// Display label; the id is shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzle_number: Option<String>,
}

impl PuzzleRecord {
    #[must_use]
    pub fn to_puzzle(&self) -> Puzzle {
        Puzzle::new(self.id, self.takes.as_str(), self.gives.as_str())
    }

    fn label(&self) -> String {
        self.puzzle_number
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}

impl From<LabeledPuzzle> for PuzzleRecord {
    fn from(labeled: LabeledPuzzle) -> Self {
        Self {
            id: labeled.puzzle.id.0,
            takes: labeled.puzzle.takes.to_string(),
            gives: labeled.puzzle.gives.to_string(),
            puzzle_number: Some(labeled.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongestChainRequest {
    pub puzzles: Vec<PuzzleRecord>,
    /// Seconds, as sent by the caller. Anything unusable falls back to the
    /// configured default; see [`clamp_timeout`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Value>,
}

impl LongestChainRequest {
    #[must_use]
    pub fn new(puzzles: Vec<PuzzleRecord>) -> Self {
        Self {
            puzzles,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(Value::from(seconds));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSides {
    pub takes: String,
    pub gives: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStep {
    pub puzzle_number: String,
    pub puzzle_sides: PuzzleSides,
}

/// The longest chain found, in the order the puzzles are played.
///
/// `chain_length == 0` with an empty `chain` means "no chain found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain_length: usize,
    pub processing_time_seconds: f64,
    pub timeout_seconds: u64,
    pub chain: Vec<ChainStep>,
}

/// A response together with the engine's report for the same run.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub response: ChainResponse,
    pub report: SearchReport,
}

/// Resolve a caller-supplied timeout to whole seconds.
///
/// Accepts JSON numbers and numeric strings. Fractions round up. Values above
/// `max` clamp to `max`, values below `min` clamp to `min`; absent,
/// non-numeric, and non-positive values yield `default`.
#[must_use]
pub fn clamp_timeout(raw: Option<&Value>, bounds: &TimeoutConfig) -> u64 {
    match raw.and_then(requested_seconds) {
        Some(seconds) if seconds > 0 => seconds.clamp(bounds.min, bounds.max),
        _ => bounds.default,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn requested_seconds(raw: &Value) -> Option<u64> {
    // Float-to-int `as` saturates, so huge values still clamp to `max`.
    let from_float = |f: f64| (f.is_finite() && f > 0.0).then(|| f.ceil() as u64);
    match raw {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(from_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(from_float))
        }
        _ => None,
    }
}

/// Stateless longest-chain service over a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ChainQueryService {
    config: ServiceConfig,
}

impl ChainQueryService {
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Answer one request.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn run(
        &self,
        request: &LongestChainRequest,
        cancel: Option<CancelToken>,
    ) -> Result<ChainResponse, QueryError> {
        self.execute(request, cancel).map(|outcome| outcome.response)
    }

    /// Answer one request and keep the engine's report.
    ///
    /// The deadline is measured from entry, so graph construction counts
    /// against the caller's timeout.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPuzzleSet`] for an empty puzzle set or
    /// duplicate ids, and [`QueryError::Search`] if the configured policy is
    /// rejected. Running out of time is not an error.
    pub fn execute(
        &self,
        request: &LongestChainRequest,
        cancel: Option<CancelToken>,
    ) -> Result<QueryOutcome, QueryError> {
        let started = Instant::now();
        let timeout_seconds = clamp_timeout(request.timeout.as_ref(), &self.config.timeout);
        if request.timeout.is_some()
            && request.timeout.as_ref().and_then(requested_seconds) != Some(timeout_seconds)
        {
            warn!(requested = ?request.timeout, timeout_seconds, "timeout adjusted");
        }
        info!(
            puzzles = request.puzzles.len(),
            timeout_seconds, "finding longest chain"
        );

        let puzzles: Vec<Puzzle> = request.puzzles.iter().map(PuzzleRecord::to_puzzle).collect();
        let graph = PuzzleGraph::build(&puzzles)?;

        let mut stop = StopSignal::at(started + Duration::from_secs(timeout_seconds));
        if let Some(cancel) = cancel {
            stop = stop.with_cancel(cancel);
        }
        let outcome = search(&graph, &stop, &self.config.search)?;
        debug_assert!(outcome.chain.validate().is_ok());
        for link in outcome.chain.connections() {
            debug!(from = %link.from.id, to = %link.to.id, token = %link.from.gives, "chain link");
        }

        let labels: HashMap<PuzzleId, String> = request
            .puzzles
            .iter()
            .map(|r| (PuzzleId(r.id), r.label()))
            .collect();
        let chain: Vec<ChainStep> = outcome
            .chain
            .puzzles()
            .iter()
            .map(|p| ChainStep {
                puzzle_number: labels
                    .get(&p.id)
                    .cloned()
                    .unwrap_or_else(|| p.id.to_string()),
                puzzle_sides: PuzzleSides {
                    takes: p.takes.to_string(),
                    gives: p.gives.to_string(),
                },
            })
            .collect();

        let processing_time_seconds = started.elapsed().as_secs_f64();
        info!(
            length = chain.len(),
            termination = outcome.report.termination.as_str(),
            processing_time_seconds,
            "longest chain found"
        );

        Ok(QueryOutcome {
            response: ChainResponse {
                chain_length: chain.len(),
                processing_time_seconds,
                timeout_seconds,
                chain,
            },
            report: outcome.report,
        })
    }
}
