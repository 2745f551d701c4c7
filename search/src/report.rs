//! Search report: how a run ended and what it did on the way.
//!
//! The report is the audit record of one [`crate::search::search`] call.
//! Timing fields are integer microseconds so the canonical form stays
//! integer-only; [`SearchReport::digest`] leaves them out, which makes the
//! digest reproducible for any run whose outcome is deterministic.

use catena_kernel::digest::{canonical_hash, canonical_json_bytes, CanonError, ContentHash, HashDomain};

use crate::policy::SearchPolicy;
use crate::tracker::Improvement;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every trail from every start was explored.
    Exhausted,
    /// A trail used every puzzle; nothing longer exists.
    PerfectChain,
    /// The wall-clock deadline passed.
    DeadlineReached,
    /// The external cancel token was tripped.
    Cancelled,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::PerfectChain => "perfect_chain",
            Self::DeadlineReached => "deadline_reached",
            Self::Cancelled => "cancelled",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
        }
    }

    /// Whether the returned chain is known to be a longest one.
    #[must_use]
    pub fn is_optimal(self) -> bool {
        matches!(self, Self::Exhausted | Self::PerfectChain)
    }
}

/// Summary of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub termination: TerminationReason,
    pub policy: SearchPolicy,
    /// Node expansions, summed across workers.
    pub expansions: u64,
    pub starts_total: usize,
    /// Starts whose subtree was explored to the end.
    pub starts_completed: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub best_length: usize,
    pub best_start_rank: Option<u32>,
    /// Strict improvements of the best, in the order they were recorded.
    pub improvements: Vec<Improvement>,
    pub elapsed_micros: u64,
    pub puzzle_set_digest: ContentHash,
    pub chain_digest: ContentHash,
}

impl SearchReport {
    /// Full JSON form, timing included.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut value = self.identity_json();
        value["elapsed_micros"] = serde_json::json!(self.elapsed_micros);
        if let Some(list) = value["improvements"].as_array_mut() {
            for (entry, improvement) in list.iter_mut().zip(&self.improvements) {
                entry["elapsed_micros"] = serde_json::json!(improvement.elapsed_micros);
            }
        }
        value
    }

    /// Serialize the full report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the value contains a non-integer number,
    /// which this report never produces.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Digest of the report without its timing fields.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] under the same condition as
    /// [`Self::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.identity_json())?;
        Ok(canonical_hash(HashDomain::SearchReport, &bytes))
    }

    fn identity_json(&self) -> serde_json::Value {
        serde_json::json!({
            "best_length": self.best_length,
            "best_start_rank": self.best_start_rank,
            "chain_digest": self.chain_digest.as_str(),
            "edge_count": self.edge_count,
            "expansions": self.expansions,
            "improvements": self.improvements.iter().map(|i| serde_json::json!({
                "expansion": i.expansion,
                "length": i.length,
                "start_rank": i.start_rank,
            })).collect::<Vec<_>>(),
            "node_count": self.node_count,
            "policy": {
                "edge_order": self.policy.edge_order.as_str(),
                "max_expansions": self.policy.max_expansions,
                "start_order": self.policy.start_order.as_str(),
                "workers": self.policy.workers,
            },
            "puzzle_set_digest": self.puzzle_set_digest.as_str(),
            "starts_completed": self.starts_completed,
            "starts_total": self.starts_total,
            "termination": self.termination.as_str(),
        })
    }
}
