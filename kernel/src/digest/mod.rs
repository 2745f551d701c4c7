//! Canonical digests for puzzle sets, chains, and search reports.

pub mod canon;
pub mod domain;
pub mod hash;

use crate::graph::Chain;
use crate::puzzle::Puzzle;

pub use canon::{canonical_json_bytes, CanonError};
pub use domain::HashDomain;
pub use hash::{canonical_hash, ContentHash};

/// Digest of a puzzle set in input order.
///
/// Order matters: it fixes node numbering and edge order, and with them the
/// search's tie-breaks, so two orderings of the same puzzles are different
/// inputs.
#[must_use]
pub fn puzzle_set_digest(puzzles: &[Puzzle]) -> ContentHash {
    let value = serde_json::Value::Array(
        puzzles
            .iter()
            .map(|p| {
                serde_json::json!({
                    "gives": p.gives.as_str(),
                    "id": p.id.0,
                    "takes": p.takes.as_str(),
                })
            })
            .collect(),
    );
    // Strings and u64 only; canonicalization cannot fail here.
    let bytes = canonical_json_bytes(&value).unwrap_or_default();
    canonical_hash(HashDomain::PuzzleSet, &bytes)
}

/// Digest of a chain's puzzle id sequence.
#[must_use]
pub fn chain_digest(chain: &Chain) -> ContentHash {
    let mut data = Vec::with_capacity(chain.len() * 8);
    for id in chain.ids() {
        data.extend_from_slice(&id.0.to_le_bytes());
    }
    canonical_hash(HashDomain::Chain, &data)
}
