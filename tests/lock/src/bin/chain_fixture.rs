//! Binary that runs a fixed exhaustive search and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `chain_fixture [workers]`
//!
//! Output: key=value lines (see source for format).

use catena_kernel::graph::PuzzleGraph;
use catena_search::{search, EdgeOrder, SearchPolicy, StartOrder};
use lock_tests::{generous, lcg_puzzles};

fn main() {
    let workers = std::env::args()
        .nth(1)
        .map_or(1, |w| w.parse::<usize>().expect("workers must be a number"));
    let puzzles = lcg_puzzles(2, 16, 6);
    let graph = PuzzleGraph::build(&puzzles).expect("fixture puzzle set is valid");
    let policy = SearchPolicy {
        workers,
        ..SearchPolicy::sequential(EdgeOrder::TargetOutDegree, StartOrder::SurplusFirst)
    };
    let outcome = search(&graph, &generous(), &policy).expect("search failed");
    let report = &outcome.report;

    let ids: Vec<String> = outcome.chain.ids().iter().map(ToString::to_string).collect();
    println!("chain_ids={}", ids.join(","));
    println!("chain_length={}", outcome.chain.len());
    println!("termination={}", report.termination.as_str());
    println!("chain_digest={}", report.chain_digest);
    println!("puzzle_set_digest={}", report.puzzle_set_digest);
    if workers == 1 {
        // Expansion counts and the full report only reproduce without
        // worker interleaving.
        println!("expansions={}", report.expansions);
        println!(
            "report_digest={}",
            report.digest().expect("report digest failed")
        );
    }
}
