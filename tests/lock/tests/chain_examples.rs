//! Worked examples: known inputs with known longest chains.

use std::time::Duration;

use catena_kernel::graph::PuzzleGraph;
use catena_kernel::puzzle::Puzzle;
use catena_search::{search, SearchPolicy, StopSignal, TerminationReason};
use lock_tests::{lcg_puzzles, linked_pair_with_stray, triangle};

fn ids_of(puzzles: &[Puzzle], policy: &SearchPolicy) -> Vec<u64> {
    let graph = PuzzleGraph::build(puzzles).unwrap();
    let outcome = search(&graph, &StopSignal::after(Duration::from_secs(5)), policy).unwrap();
    assert!(outcome.chain.validate().is_ok());
    outcome.chain.ids().iter().map(|id| id.0).collect()
}

#[test]
fn linked_pair_excludes_the_stray_puzzle() {
    for workers in [1, 3] {
        let policy = SearchPolicy {
            workers,
            ..SearchPolicy::default()
        };
        assert_eq!(ids_of(&linked_pair_with_stray(), &policy), [1, 2]);
    }
}

#[test]
fn triangle_uses_every_edge_once() {
    let graph = PuzzleGraph::build(&triangle()).unwrap();
    let outcome = search(
        &graph,
        &StopSignal::after(Duration::from_secs(5)),
        &SearchPolicy::default(),
    )
    .unwrap();
    assert_eq!(outcome.chain.len(), 3);
    assert_eq!(outcome.report.termination, TerminationReason::PerfectChain);

    let mut ids = outcome.chain.ids();
    ids.sort();
    assert_eq!(ids.iter().map(|id| id.0).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn triangle_from_any_rotation_is_perfect() {
    let base = triangle();
    for shift in 0..3 {
        let mut rotated = base.clone();
        rotated.rotate_left(shift);
        assert_eq!(ids_of(&rotated, &SearchPolicy::default()).len(), 3);
    }
}

#[test]
fn self_loops_and_parallel_edges_are_all_usable() {
    let puzzles = vec![
        Puzzle::new(1, "a", "b"),
        Puzzle::new(2, "b", "b"),
        Puzzle::new(3, "b", "a"),
        Puzzle::new(4, "a", "b"),
    ];
    assert_eq!(ids_of(&puzzles, &SearchPolicy::default()), [1, 2, 3, 4]);
}

#[test]
fn generated_set_has_known_longest_chain() {
    // 16 puzzles over 6 tokens; two puzzles cannot be fitted in.
    let ids = ids_of(&lcg_puzzles(2, 16, 6), &SearchPolicy::default());
    assert_eq!(ids, [2, 5, 9, 12, 3, 7, 8, 13, 15, 6, 0, 1, 10, 11]);
}
