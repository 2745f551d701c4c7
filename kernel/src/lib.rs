//! Catena Kernel: puzzles, the puzzle graph, and canonical digests.
//!
//! # Module Dependency Direction
//!
//! `puzzle` ← `graph` ← `digest`
//!
//! The one crossing back is `PuzzleGraph::build`, which stamps the graph with
//! its puzzle-set digest. The kernel performs no I/O and spawns no threads; searching
//! lives in `catena_search`.

#![forbid(unsafe_code)]

pub mod digest;
pub mod graph;
pub mod puzzle;
