//! The puzzle graph: tokens as nodes, puzzles as directed edges.
//!
//! Built once per query and read-only afterwards. Nodes and edges live in
//! arenas addressed by [`NodeIx`] and [`EdgeIx`], so search state can refer
//! to them by plain integers.
//!
//! # Ordering
//!
//! - Node indices follow first appearance, scanning puzzles in input order
//!   and visiting `takes` before `gives`.
//! - Edge index `i` is the `i`-th input puzzle.
//! - Each node's outgoing edge list is in input order.
//!
//! All three are deterministic for a given input sequence, which is what
//! makes search runs reproducible.

pub mod chain;

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::digest::{puzzle_set_digest, ContentHash};
use crate::puzzle::{Puzzle, PuzzleId, Token};

pub use chain::{Chain, ChainViolation, Connection};

/// Index of a node (distinct token) in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIx(pub u32);

/// Index of an edge (puzzle) in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIx(pub u32);

impl NodeIx {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeIx {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Typed failure for graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The puzzle set cannot be searched: empty, duplicated ids, or too large
    /// for the index width.
    #[error("invalid puzzle set: {detail}")]
    InvalidPuzzleSet { detail: String },
}

/// One directed edge, carrying its puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeIx,
    pub to: NodeIx,
    pub puzzle: Puzzle,
}

/// Adjacency view over a puzzle set.
#[derive(Debug, Clone)]
pub struct PuzzleGraph {
    tokens: Vec<Token>,
    edges: Vec<Edge>,
    out_edges: Vec<Vec<EdgeIx>>,
    in_degree: Vec<u32>,
    by_id: HashMap<PuzzleId, EdgeIx>,
    digest: ContentHash,
}

impl PuzzleGraph {
    /// Build the graph for a puzzle set.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidPuzzleSet`] if `puzzles` is empty, if two
    /// puzzles share an id, or if the set does not fit `u32` indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(puzzles: &[Puzzle]) -> Result<Self, GraphError> {
        if puzzles.is_empty() {
            return Err(GraphError::InvalidPuzzleSet {
                detail: "no puzzles".into(),
            });
        }
        if u32::try_from(puzzles.len()).is_err() {
            return Err(GraphError::InvalidPuzzleSet {
                detail: format!("{} puzzles exceed the edge index range", puzzles.len()),
            });
        }

        let mut node_of: BTreeMap<Token, NodeIx> = BTreeMap::new();
        let mut tokens: Vec<Token> = Vec::new();
        let mut intern = |token: &Token| -> NodeIx {
            *node_of.entry(token.clone()).or_insert_with(|| {
                let ix = NodeIx(tokens.len() as u32);
                tokens.push(token.clone());
                ix
            })
        };

        let mut edges = Vec::with_capacity(puzzles.len());
        let mut by_id = HashMap::with_capacity(puzzles.len());
        for (i, puzzle) in puzzles.iter().enumerate() {
            let from = intern(&puzzle.takes);
            let to = intern(&puzzle.gives);
            let ix = EdgeIx(i as u32);
            if by_id.insert(puzzle.id, ix).is_some() {
                return Err(GraphError::InvalidPuzzleSet {
                    detail: format!("duplicate puzzle id {}", puzzle.id),
                });
            }
            edges.push(Edge {
                from,
                to,
                puzzle: puzzle.clone(),
            });
        }

        let mut out_edges = vec![Vec::new(); tokens.len()];
        let mut in_degree = vec![0u32; tokens.len()];
        for (i, edge) in edges.iter().enumerate() {
            out_edges[edge.from.index()].push(EdgeIx(i as u32));
            in_degree[edge.to.index()] += 1;
        }

        Ok(Self {
            tokens,
            edges,
            out_edges,
            in_degree,
            by_id,
            digest: puzzle_set_digest(puzzles),
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.tokens.len()
    }

    /// Equals the puzzle count.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node indices in arena order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn nodes(&self) -> impl Iterator<Item = NodeIx> + '_ {
        (0..self.tokens.len()).map(|i| NodeIx(i as u32))
    }

    #[must_use]
    pub fn token(&self, node: NodeIx) -> &Token {
        &self.tokens[node.index()]
    }

    #[must_use]
    pub fn edge(&self, edge: EdgeIx) -> &Edge {
        &self.edges[edge.index()]
    }

    #[must_use]
    pub fn puzzle(&self, edge: EdgeIx) -> &Puzzle {
        &self.edges[edge.index()].puzzle
    }

    /// Outgoing edges of `node`, in input order.
    #[must_use]
    pub fn out_edges(&self, node: NodeIx) -> &[EdgeIx] {
        &self.out_edges[node.index()]
    }

    #[must_use]
    pub fn out_degree(&self, node: NodeIx) -> usize {
        self.out_edges[node.index()].len()
    }

    #[must_use]
    pub fn in_degree(&self, node: NodeIx) -> usize {
        self.in_degree[node.index()] as usize
    }

    #[must_use]
    pub fn edge_of(&self, id: PuzzleId) -> Option<EdgeIx> {
        self.by_id.get(&id).copied()
    }

    /// Materialize a chain from edge indices.
    #[must_use]
    pub fn chain_from_edges(&self, edges: &[EdgeIx]) -> Chain {
        Chain::new(edges.iter().map(|&e| self.puzzle(e).clone()).collect())
    }

    /// Digest of the input puzzle sequence, taken at build time so that
    /// reports can carry it without hashing the set again.
    #[must_use]
    pub fn puzzle_set_digest(&self) -> &ContentHash {
        &self.digest
    }
}
