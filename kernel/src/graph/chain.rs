//! Chains: ordered, edge-disjoint walks through the puzzle graph.

use std::collections::HashSet;

use thiserror::Error;

use crate::puzzle::{Puzzle, PuzzleId, Token};

/// Why a sequence of puzzles is not a valid chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainViolation {
    /// `puzzles[position].gives != puzzles[position + 1].takes`.
    #[error("broken link at position {position}: {gives} does not match {takes}")]
    BrokenLink {
        position: usize,
        gives: Token,
        takes: Token,
    },
    /// A puzzle id appears twice.
    #[error("puzzle {id} repeated at position {position}")]
    RepeatedPuzzle { id: PuzzleId, position: usize },
}

/// The link between two adjacent chain steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<'a> {
    pub from: &'a Puzzle,
    pub to: &'a Puzzle,
}

impl Connection<'_> {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.from.links_to(self.to)
    }
}

/// An ordered sequence of puzzles. Empty means "no chain found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    puzzles: Vec<Puzzle>,
}

impl Chain {
    #[must_use]
    pub fn new(puzzles: Vec<Puzzle>) -> Self {
        Self { puzzles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    #[must_use]
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    #[must_use]
    pub fn ids(&self) -> Vec<PuzzleId> {
        self.puzzles.iter().map(|p| p.id).collect()
    }

    /// Adjacent pairs, in chain order.
    pub fn connections(&self) -> impl Iterator<Item = Connection<'_>> + '_ {
        self.puzzles
            .windows(2)
            .map(|w| Connection { from: &w[0], to: &w[1] })
    }

    /// Check linkage and id uniqueness, reporting the first violation found.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChainViolation`] in chain order.
    pub fn validate(&self) -> Result<(), ChainViolation> {
        let mut seen = HashSet::with_capacity(self.puzzles.len());
        for (position, puzzle) in self.puzzles.iter().enumerate() {
            if !seen.insert(puzzle.id) {
                return Err(ChainViolation::RepeatedPuzzle {
                    id: puzzle.id,
                    position,
                });
            }
            if let Some(next) = self.puzzles.get(position + 1) {
                if !puzzle.links_to(next) {
                    return Err(ChainViolation::BrokenLink {
                        position,
                        gives: puzzle.gives.clone(),
                        takes: next.takes.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
