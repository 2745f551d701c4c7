//! Pluggable derivation of `(takes, gives)` tokens from raw puzzle identifiers.
//!
//! The kernel does not know how a raw identifier splits into its two chain
//! halves. Callers supply a [`TokenDeriver`]; [`SliceDeriver`] covers the
//! common case of fixed-width digit strings sliced at caller-chosen ranges.

use std::ops::Range;

use thiserror::Error;

use super::{Puzzle, PuzzleId, Token};

/// Failure to derive tokens from a raw identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// The identifier does not have the width the deriver expects.
    #[error("identifier {raw:?} has width {actual}, expected {expected}")]
    WrongWidth {
        raw: String,
        expected: usize,
        actual: usize,
    },
    /// The identifier contains a non-digit character.
    #[error("identifier {raw:?} is not all ASCII digits")]
    NotDigits { raw: String },
    /// The configured slice ranges do not fit the configured width.
    #[error("slice {range:?} does not fit width {width}")]
    RangeOutOfBounds { range: Range<usize>, width: usize },
}

/// Turns a raw puzzle identifier into its `(takes, gives)` tokens.
pub trait TokenDeriver {
    /// Derive the two chain tokens.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError`] when `raw` is not a well-formed identifier for
    /// this deriver.
    fn derive(&self, raw: &str) -> Result<(Token, Token), DeriveError>;
}

impl<F> TokenDeriver for F
where
    F: Fn(&str) -> Result<(Token, Token), DeriveError>,
{
    fn derive(&self, raw: &str) -> Result<(Token, Token), DeriveError> {
        self(raw)
    }
}

/// Fixed-width digit identifiers sliced at two caller-chosen byte ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceDeriver {
    width: usize,
    takes: Range<usize>,
    gives: Range<usize>,
}

impl SliceDeriver {
    /// # Errors
    ///
    /// Returns [`DeriveError::RangeOutOfBounds`] if either range is empty or
    /// extends past `width`.
    pub fn new(width: usize, takes: Range<usize>, gives: Range<usize>) -> Result<Self, DeriveError> {
        for range in [&takes, &gives] {
            if range.is_empty() || range.end > width {
                return Err(DeriveError::RangeOutOfBounds {
                    range: range.clone(),
                    width,
                });
            }
        }
        Ok(Self {
            width,
            takes,
            gives,
        })
    }
}

impl TokenDeriver for SliceDeriver {
    fn derive(&self, raw: &str) -> Result<(Token, Token), DeriveError> {
        if raw.len() != self.width {
            return Err(DeriveError::WrongWidth {
                raw: raw.to_string(),
                expected: self.width,
                actual: raw.len(),
            });
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeriveError::NotDigits {
                raw: raw.to_string(),
            });
        }
        // All-ASCII, so byte ranges are char boundaries.
        Ok((
            Token::new(&raw[self.takes.clone()]),
            Token::new(&raw[self.gives.clone()]),
        ))
    }
}

/// A puzzle built from a raw identifier, with the identifier kept as label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPuzzle {
    pub puzzle: Puzzle,
    pub label: String,
}

/// Builds a puzzle set from raw identifiers, assigning sequential ids.
///
/// Ids count accepted identifiers only, so they stay dense (0, 1, 2, ...).
/// Rejected identifiers are collected with their line position.
pub struct PuzzleSetBuilder<'a> {
    deriver: &'a dyn TokenDeriver,
    accepted: Vec<LabeledPuzzle>,
    rejected: Vec<(usize, DeriveError)>,
    seen: usize,
}

impl<'a> PuzzleSetBuilder<'a> {
    #[must_use]
    pub fn new(deriver: &'a dyn TokenDeriver) -> Self {
        Self {
            deriver,
            accepted: Vec::new(),
            rejected: Vec::new(),
            seen: 0,
        }
    }

    /// Add one raw identifier. Returns the assigned id when accepted.
    pub fn push(&mut self, raw: &str) -> Option<PuzzleId> {
        let position = self.seen;
        self.seen += 1;
        match self.deriver.derive(raw) {
            Ok((takes, gives)) => {
                let id = PuzzleId(self.accepted.len() as u64);
                self.accepted.push(LabeledPuzzle {
                    puzzle: Puzzle { id, takes, gives },
                    label: raw.to_string(),
                });
                Some(id)
            }
            Err(e) => {
                self.rejected.push((position, e));
                None
            }
        }
    }

    #[must_use]
    pub fn rejected(&self) -> &[(usize, DeriveError)] {
        &self.rejected
    }

    #[must_use]
    pub fn finish(self) -> Vec<LabeledPuzzle> {
        self.accepted
    }
}
