//! Puzzle records and the opaque tokens that link them.
//!
//! A puzzle is an edge in the chain graph: it consumes its `takes` token and
//! produces its `gives` token. Tokens are compared for equality only; nothing
//! in the kernel interprets their content.

pub mod derive;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An opaque, equality-comparable chain token.
///
/// Cloning is a reference-count bump, so the graph can hand tokens out
/// freely without copying the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Arc<str>);

impl Token {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(Arc::from(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable puzzle identifier, unique within one puzzle set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PuzzleId(pub u64);

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable puzzle: one directed edge from `takes` to `gives`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: PuzzleId,
    pub takes: Token,
    pub gives: Token,
}

impl Puzzle {
    #[must_use]
    pub fn new(id: u64, takes: impl Into<Token>, gives: impl Into<Token>) -> Self {
        Self {
            id: PuzzleId(id),
            takes: takes.into(),
            gives: gives.into(),
        }
    }

    /// Whether `next` can follow this puzzle in a chain.
    #[must_use]
    pub fn links_to(&self, next: &Puzzle) -> bool {
        self.gives == next.takes
    }
}
