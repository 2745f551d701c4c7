//! Content hashes: `"sha256:<hex>"` strings over domain-prefixed bytes.

use std::fmt;

use sha2::{Digest, Sha256};

use super::domain::HashDomain;

/// A content-addressed hash with algorithm identifier.
///
/// Invariant: exactly one `:` with non-empty text on both sides (enforced by
/// [`ContentHash::parse`] and by construction in [`canonical_hash`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"`. Returns `None` on a malformed string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 over `domain || data`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let full = format!("sha256:{}", hex::encode(hasher.finalize()));
    ContentHash { full, colon: 6 }
}
