//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. The domain set has the expected count (catches forgotten additions)
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated and follow `CATENA::*::V1\0`
//! 4. No raw `CATENA::` domain literals in production source outside `domain.rs`
//! 5. Digests of the fixed fixtures are stable `sha256:` hashes
//! 6. `canonical_hash` agrees with an independent SHA-256 over `domain || data`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use catena_kernel::digest::{
    canonical_hash, canonical_json_bytes, chain_digest, puzzle_set_digest, HashDomain,
};
use catena_kernel::graph::Chain;
use lock_tests::{linked_pair_with_stray, triangle};

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        3,
        "expected 3 domain variants; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(seen.insert(domain.as_bytes()), "duplicate domain bytes: {domain}");
    }
}

#[test]
fn hash_domain_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(bytes.starts_with(b"CATENA::"), "{domain} does not start with CATENA::");
        assert!(bytes.ends_with(b"::V1\0"), "{domain} does not end with ::V1\\0");
    }
}

#[test]
fn domains_separate_identical_payloads() {
    let a = canonical_hash(HashDomain::Chain, b"payload");
    let b = canonical_hash(HashDomain::PuzzleSet, b"payload");
    assert_ne!(a, b);
    assert_eq!(a.algorithm(), "sha256");
    assert_eq!(a.hex_digest().len(), 64);
}

#[test]
fn fixture_digests_are_stable_and_distinct() {
    let stray = puzzle_set_digest(&linked_pair_with_stray());
    assert_eq!(stray, puzzle_set_digest(&linked_pair_with_stray()));
    assert_ne!(stray, puzzle_set_digest(&triangle()));
    assert_eq!(
        chain_digest(&Chain::new(triangle())),
        chain_digest(&Chain::new(triangle()))
    );
}

#[test]
fn canonical_hash_matches_independent_sha256() {
    use sha2::{Digest, Sha256};

    for domain in HashDomain::ALL {
        let payload = b"12->23";
        let mut hasher = Sha256::new();
        hasher.update(domain.as_bytes());
        hasher.update(payload);
        let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
        assert_eq!(canonical_hash(*domain, payload).as_str(), expected, "{domain}");
    }
}

#[test]
fn puzzle_set_digest_hashes_canonical_json() {
    use sha2::{Digest, Sha256};

    let value = serde_json::json!([
        {"gives": "b", "id": 1, "takes": "a"},
        {"gives": "c", "id": 2, "takes": "b"},
        {"gives": "a", "id": 3, "takes": "c"}
    ]);
    let bytes = canonical_json_bytes(&value).unwrap();
    assert_eq!(
        bytes,
        br#"[{"gives":"b","id":1,"takes":"a"},{"gives":"c","id":2,"takes":"b"},{"gives":"a","id":3,"takes":"c"}]"#
    );
    let mut hasher = Sha256::new();
    hasher.update(HashDomain::PuzzleSet.as_bytes());
    hasher.update(&bytes);
    assert_eq!(
        puzzle_set_digest(&triangle()).hex_digest(),
        hex::encode(hasher.finalize())
    );
}

/// Scan kernel/, search/, harness/ source for `b"CATENA::` literals. The only
/// file allowed to contain them is `domain.rs`.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let pattern = "b\"CATENA::";
    let authority_file = "domain.rs";
    let mut violations = Vec::new();
    let mut scanned = 0usize;

    for dir in ["kernel/src", "search/src", "harness/src"] {
        for path in walkdir(&root.join(dir)) {
            if path.extension().and_then(|e| e.to_str()) != Some("rs")
                || path.file_name().and_then(|n| n.to_str()) == Some(authority_file)
            {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            scanned += 1;
            for (i, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if !trimmed.starts_with("//") && trimmed.contains(pattern) {
                    violations.push(format!("  {}:{}: {}", path.display(), i + 1, trimmed));
                }
            }
        }
    }

    assert!(scanned > 0, "no production sources found under {}", root.display());
    assert!(
        violations.is_empty(),
        "raw CATENA:: domain literals found outside {authority_file}:\n{}",
        violations.join("\n")
    );
}

/// Simple recursive directory walker.
fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(walkdir(&path));
            } else {
                results.push(path);
            }
        }
    }
    results
}
