//! Cross-process determinism test.
//!
//! Spawns the `chain_fixture` binary under several environment variants and
//! worker counts, and asserts that the outputs agree. This shows the search
//! result is not influenced by process-level state (cwd, locale, env vars,
//! hash seeds, thread scheduling).

use std::collections::BTreeMap;
use std::process::Command;

/// Run the fixture with `workers`, the given cwd, and env overrides.
/// Returns the parsed `key=value` lines.
fn run_variant(
    workers: usize,
    work_dir: &str,
    env_overrides: &[(&str, &str)],
) -> BTreeMap<String, String> {
    let bin = env!("CARGO_BIN_EXE_chain_fixture");
    let mut command = Command::new(bin);
    command
        .arg(workers.to_string())
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "chain_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .expect("stdout is valid UTF-8")
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn crossproc_sequential_output_is_identical() {
    let root = env!("CARGO_MANIFEST_DIR");
    let tmp = std::env::temp_dir();
    let tmp = tmp.to_str().expect("temp dir is UTF-8");

    let baseline = run_variant(1, root, &[]);
    let variants = [
        run_variant(1, tmp, &[]),
        run_variant(1, root, &[("LC_ALL", "C"), ("LANG", "C")]),
        run_variant(1, tmp, &[("LC_ALL", "en_US.UTF-8"), ("RUST_LOG", "debug")]),
    ];

    assert_eq!(baseline["termination"], "exhausted");
    assert_eq!(baseline["chain_length"], "14");
    assert!(baseline["report_digest"].starts_with("sha256:"));
    for (i, v) in variants.iter().enumerate() {
        assert_eq!(&baseline, v, "variant {} diverged from baseline", i + 1);
    }
}

#[test]
fn crossproc_worker_count_does_not_change_the_chain() {
    let root = env!("CARGO_MANIFEST_DIR");
    let sequential = run_variant(1, root, &[]);
    for workers in [2, 4, 8] {
        let parallel = run_variant(workers, root, &[]);
        for key in ["chain_ids", "chain_length", "termination", "chain_digest", "puzzle_set_digest"] {
            assert_eq!(
                sequential[key], parallel[key],
                "{key} differs with {workers} workers"
            );
        }
    }
}
