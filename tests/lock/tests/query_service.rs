//! End-to-end checks through the query boundary: config file, request,
//! response, and both exports.

use std::io::Write;

use catena_harness::{
    render_json, render_text, ChainQueryService, ChainResponse, LongestChainRequest,
    PuzzleRecord, ServiceConfig,
};
use catena_kernel::puzzle::derive::{PuzzleSetBuilder, SliceDeriver};
use catena_search::{CancelToken, TerminationReason};
use lock_tests::{lcg_puzzles, linked_pair_with_stray, records, triangle};
use serde_json::json;

fn config_file(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

#[test]
fn request_json_to_text_export() {
    let request: LongestChainRequest = serde_json::from_value(json!({
        "puzzles": [
            {"id": 1, "takes": "12", "gives": "23"},
            {"id": 2, "takes": "23", "gives": "34"},
            {"id": 3, "takes": "99", "gives": "01"}
        ],
        "timeout": 5
    }))
    .unwrap();
    let response = ChainQueryService::default().run(&request, None).unwrap();
    assert_eq!(response.chain_length, 2);
    assert_eq!(response.timeout_seconds, 5);

    let text = render_text(&response);
    assert!(text.contains("Chain Length: 2 puzzles"));
    assert!(text.contains("1. Puzzle #1 - Takes: 12, Gives: 23"));
    assert!(text.contains("2. Puzzle #2 - Takes: 23, Gives: 34"));
    assert!(text.contains("   Connection: 23 → 23"));
    assert!(!text.contains("99"));
}

#[test]
fn json_export_round_trips_the_response() {
    let request = LongestChainRequest::new(records(&triangle()));
    let response = ChainQueryService::default().run(&request, None).unwrap();
    let json = render_json(&response).unwrap();
    let parsed: ChainResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, response);
    assert_eq!(parsed.chain_length, 3);
}

#[test]
fn out_of_range_timeouts_are_clamped() {
    let service = ChainQueryService::default();
    for (raw, expected) in [(json!(10_000), 600), (json!(-3), 60), (json!("abc"), 60)] {
        let mut request = LongestChainRequest::new(records(&linked_pair_with_stray()));
        request.timeout = Some(raw);
        assert_eq!(service.run(&request, None).unwrap().timeout_seconds, expected);
    }
}

#[test]
fn config_file_drives_policy_and_timeout_bounds() {
    let file = config_file(
        r#"
        [timeout]
        default = 2
        max = 3

        [search]
        workers = 2
        edge_order = "target_out_degree"
        "#,
    );
    let config = ServiceConfig::load_from_file(file.path()).unwrap();
    let service = ChainQueryService::new(config);

    let request = LongestChainRequest::new(records(&lcg_puzzles(2, 16, 6))).with_timeout(30);
    let outcome = service.execute(&request, None).unwrap();
    assert_eq!(outcome.response.timeout_seconds, 3);
    assert_eq!(outcome.report.policy.workers, 2);
    assert_eq!(outcome.response.chain_length, 14);
}

#[test]
fn cancelled_request_still_answers() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let request = LongestChainRequest::new(records(&linked_pair_with_stray()));
    let outcome = ChainQueryService::default()
        .execute(&request, Some(cancel))
        .unwrap();
    assert_eq!(outcome.report.termination, TerminationReason::Cancelled);
    assert_eq!(outcome.response.chain_length, 1);
}

#[test]
fn raw_identifiers_flow_through_a_deriver() {
    // Caller-chosen rule: first two digits take, last two give.
    let deriver = SliceDeriver::new(6, 0..2, 4..6).unwrap();
    let mut builder = PuzzleSetBuilder::new(&deriver);
    for raw in ["104211", "11x211", "115012", "129910"] {
        builder.push(raw);
    }
    assert_eq!(builder.rejected().len(), 1);

    let records: Vec<PuzzleRecord> = builder.finish().into_iter().map(Into::into).collect();
    let response = ChainQueryService::default()
        .run(&LongestChainRequest::new(records), None)
        .unwrap();

    let numbers: Vec<&str> = response
        .chain
        .iter()
        .map(|s| s.puzzle_number.as_str())
        .collect();
    assert_eq!(numbers, ["104211", "115012", "129910"]);
}
