//! Text and JSON renderings of a computed response.
//!
//! Both are pure formatting: they never re-run the search.

use std::fmt::Write as _;

use crate::query::ChainResponse;

/// Plain-text export, one line per chain step with connection annotations.
#[must_use]
pub fn render_text(response: &ChainResponse) -> String {
    if response.chain.is_empty() {
        return "No chain found\n".to_string();
    }
    let mut out = String::new();
    out.push_str("Puzzle Chain Export\n");
    out.push_str("===================\n\n");
    let _ = writeln!(out, "Chain Length: {} puzzles\n", response.chain_length);
    out.push_str("Chain:\n\n");
    for (i, step) in response.chain.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. Puzzle #{} - Takes: {}, Gives: {}",
            i + 1,
            step.puzzle_number,
            step.puzzle_sides.takes,
            step.puzzle_sides.gives
        );
        if let Some(prev) = i.checked_sub(1).map(|p| &response.chain[p]) {
            let _ = writeln!(
                out,
                "   Connection: {} → {}",
                prev.puzzle_sides.gives, step.puzzle_sides.takes
            );
        }
    }
    out
}

/// JSON export: the response verbatim, pretty-printed.
///
/// # Errors
///
/// Returns the serializer error; a [`ChainResponse`] with a non-finite
/// `processing_time_seconds` serializes it as `null` rather than failing.
pub fn render_json(response: &ChainResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(response)
}
