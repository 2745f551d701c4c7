//! Catena Harness: the query boundary around the search engine.
//!
//! The harness accepts a puzzle set and timeout, drives
//! `catena_search::search` against a deadline, and shapes the result for
//! callers (`query`), renders it as text or JSON (`export`), and owns the
//! ambient pieces a binary needs (`config`, `logging`).
//!
//! The harness does NOT implement search logic; it delegates to the engine.

#![forbid(unsafe_code)]

pub mod config;
pub mod export;
pub mod logging;
pub mod query;

pub use config::{ConfigError, ServiceConfig, TimeoutConfig};
pub use export::{render_json, render_text};
pub use query::{
    clamp_timeout, ChainQueryService, ChainResponse, ChainStep, LongestChainRequest, PuzzleRecord,
    PuzzleSides, QueryError, QueryOutcome,
};
