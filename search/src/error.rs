//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Running out of time,
//! cancellation, and exhausting the search space are normal terminations,
//! expressed via [`crate::report::TerminationReason`], and always produce a
//! (possibly empty) chain.

use thiserror::Error;

/// Typed failure for pre-flight search validation.
///
/// Returned before any node is expanded; no report is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The policy has a value the engine cannot run with.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
    /// The worker pool could not be started.
    #[error("failed to start worker pool: {detail}")]
    WorkerPool { detail: String },
}
