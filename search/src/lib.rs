//! Catena Search: time-bounded, anytime longest-chain search.
//!
//! Depends only on `catena_kernel`; the query service in `catena_harness`
//! sits on top.
//!
//! ```text
//! catena_kernel  ←  catena_search  ←  catena_harness
//! (puzzles, graph)   (engine, tracker)   (query, export, config)
//! ```
//!
//! # Key types
//!
//! - [`SearchPolicy`] — worker count, orderings, optional expansion cap
//! - [`StopSignal`] / [`CancelToken`] — deadline and external early stop
//! - [`BestTracker`] — best-so-far chain shared by all workers
//! - [`SearchReport`] — termination reason and audit data for one run

#![forbid(unsafe_code)]

pub mod adjacency;
pub mod error;
pub mod frontier;
pub mod policy;
pub mod report;
pub mod search;
pub mod stop;
pub mod tracker;

pub use error::SearchError;
pub use policy::{EdgeOrder, SearchPolicy, StartOrder};
pub use report::{SearchReport, TerminationReason};
pub use search::{search, SearchOutcome};
pub use stop::{CancelToken, StopCause, StopSignal};
pub use tracker::{BestTracker, Improvement, TrackedBest};
