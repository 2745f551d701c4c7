//! Search policy types.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Tunables for one search invocation.
///
/// None of these change what a valid answer is; they change how fast a good
/// answer is found and how the work is spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    /// 1 runs in the calling thread; more fans starting nodes out over a
    /// rayon pool of this size.
    pub workers: usize,
    /// Order in which a node's outgoing edges are tried.
    pub edge_order: EdgeOrder,
    /// Order in which starting nodes are tried.
    pub start_order: StartOrder,
    /// Optional hard cap on node expansions, summed across workers.
    pub max_expansions: Option<u64>,
}

impl SearchPolicy {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for zero workers or a zero
    /// expansion cap.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.workers == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "workers must be at least 1".into(),
            });
        }
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be positive when set".into(),
            });
        }
        Ok(())
    }

    /// Single-threaded policy with the given orderings.
    #[must_use]
    pub fn sequential(edge_order: EdgeOrder, start_order: StartOrder) -> Self {
        Self {
            workers: 1,
            edge_order,
            start_order,
            max_expansions: None,
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::sequential(EdgeOrder::Input, StartOrder::NodeOrder)
    }
}

/// Edge selection order at each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrder {
    /// The graph's stored order (input order).
    Input,
    /// Edges whose target has more outgoing edges first; ties keep input order.
    TargetOutDegree,
}

/// Starting node order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOrder {
    /// Node arena order (first appearance in the input).
    NodeOrder,
    /// Largest `out_degree - in_degree` first; ties keep node order.
    SurplusFirst,
}

impl EdgeOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::TargetOutDegree => "target_out_degree",
        }
    }
}

impl StartOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NodeOrder => "node_order",
            Self::SurplusFirst => "surplus_first",
        }
    }
}
