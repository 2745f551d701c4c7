//! Per-search edge and start orderings, computed once from the policy.

use catena_kernel::graph::{EdgeIx, NodeIx, PuzzleGraph};

use crate::policy::{EdgeOrder, StartOrder};

/// Ordered outgoing edge lists, one per node.
#[derive(Debug, Clone)]
pub struct OrderedAdjacency {
    lists: Vec<Vec<EdgeIx>>,
}

impl OrderedAdjacency {
    #[must_use]
    pub fn new(graph: &PuzzleGraph, order: EdgeOrder) -> Self {
        let lists = graph
            .nodes()
            .map(|node| {
                let mut edges = graph.out_edges(node).to_vec();
                if order == EdgeOrder::TargetOutDegree {
                    // Stable: ties keep input order.
                    edges.sort_by_key(|&e| std::cmp::Reverse(graph.out_degree(graph.edge(e).to)));
                }
                edges
            })
            .collect();
        Self { lists }
    }

    #[must_use]
    pub fn out(&self, node: NodeIx) -> &[EdgeIx] {
        &self.lists[node.index()]
    }
}

/// Nodes with at least one outgoing edge, in the policy's start order.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn start_nodes(graph: &PuzzleGraph, order: StartOrder) -> Vec<NodeIx> {
    let mut starts: Vec<NodeIx> = graph.nodes().filter(|&n| graph.out_degree(n) > 0).collect();
    if order == StartOrder::SurplusFirst {
        starts.sort_by_key(|&n| {
            std::cmp::Reverse(graph.out_degree(n) as i64 - graph.in_degree(n) as i64)
        });
    }
    starts
}
