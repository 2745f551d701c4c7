//! Depth-first trail frontier: an explicit stack instead of recursion.
//!
//! Each frame remembers the node it sits on and how far through that node's
//! ordered edge list it has got. The trail (edges taken from the start node)
//! and the used-edge set move in lockstep with the frames, so backtracking is
//! O(1) and needs no call stack.

use catena_kernel::graph::{EdgeIx, NodeIx};

/// Fixed-capacity bitset over edge indices.
#[derive(Debug, Clone)]
pub struct EdgeSet {
    words: Vec<u64>,
    count: usize,
}

impl EdgeSet {
    #[must_use]
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            words: vec![0; edges.div_ceil(64)],
            count: 0,
        }
    }

    #[must_use]
    pub fn contains(&self, edge: EdgeIx) -> bool {
        let i = edge.index();
        self.words[i / 64] & (1 << (i % 64)) != 0
    }

    /// Returns `false` if the edge was already present.
    pub fn insert(&mut self, edge: EdgeIx) -> bool {
        let i = edge.index();
        let bit = 1 << (i % 64);
        let word = &mut self.words[i / 64];
        if *word & bit != 0 {
            return false;
        }
        *word |= bit;
        self.count += 1;
        true
    }

    /// Returns `false` if the edge was not present.
    pub fn remove(&mut self, edge: EdgeIx) -> bool {
        let i = edge.index();
        let bit = 1 << (i % 64);
        let word = &mut self.words[i / 64];
        if *word & bit == 0 {
            return false;
        }
        *word &= !bit;
        self.count -= 1;
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
        self.count = 0;
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeIx,
    cursor: usize,
}

/// Search state for one worker: current trail plus its backtracking stack.
#[derive(Debug, Clone)]
pub struct TrailFrontier {
    frames: Vec<Frame>,
    trail: Vec<EdgeIx>,
    used: EdgeSet,
}

impl TrailFrontier {
    #[must_use]
    pub fn new(edge_count: usize) -> Self {
        Self {
            frames: Vec::with_capacity(edge_count + 1),
            trail: Vec::with_capacity(edge_count),
            used: EdgeSet::with_capacity(edge_count),
        }
    }

    /// Start a fresh trail at `start`, discarding any previous state.
    pub fn reset(&mut self, start: NodeIx) {
        self.frames.clear();
        self.trail.clear();
        self.used.clear();
        self.frames.push(Frame {
            node: start,
            cursor: 0,
        });
    }

    /// The node at the end of the current trail; `None` once the start
    /// frame has been backtracked.
    #[must_use]
    pub fn current(&self) -> Option<NodeIx> {
        self.frames.last().map(|f| f.node)
    }

    /// Advance the top frame's cursor to its next unused edge.
    ///
    /// `ordered` must be the same ordered edge list for every call on the
    /// same frame.
    pub fn next_edge(&mut self, ordered: &[EdgeIx]) -> Option<EdgeIx> {
        let frame = self.frames.last_mut()?;
        while let Some(&edge) = ordered.get(frame.cursor) {
            frame.cursor += 1;
            if !self.used.contains(edge) {
                return Some(edge);
            }
        }
        None
    }

    /// Take `edge` and move to `to`.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is already on the trail: an edge used twice would
    /// silently corrupt the result.
    pub fn descend(&mut self, edge: EdgeIx, to: NodeIx) {
        assert!(
            self.used.insert(edge),
            "edge {} descended while already on the trail",
            edge.0
        );
        self.trail.push(edge);
        self.frames.push(Frame { node: to, cursor: 0 });
    }

    /// Pop the top frame, releasing the edge that led to it.
    ///
    /// Returns the released edge, or `None` when the start frame itself was
    /// popped (the subtree is exhausted).
    ///
    /// # Panics
    ///
    /// Panics if the trail and the used set disagree.
    pub fn backtrack(&mut self) -> Option<EdgeIx> {
        self.frames.pop()?;
        if self.frames.is_empty() {
            assert!(self.trail.is_empty(), "start frame popped with a non-empty trail");
            return None;
        }
        let edge = self.trail.pop();
        if let Some(edge) = edge {
            assert!(
                self.used.remove(edge),
                "edge {} released but not marked used",
                edge.0
            );
        }
        edge
    }

    #[must_use]
    pub fn trail(&self) -> &[EdgeIx] {
        &self.trail
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.trail.len()
    }
}
