//! A priority collection of tree fragments.
//!
//! Insertion appends in O(1); extraction scans every fragment for the
//! minimum weight. The forest never holds more than `alphabet_size + 1`
//! fragments, so the linear scan keeps insertion order intact and makes the
//! tie-break policy trivial to state.

use crate::codec::params::TieBreak;
use crate::codec::tree::CodeTreeNode;

#[derive(Debug, Clone, Default)]
pub struct PriorityForest {
    fragments: Vec<CodeTreeNode>,
    tie_break: TieBreak,
}

impl PriorityForest {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            fragments: Vec::new(),
            tie_break,
        }
    }

    pub fn with_capacity(capacity: usize, tie_break: TieBreak) -> Self {
        Self {
            fragments: Vec::with_capacity(capacity),
            tie_break,
        }
    }

    pub fn insert(&mut self, node: CodeTreeNode) {
        self.fragments.push(node);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Weight of the fragment `extract_min` would return next.
    pub fn min_weight(&self) -> Option<u64> {
        self.find_min().map(|idx| self.fragments[idx].weight())
    }

    /// Removes and returns a minimum-weight fragment, or `None` when empty.
    pub fn extract_min(&mut self) -> Option<CodeTreeNode> {
        let idx = self.find_min()?;
        // `remove`, not `swap_remove`: the tie-break depends on insertion order.
        Some(self.fragments.remove(idx))
    }

    fn find_min(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, node) in self.fragments.iter().enumerate() {
            let replace = match best {
                None => true,
                Some(b) => {
                    let current = self.fragments[b].weight();
                    match self.tie_break {
                        TieBreak::FirstInserted => node.weight() < current,
                        TieBreak::LastInserted => node.weight() <= current,
                    }
                }
            };
            if replace {
                best = Some(idx);
            }
        }
        best
    }
}
