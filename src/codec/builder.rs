// src/codec/builder.rs

//! Builds the coding tree by repeatedly merging the two lightest fragments.

use log::debug;

use crate::codec::forest::PriorityForest;
use crate::codec::params::CodecParams;
use crate::codec::tree::{CodeTree, CodeTreeNode, Symbol};
use crate::counter::WeightSource;
use crate::utils::error::{HuffError, Result};

/// Collects leaves in a [`PriorityForest`] and merges them into one tree.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    forest: PriorityForest,
    sentinel: Symbol,
}

impl TreeBuilder {
    /// Creates a builder with an empty forest.
    pub fn new(params: &CodecParams) -> Self {
        Self {
            forest: PriorityForest::with_capacity(
                params.alphabet_size as usize + 1,
                params.tie_break,
            ),
            sentinel: params.sentinel(),
        }
    }

    /// Loads one leaf per symbol with a non-zero weight, in ascending symbol
    /// order, followed by the sentinel leaf with weight 1.
    pub fn from_weights<S: WeightSource + ?Sized>(source: &S, params: &CodecParams) -> Result<Self> {
        params.validate()?;
        let limit = params.alphabet_size as usize;
        if source.alphabet_size() > limit {
            let extra = (limit..source.alphabet_size())
                .find(|&s| source.weight(s as Symbol) > 0);
            if let Some(symbol) = extra {
                return Err(HuffError::InvalidArgument(format!(
                    "weight given for symbol {} outside the {}-symbol alphabet",
                    symbol, limit
                )));
            }
        }

        let mut builder = Self::new(params);
        for symbol in 0..params.alphabet_size {
            let weight = source.weight(symbol);
            if weight > 0 {
                builder.add_leaf(symbol, weight);
            }
        }
        builder.add_leaf(params.sentinel(), 1);
        Ok(builder)
    }

    pub fn add_leaf(&mut self, symbol: Symbol, weight: u64) {
        self.forest.insert(CodeTreeNode::leaf(symbol, weight));
    }

    /// Number of fragments waiting to be merged.
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Merges the forest down to a single root.
    ///
    /// A forest holding a single leaf yields that leaf as the root. An empty
    /// forest means the sentinel was never added and is a caller error.
    pub fn build(mut self) -> Result<CodeTree> {
        let leaves = self.forest.len();
        loop {
            let a = self.forest.extract_min().ok_or(HuffError::EmptyForest)?;
            match self.forest.extract_min() {
                None => {
                    debug!(
                        "built coding tree: {} leaves, depth {}, weight {}",
                        leaves,
                        a.depth(),
                        a.weight()
                    );
                    return Ok(CodeTree::new(a, self.sentinel));
                }
                Some(b) => self.forest.insert(CodeTreeNode::join(a, b)),
            }
        }
    }
}

/// Builds a coding tree from per-symbol weights plus the sentinel.
pub fn build_tree<S: WeightSource + ?Sized>(weights: &S, params: &CodecParams) -> Result<CodeTree> {
    TreeBuilder::from_weights(weights, params)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::params::TieBreak;

    fn weights(pairs: &[(u8, u64)]) -> Vec<u64> {
        let mut w = vec![0u64; 256];
        for &(sym, count) in pairs {
            w[sym as usize] = count;
        }
        w
    }

    #[test]
    fn test_weights_sum_up_the_tree() {
        let w = weights(&[(b'x', 10), (b'y', 3), (b'z', 7), (b'q', 1)]);
        let tree = build_tree(w.as_slice(), &CodecParams::default()).unwrap();
        assert!(tree.root().weights_consistent());
        assert_eq!(tree.total_weight(), 10 + 3 + 7 + 1 + 1);
        assert_eq!(tree.root().leaf_count(), 5);
        assert_eq!(tree.root().internal_count(), 4);
        assert_eq!(tree.sentinel(), 256);
    }

    #[test]
    fn test_only_sentinel_gives_leaf_root() {
        let tree = build_tree(&[0u64; 256], &CodecParams::default()).unwrap();
        assert_eq!(tree.root(), &CodeTreeNode::leaf(256, 1));
    }

    #[test]
    fn test_single_symbol_plus_sentinel() {
        let tree = build_tree(weights(&[(b'a', 42)]).as_slice(), &CodecParams::default()).unwrap();
        assert_eq!(tree.root().leaf_count(), 2);
        assert_eq!(tree.root().depth(), 1);
    }

    #[test]
    fn test_empty_forest_is_an_error() {
        let builder = TreeBuilder::new(&CodecParams::default());
        assert!(builder.is_empty());
        assert!(matches!(builder.build(), Err(HuffError::EmptyForest)));
    }

    #[test]
    fn test_first_inserted_tree_shape() {
        // A:5 B:2 C:1 D:1 EOF:1
        let w = weights(&[(b'A', 5), (b'B', 2), (b'C', 1), (b'D', 1)]);
        let tree = build_tree(w.as_slice(), &CodecParams::default()).unwrap();
        let expected = CodeTreeNode::join(
            CodeTreeNode::leaf(b'A' as Symbol, 5),
            CodeTreeNode::join(
                CodeTreeNode::join(
                    CodeTreeNode::leaf(b'C' as Symbol, 1),
                    CodeTreeNode::leaf(b'D' as Symbol, 1),
                ),
                CodeTreeNode::join(
                    CodeTreeNode::leaf(256, 1),
                    CodeTreeNode::leaf(b'B' as Symbol, 2),
                ),
            ),
        );
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_last_inserted_tree_shape() {
        let w = weights(&[(b'A', 5), (b'B', 2), (b'C', 1), (b'D', 1)]);
        let params = CodecParams::default().with_tie_break(TieBreak::LastInserted);
        let tree = build_tree(w.as_slice(), &params).unwrap();
        let expected = CodeTreeNode::join(
            CodeTreeNode::join(
                CodeTreeNode::leaf(b'B' as Symbol, 2),
                CodeTreeNode::join(
                    CodeTreeNode::leaf(b'C' as Symbol, 1),
                    CodeTreeNode::join(
                        CodeTreeNode::leaf(256, 1),
                        CodeTreeNode::leaf(b'D' as Symbol, 1),
                    ),
                ),
            ),
            CodeTreeNode::leaf(b'A' as Symbol, 5),
        );
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_weights_outside_alphabet_rejected() {
        let params = CodecParams {
            alphabet_size: 4,
            word_bits: 2,
            leaf_value_bits: 3,
            ..CodecParams::default()
        };
        assert!(build_tree(&[1u64, 0, 0, 2], &params).is_ok());
        assert!(build_tree(&[1u64, 0, 0, 2, 0], &params).is_ok());
        assert!(matches!(
            build_tree(&[1u64, 0, 0, 2, 5], &params),
            Err(HuffError::InvalidArgument(_))
        ));
    }
}
