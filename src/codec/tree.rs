// src/codec/tree.rs

//! The coding tree.
//!
//! A full binary tree: every internal node owns exactly two children through
//! `Box`, so a fragment pulled out of the forest and joined under a new parent
//! always has one owner.

/// A symbol value. Real symbols and the end-of-stream sentinel share this space.
pub type Symbol = u16;

/// Node in a Huffman coding tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeTreeNode {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<CodeTreeNode>,
        right: Box<CodeTreeNode>,
    },
}

impl CodeTreeNode {
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        CodeTreeNode::Leaf { symbol, weight }
    }

    /// Joins two fragments under a new internal node weighing their sum.
    pub fn join(left: CodeTreeNode, right: CodeTreeNode) -> Self {
        CodeTreeNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            CodeTreeNode::Leaf { weight, .. } => *weight,
            CodeTreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, CodeTreeNode::Leaf { .. })
    }

    /// The symbol at a leaf; internal nodes carry none.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            CodeTreeNode::Leaf { symbol, .. } => Some(*symbol),
            CodeTreeNode::Internal { .. } => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { .. } => 1,
            CodeTreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { .. } => 0,
            CodeTreeNode::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { .. } => 0,
            CodeTreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Whether every internal node weighs exactly the sum of its children.
    pub fn weights_consistent(&self) -> bool {
        match self {
            CodeTreeNode::Leaf { .. } => true,
            CodeTreeNode::Internal {
                weight,
                left,
                right,
            } => {
                *weight == left.weight() + right.weight()
                    && left.weights_consistent()
                    && right.weights_consistent()
            }
        }
    }

    /// Compares structure and leaf symbols, ignoring weights.
    ///
    /// A tree read back from a header has no weights, so this is the
    /// equality that matters after a round trip.
    pub fn same_shape(&self, other: &CodeTreeNode) -> bool {
        match (self, other) {
            (CodeTreeNode::Leaf { symbol: a, .. }, CodeTreeNode::Leaf { symbol: b, .. }) => a == b,
            (
                CodeTreeNode::Internal {
                    left: l1,
                    right: r1,
                    ..
                },
                CodeTreeNode::Internal {
                    left: l2,
                    right: r2,
                    ..
                },
            ) => l1.same_shape(l2) && r1.same_shape(r2),
            _ => false,
        }
    }

    /// Leaf symbols in left-to-right order.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                CodeTreeNode::Leaf { symbol, .. } => out.push(*symbol),
                CodeTreeNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }
}

/// A finished coding tree together with the sentinel value it terminates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    root: CodeTreeNode,
    sentinel: Symbol,
}

impl CodeTree {
    pub fn new(root: CodeTreeNode, sentinel: Symbol) -> Self {
        Self { root, sentinel }
    }

    pub fn root(&self) -> &CodeTreeNode {
        &self.root
    }

    pub fn sentinel(&self) -> Symbol {
        self.sentinel
    }

    pub fn into_root(self) -> CodeTreeNode {
        self.root
    }

    /// Sum of all leaf weights.
    pub fn total_weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn same_shape(&self, other: &CodeTree) -> bool {
        self.sentinel == other.sentinel && self.root.same_shape(&other.root)
    }
}
