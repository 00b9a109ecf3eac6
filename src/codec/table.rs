// src/codec/table.rs

use bitvec::prelude::*;

use crate::codec::tree::{CodeTree, CodeTreeNode, Symbol};

/// A code: the root-to-leaf path, `0` for left and `1` for right.
pub type Code = BitVec<u8, Msb0>;

/// Symbol-to-code mapping derived from a finished tree.
///
/// Symbols that are not leaves of the tree have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
    sentinel: Symbol,
}

impl CodeTable {
    /// Walks the tree once and records the path to every leaf.
    ///
    /// A tree that is a single leaf has no path at all; that leaf gets the
    /// one-bit code `0`.
    pub fn from_tree(tree: &CodeTree) -> Self {
        let mut table = CodeTable {
            codes: vec![None; tree.sentinel() as usize + 1],
            sentinel: tree.sentinel(),
        };
        match tree.root() {
            CodeTreeNode::Leaf { symbol, .. } => table.insert(*symbol, bitvec![u8, Msb0; 0]),
            root => {
                let mut path = Code::new();
                table.make_codings(root, &mut path);
            }
        }
        table
    }

    fn make_codings(&mut self, node: &CodeTreeNode, path: &mut Code) {
        match node {
            CodeTreeNode::Leaf { symbol, .. } => self.insert(*symbol, path.clone()),
            CodeTreeNode::Internal { left, right, .. } => {
                path.push(false);
                self.make_codings(left, path);
                path.pop();
                path.push(true);
                self.make_codings(right, path);
                path.pop();
            }
        }
    }

    fn insert(&mut self, symbol: Symbol, code: Code) {
        let idx = symbol as usize;
        if idx >= self.codes.len() {
            self.codes.resize(idx + 1, None);
        }
        self.codes[idx] = Some(code);
    }

    pub fn sentinel(&self) -> Symbol {
        self.sentinel
    }

    /// The code for `symbol`, if it occurs in the tree.
    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes
            .get(symbol as usize)
            .and_then(|c| c.as_deref())
    }

    pub fn code_len(&self, symbol: Symbol) -> Option<usize> {
        self.get(symbol).map(|c| c.len())
    }

    /// The code rendered as a string of `0` and `1`.
    pub fn code_string(&self, symbol: Symbol) -> Option<String> {
        self.get(symbol).map(|code| {
            code.iter()
                .by_vals()
                .map(|bit| if bit { '1' } else { '0' })
                .collect()
        })
    }

    /// Every `(symbol, code)` pair, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_deref().map(|code| (s as Symbol, code)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<_> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(*a))
        })
    }
}

/// Builds the code table for `tree`.
pub fn build_code_table(tree: &CodeTree) -> CodeTable {
    CodeTable::from_tree(tree)
}
