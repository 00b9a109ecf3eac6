// src/codec/header.rs

//! Serialized form of the coding tree.
//!
//! Layout, bit by bit:
//!
//! ```text
//! magic number            magic_bits (32)
//! preorder tree           internal node: 0, left subtree, right subtree
//!                         leaf:          1, symbol in leaf_value_bits (9)
//! ```
//!
//! The grammar terminates on its own, so no node count is stored.

use log::{debug, trace};

use crate::bitstream::{BitSink, BitSource};
use crate::codec::params::CodecParams;
use crate::codec::tree::{CodeTree, CodeTreeNode, Symbol};
use crate::utils::error::{HuffError, Result};

/// Writes and reads the header that prefixes every compressed stream.
#[derive(Debug, Clone, Copy)]
pub struct HuffHeader {
    params: CodecParams,
}

impl Default for HuffHeader {
    fn default() -> Self {
        Self {
            params: CodecParams::default(),
        }
    }
}

impl HuffHeader {
    /// Fails with `InvalidArgument` if `params` describe a layout that cannot
    /// carry every leaf value, e.g. a leaf field too narrow for the sentinel.
    pub fn new(params: CodecParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Header size in bits for `tree`, magic number included.
    pub fn header_size(&self, tree: &CodeTree) -> u64 {
        let root = tree.root();
        let leaves = root.leaf_count() as u64;
        let internal = root.internal_count() as u64;
        self.params.magic_bits as u64
            + internal
            + leaves * (1 + self.params.leaf_value_bits as u64)
    }

    /// Writes the magic number and the preorder tree. Returns the bits written.
    pub fn write_header<S: BitSink + ?Sized>(&self, tree: &CodeTree, sink: &mut S) -> Result<u64> {
        let start = sink.bits_written();
        sink.write_bits(self.params.magic_bits, self.params.magic_number)?;
        self.write_node(tree.root(), sink)?;
        let written = sink.bits_written() - start;
        debug!("wrote {} header bits", written);
        Ok(written)
    }

    fn write_node<S: BitSink + ?Sized>(&self, node: &CodeTreeNode, sink: &mut S) -> Result<()> {
        match node {
            CodeTreeNode::Leaf { symbol, .. } => {
                if *symbol > self.params.sentinel() {
                    return Err(HuffError::InvalidArgument(format!(
                        "leaf symbol {} is beyond the sentinel {}",
                        symbol,
                        self.params.sentinel()
                    )));
                }
                sink.write_bit(true)?;
                sink.write_bits(self.params.leaf_value_bits, *symbol as u32)
            }
            CodeTreeNode::Internal { left, right, .. } => {
                sink.write_bit(false)?;
                self.write_node(left, sink)?;
                self.write_node(right, sink)
            }
        }
    }

    /// Checks the magic number, then rebuilds the tree. Weights come back as 0.
    pub fn read_header<S: BitSource + ?Sized>(&self, source: &mut S) -> Result<CodeTree> {
        let found = source
            .read_bits(self.params.magic_bits)?
            .ok_or(HuffError::Truncated("magic number"))?;
        if found != self.params.magic_number {
            return Err(HuffError::Format {
                expected: self.params.magic_number,
                found,
            });
        }
        let root = self.read_node(source, 0)?;
        trace!("read header tree with {} leaves", root.leaf_count());
        Ok(CodeTree::new(root, self.params.sentinel()))
    }

    fn read_node<S: BitSource + ?Sized>(&self, source: &mut S, depth: usize) -> Result<CodeTreeNode> {
        // A full tree over alphabet_size + 1 leaves is at most alphabet_size deep.
        if depth > self.params.alphabet_size as usize {
            return Err(HuffError::MalformedTree(format!(
                "tree deeper than {} levels",
                self.params.alphabet_size
            )));
        }
        let is_leaf = source
            .read_bit()?
            .ok_or(HuffError::Truncated("header tree"))?;
        if is_leaf {
            let value = source
                .read_bits(self.params.leaf_value_bits)?
                .ok_or(HuffError::Truncated("header leaf value"))?;
            if value > self.params.sentinel() as u32 {
                return Err(HuffError::MalformedTree(format!(
                    "leaf value {} is beyond the sentinel {}",
                    value,
                    self.params.sentinel()
                )));
            }
            Ok(CodeTreeNode::leaf(value as Symbol, 0))
        } else {
            let left = self.read_node(source, depth + 1)?;
            let right = self.read_node(source, depth + 1)?;
            Ok(CodeTreeNode::Internal {
                weight: 0,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
    }
}

/// Writes `tree` with the default header layout.
pub fn write_header<S: BitSink + ?Sized>(tree: &CodeTree, sink: &mut S) -> Result<u64> {
    HuffHeader::default().write_header(tree, sink)
}

/// Reads a tree written with the default header layout.
pub fn read_header<S: BitSource + ?Sized>(source: &mut S) -> Result<CodeTree> {
    HuffHeader::default().read_header(source)
}
