// src/codec/decoder.rs

//! Bit-at-a-time tree walk.
//!
//! The walk starts at the root, moves left on `0` and right on `1`, and on
//! reaching a leaf either stops (sentinel) or emits the symbol and returns to
//! the root. Bits after the sentinel are never read.

use crate::bitstream::{BitSink, BitSource};
use crate::codec::tree::{CodeTree, CodeTreeNode, Symbol};
use crate::utils::error::{HuffError, Result};

/// Decodes symbols from `source`, handing each to `emit`, until the sentinel.
///
/// Returns the number of symbols emitted. Running out of bits first is a
/// `Truncated` error.
pub fn decode_with<S, F>(tree: &CodeTree, source: &mut S, mut emit: F) -> Result<u64>
where
    S: BitSource + ?Sized,
    F: FnMut(Symbol) -> Result<()>,
{
    let root = tree.root();
    let sentinel = tree.sentinel();
    let mut walk = root;
    let mut count = 0u64;

    loop {
        let bit = source
            .read_bit()?
            .ok_or(HuffError::Truncated("encoded data before the end-of-stream code"))?;

        walk = match walk {
            CodeTreeNode::Internal { left, right, .. } => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            // Single-leaf tree: every code is one bit long.
            CodeTreeNode::Leaf { .. } => walk,
        };

        if let CodeTreeNode::Leaf { symbol, .. } = walk {
            if *symbol == sentinel {
                return Ok(count);
            }
            emit(*symbol)?;
            count += 1;
            walk = root;
        }
    }
}

/// Decodes into a bit sink, writing each symbol as a `word_bits` field.
pub fn decode<S, K>(tree: &CodeTree, source: &mut S, sink: &mut K, word_bits: u8) -> Result<u64>
where
    S: BitSource + ?Sized,
    K: BitSink + ?Sized,
{
    decode_with(tree, source, |symbol| sink.write_bits(word_bits, symbol as u32))
}

/// Decodes every symbol into a vector.
pub fn decode_to_vec<S: BitSource + ?Sized>(tree: &CodeTree, source: &mut S) -> Result<Vec<Symbol>> {
    let mut out = Vec::new();
    decode_with(tree, source, |symbol| {
        out.push(symbol);
        Ok(())
    })?;
    Ok(out)
}
