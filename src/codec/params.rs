//! Codec configuration.

use crate::bitstream::MAX_FIELD_BITS;
use crate::codec::constants::*;
use crate::codec::tree::Symbol;
use crate::utils::error::{HuffError, Result};

/// How the priority forest picks among fragments of equal weight.
///
/// The choice changes the shape of the tree (and so which of several
/// equal-frequency symbols get the longer codes) but never correctness.
/// Both sides of a stream share the tree through the header, so the policy
/// does not need to match between writer and reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The earliest inserted of the tied fragments is extracted first.
    #[default]
    FirstInserted,
    /// The most recently inserted of the tied fragments is extracted first.
    LastInserted,
}

/// Configuration for a codec session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecParams {
    /// Number of real symbols; the sentinel takes the value `alphabet_size`.
    pub alphabet_size: u16,
    /// Width of one uncompressed symbol on the byte stream (default: 8)
    pub word_bits: u8,
    /// Width of the symbol field in header leaves (default: 9)
    pub leaf_value_bits: u8,
    /// Marker written before the tree (default: 0xFACE8200)
    pub magic_number: u32,
    /// Width of the marker field (default: 32)
    pub magic_bits: u8,
    /// Equal-weight extraction order used while building the tree
    pub tie_break: TieBreak,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            alphabet_size: ALPHABET_SIZE,
            word_bits: BITS_PER_WORD,
            leaf_value_bits: LEAF_VALUE_BITS,
            magic_number: MAGIC_NUMBER,
            magic_bits: MAGIC_BITS,
            tie_break: TieBreak::default(),
        }
    }
}

impl CodecParams {
    /// The end-of-stream symbol value.
    #[inline]
    pub fn sentinel(&self) -> Symbol {
        self.alphabet_size
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Checks that every field width can carry the values it has to hold.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet_size == 0 {
            return Err(HuffError::InvalidArgument(
                "alphabet must contain at least one symbol".to_string(),
            ));
        }
        if self.word_bits == 0 || self.word_bits > 16 {
            return Err(HuffError::InvalidArgument(format!(
                "word width {} is outside 1..=16",
                self.word_bits
            )));
        }
        if u32::from(self.alphabet_size) > 1u32 << self.word_bits {
            return Err(HuffError::InvalidArgument(format!(
                "{} symbols do not fit in {}-bit words",
                self.alphabet_size, self.word_bits
            )));
        }
        if self.leaf_value_bits == 0 || self.leaf_value_bits > 16 {
            return Err(HuffError::InvalidArgument(format!(
                "leaf field width {} is outside 1..=16",
                self.leaf_value_bits
            )));
        }
        if u32::from(self.sentinel()) >= 1u32 << self.leaf_value_bits {
            return Err(HuffError::InvalidArgument(format!(
                "a {}-bit leaf field cannot hold the sentinel value {}",
                self.leaf_value_bits,
                self.sentinel()
            )));
        }
        if self.magic_bits == 0 || self.magic_bits > MAX_FIELD_BITS {
            return Err(HuffError::InvalidArgument(format!(
                "magic number width {} is outside 1..={}",
                self.magic_bits, MAX_FIELD_BITS
            )));
        }
        if self.magic_bits < 32 && self.magic_number >> self.magic_bits != 0 {
            return Err(HuffError::InvalidArgument(format!(
                "magic number {:#x} does not fit in {} bits",
                self.magic_number, self.magic_bits
            )));
        }
        Ok(())
    }
}
