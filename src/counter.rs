//! Symbol frequency tally, the weight source the tree is built from.

use std::io::Read;

use crate::bitstream::{BitReader, BitSource};
use crate::codec::constants::{ALPHABET_SIZE, BITS_PER_WORD};
use crate::codec::tree::Symbol;
use crate::utils::error::{HuffError, Result};

/// Supplies an occurrence count for each symbol of the alphabet.
pub trait WeightSource {
    /// Number of symbols this source has counts for.
    fn alphabet_size(&self) -> usize;

    /// Occurrences of `symbol`; zero for anything outside the alphabet.
    fn weight(&self, symbol: Symbol) -> u64;
}

impl WeightSource for [u64] {
    fn alphabet_size(&self) -> usize {
        self.len()
    }

    fn weight(&self, symbol: Symbol) -> u64 {
        self.get(symbol as usize).copied().unwrap_or(0)
    }
}

impl<const N: usize> WeightSource for [u64; N] {
    fn alphabet_size(&self) -> usize {
        N
    }

    fn weight(&self, symbol: Symbol) -> u64 {
        self.as_slice().weight(symbol)
    }
}

/// Per-symbol occurrence counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCounter {
    counts: Vec<u64>,
}

impl Default for SymbolCounter {
    fn default() -> Self {
        Self::new(ALPHABET_SIZE)
    }
}

impl SymbolCounter {
    pub fn new(alphabet_size: u16) -> Self {
        Self {
            counts: vec![0; alphabet_size as usize],
        }
    }

    /// Count recorded for `symbol`.
    pub fn count(&self, symbol: Symbol) -> Result<u64> {
        self.counts
            .get(symbol as usize)
            .copied()
            .ok_or_else(|| self.out_of_range(symbol))
    }

    /// Overwrites the count for `symbol`.
    pub fn set(&mut self, symbol: Symbol, value: u64) -> Result<()> {
        let err = self.out_of_range(symbol);
        let slot = self.counts.get_mut(symbol as usize).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    /// Records one occurrence of `symbol`.
    #[inline]
    pub fn add(&mut self, symbol: Symbol) -> Result<()> {
        let err = self.out_of_range(symbol);
        let slot = self.counts.get_mut(symbol as usize).ok_or(err)?;
        *slot += 1;
        Ok(())
    }

    /// Clears every count to zero.
    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    /// Clears the tally, then counts every byte of `reader`.
    ///
    /// Returns the number of symbols read.
    pub fn count_all<R: Read>(&mut self, reader: R) -> Result<u64> {
        self.count_words(reader, BITS_PER_WORD)
    }

    /// Like [`count_all`](Self::count_all) for symbols `word_bits` wide.
    /// A trailing partial word is ignored.
    pub fn count_words<R: Read>(&mut self, reader: R, word_bits: u8) -> Result<u64> {
        if word_bits == 0 || word_bits > 16 {
            return Err(HuffError::InvalidArgument(format!(
                "word width {} is outside 1..=16",
                word_bits
            )));
        }
        self.clear();
        let mut source = BitReader::new(reader);
        let mut total = 0u64;
        while let Some(word) = source.read_bits(word_bits)? {
            self.add(word as Symbol)?;
            total += 1;
        }
        Ok(total)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of symbols seen at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(symbol, count)` for every symbol seen at least once, ascending.
    pub fn nonzero(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(s, c)| (s as Symbol, *c))
    }

    fn out_of_range(&self, symbol: Symbol) -> HuffError {
        HuffError::InvalidArgument(format!(
            "symbol {} is outside the {}-symbol alphabet",
            symbol,
            self.counts.len()
        ))
    }
}

impl WeightSource for SymbolCounter {
    fn alphabet_size(&self) -> usize {
        self.counts.len()
    }

    fn weight(&self, symbol: Symbol) -> u64 {
        self.counts.as_slice().weight(symbol)
    }
}
