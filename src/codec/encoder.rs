// src/codec/encoder.rs

use log::trace;

use crate::bitstream::BitSink;
use crate::codec::table::CodeTable;
use crate::codec::tree::Symbol;
use crate::utils::error::{HuffError, Result};

/// Writes symbol codes to a bit sink and closes the stream with the sentinel.
pub struct HuffEncoder<'t> {
    table: &'t CodeTable,
    bits: u64,
    symbols: u64,
}

impl<'t> HuffEncoder<'t> {
    pub fn new(table: &'t CodeTable) -> Self {
        Self {
            table,
            bits: 0,
            symbols: 0,
        }
    }

    /// Writes the code for one symbol.
    ///
    /// A symbol with no code means the table was built from different input;
    /// nothing is written and `UnmappedSymbol` is returned.
    #[inline]
    pub fn encode_symbol<S: BitSink + ?Sized>(&mut self, symbol: Symbol, sink: &mut S) -> Result<()> {
        if symbol == self.table.sentinel() {
            return Err(HuffError::InvalidArgument(format!(
                "sentinel {} cannot appear in the input",
                symbol
            )));
        }
        let code = self
            .table
            .get(symbol)
            .ok_or(HuffError::UnmappedSymbol(symbol))?;
        sink.write_code(code)?;
        self.bits += code.len() as u64;
        self.symbols += 1;
        Ok(())
    }

    /// Bits written so far.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Symbols encoded so far, sentinel excluded.
    pub fn symbols(&self) -> u64 {
        self.symbols
    }

    /// Writes the sentinel code and returns the total payload bits.
    pub fn finish<S: BitSink + ?Sized>(mut self, sink: &mut S) -> Result<u64> {
        let sentinel = self.table.sentinel();
        let code = self
            .table
            .get(sentinel)
            .ok_or(HuffError::UnmappedSymbol(sentinel))?;
        sink.write_code(code)?;
        self.bits += code.len() as u64;
        trace!("encoded {} symbols in {} bits", self.symbols, self.bits);
        Ok(self.bits)
    }
}

/// Encodes `symbols` followed by the sentinel. Returns the bits written,
/// header not included.
pub fn encode<I, S>(table: &CodeTable, symbols: I, sink: &mut S) -> Result<u64>
where
    I: IntoIterator<Item = Symbol>,
    S: BitSink + ?Sized,
{
    let mut encoder = HuffEncoder::new(table);
    for symbol in symbols {
        encoder.encode_symbol(symbol, sink)?;
    }
    encoder.finish(sink)
}
