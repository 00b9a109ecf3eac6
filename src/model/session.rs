// src/model/session.rs

//! One compression or decompression session.

use log::{debug, warn};
use std::io::{Read, Write};

use crate::bitstream::{BitReader, BitSink, BitSource, BitWriter};
use crate::codec::{
    decode_with, CodeTable, CodeTree, CodecParams, HuffEncoder, HuffHeader, Symbol, TreeBuilder,
};
use crate::counter::SymbolCounter;
use crate::utils::error::{HuffError, Result};
use crate::utils::progress::{CancelToken, ProgressCounter};

/// Options for [`HuffModel::write`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressOptions {
    /// Keep the compressed output even when it is larger than the input.
    pub force: bool,
}

impl CompressOptions {
    pub fn forced() -> Self {
        Self { force: true }
    }
}

/// Size accounting for one compressed stream, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    pub original_bits: u64,
    pub header_bits: u64,
    pub payload_bits: u64,
}

impl CompressionReport {
    /// Header plus payload, before byte padding.
    pub fn total_bits(&self) -> u64 {
        self.header_bits + self.payload_bits
    }

    /// Bits saved; negative when compression grew the data.
    pub fn saved_bits(&self) -> i64 {
        self.original_bits as i64 - self.total_bits() as i64
    }
}

/// Holds the counts, tree and code table of a session.
///
/// `initialize` tallies an input and builds the tree; `write` then compresses
/// that same input (or one with the same symbols). `uncompress` needs no
/// initialization: the tree comes from the stream's header.
#[derive(Debug, Clone)]
pub struct HuffModel {
    params: CodecParams,
    header: HuffHeader,
    counter: SymbolCounter,
    tree: Option<CodeTree>,
    table: Option<CodeTable>,
    initial_bits: u64,
    cancel: CancelToken,
    progress: ProgressCounter,
}

impl Default for HuffModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HuffModel {
    /// Creates a model using the default format.
    pub fn new() -> Self {
        let params = CodecParams::default();
        Self {
            params,
            header: HuffHeader::default(),
            counter: SymbolCounter::new(params.alphabet_size),
            tree: None,
            table: None,
            initial_bits: 0,
            cancel: CancelToken::new(),
            progress: ProgressCounter::new(),
        }
    }

    /// Creates a model for a custom format.
    pub fn with_params(params: CodecParams) -> Result<Self> {
        Ok(Self {
            params,
            header: HuffHeader::new(params)?,
            counter: SymbolCounter::new(params.alphabet_size),
            ..Self::new()
        })
    }

    /// Lets a host abort `write` / `uncompress` between symbols.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Counts symbols as `write` / `uncompress` process them.
    pub fn with_progress(mut self, progress: ProgressCounter) -> Self {
        self.progress = progress;
        self
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    pub fn counter(&self) -> &SymbolCounter {
        &self.counter
    }

    pub fn tree(&self) -> Option<&CodeTree> {
        self.tree.as_ref()
    }

    pub fn table(&self) -> Option<&CodeTable> {
        self.table.as_ref()
    }

    /// Size in bits of the input last passed to `initialize`.
    pub fn original_size_bits(&self) -> u64 {
        self.initial_bits
    }

    /// Tallies `reader` and builds the tree and code table from the counts.
    ///
    /// Returns the input size in bits.
    pub fn initialize<R: Read>(&mut self, reader: R) -> Result<u64> {
        let symbols = self.counter.count_words(reader, self.params.word_bits)?;
        let tree = TreeBuilder::from_weights(&self.counter, &self.params)?.build()?;
        self.table = Some(CodeTable::from_tree(&tree));
        self.tree = Some(tree);
        self.initial_bits = symbols * self.params.word_bits as u64;
        debug!(
            "initialized model: {} symbols, {} distinct",
            symbols,
            self.counter.distinct()
        );
        Ok(self.initial_bits)
    }

    fn coded(&self) -> Result<(&CodeTree, &CodeTable)> {
        match (&self.tree, &self.table) {
            (Some(tree), Some(table)) => Ok((tree, table)),
            _ => Err(HuffError::Uninitialized),
        }
    }

    /// Predicted size of the compressed stream in bits, computed from the
    /// counts without writing anything.
    pub fn compressed_size_bits(&self) -> Result<u64> {
        let (tree, table) = self.coded()?;
        let mut bits = self.header.header_size(tree);
        for (symbol, count) in self.counter.nonzero() {
            let len = table
                .code_len(symbol)
                .ok_or(HuffError::UnmappedSymbol(symbol))?;
            bits += count * len as u64;
        }
        let sentinel = self.params.sentinel();
        bits += table
            .code_len(sentinel)
            .ok_or(HuffError::UnmappedSymbol(sentinel))? as u64;
        Ok(bits)
    }

    /// Fails with `SizeIncrease` if compressing the initialized input would
    /// grow it and `force` is not set.
    pub fn check_size_policy(&self, options: CompressOptions) -> Result<()> {
        let predicted = self.compressed_size_bits()?;
        if !options.force && predicted > self.initial_bits {
            let extra_bits = predicted - self.initial_bits;
            warn!("compression would add {} bits; not forced", extra_bits);
            return Err(HuffError::SizeIncrease { extra_bits });
        }
        Ok(())
    }

    /// Writes the header, the code of every symbol of `reader`, and the
    /// end-of-stream code.
    ///
    /// The size policy is checked against the initialized counts before any
    /// output is produced. If `reader` differs from the initialized input the
    /// result is checked again afterwards; a failure then leaves invalid
    /// output behind that the caller must discard.
    pub fn write<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        options: CompressOptions,
    ) -> Result<CompressionReport> {
        let (tree, table) = self.coded()?;
        self.check_size_policy(options)?;

        let word_bits = self.params.word_bits;
        let mut source = BitReader::new(reader);
        let mut sink = BitWriter::new(writer);
        let header_bits = self.header.write_header(tree, &mut sink)?;

        let mut encoder = HuffEncoder::new(table);
        while let Some(word) = source.read_bits(word_bits)? {
            self.cancel.check()?;
            encoder.encode_symbol(word as Symbol, &mut sink)?;
            self.progress.advance(1);
        }
        let symbols = encoder.symbols();
        let payload_bits = encoder.finish(&mut sink)?;
        sink.close()?;

        let report = CompressionReport {
            original_bits: symbols * word_bits as u64,
            header_bits,
            payload_bits,
        };
        debug!(
            "compressed {} bits into {} ({} header, {} payload)",
            report.original_bits,
            report.total_bits(),
            report.header_bits,
            report.payload_bits
        );
        if !options.force && report.total_bits() > report.original_bits {
            return Err(HuffError::SizeIncrease {
                extra_bits: report.total_bits() - report.original_bits,
            });
        }
        Ok(report)
    }

    /// Reads a header and decodes the rest of `reader` into `writer`.
    ///
    /// Returns the number of symbols written. The tree read from the header
    /// replaces this model's tree and table; the counts are cleared.
    pub fn uncompress<R: Read, W: Write>(&mut self, reader: R, writer: W) -> Result<u64> {
        let mut source = BitReader::new(reader);
        let tree = self.header.read_header(&mut source)?;

        let word_bits = self.params.word_bits;
        let cancel = self.cancel.clone();
        let progress = self.progress.clone();
        let mut sink = BitWriter::new(writer);
        let symbols = decode_with(&tree, &mut source, |symbol| {
            cancel.check()?;
            sink.write_bits(word_bits, symbol as u32)?;
            progress.advance(1);
            Ok(())
        })?;
        sink.close()?;
        debug!(
            "uncompressed {} symbols from {} bits",
            symbols,
            source.bits_read()
        );

        self.table = Some(CodeTable::from_tree(&tree));
        self.tree = Some(tree);
        self.counter.clear();
        self.initial_bits = 0;
        Ok(symbols)
    }

    /// `"<symbol> <count>"` for every symbol that occurs.
    pub fn show_counts(&self) -> Vec<String> {
        self.counter
            .nonzero()
            .map(|(symbol, count)| format!("{} {}", symbol, count))
            .collect()
    }

    /// `"<symbol> <code>"` for every real symbol with a code.
    pub fn show_codings(&self) -> Vec<String> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        let sentinel = self.params.sentinel();
        table
            .iter()
            .filter(|(symbol, _)| *symbol != sentinel)
            .map(|(symbol, code)| {
                let bits: String = code
                    .iter()
                    .by_vals()
                    .map(|b| if b { '1' } else { '0' })
                    .collect();
                format!("{} {}", symbol, bits)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &[u8] = b"she sells sea shells by the sea shore, she sells sea shells by the sea shore";

    #[test]
    fn test_roundtrip() {
        let mut model = HuffModel::new();
        let bits = model.initialize(TEXT).unwrap();
        assert_eq!(bits, TEXT.len() as u64 * 8);

        let mut compressed = Vec::new();
        let report = model
            .write(TEXT, &mut compressed, CompressOptions::default())
            .unwrap();
        assert_eq!(report.original_bits, bits);
        assert_eq!(report.total_bits(), model.compressed_size_bits().unwrap());
        assert_eq!(compressed.len() as u64, report.total_bits().div_ceil(8));
        assert!(report.saved_bits() > 0);

        let mut out = Vec::new();
        let symbols = HuffModel::new().uncompress(&compressed[..], &mut out).unwrap();
        assert_eq!(symbols, TEXT.len() as u64);
        assert_eq!(out, TEXT);
    }

    #[test]
    fn test_write_before_initialize() {
        let model = HuffModel::new();
        let result = model.write(TEXT, Vec::new(), CompressOptions::default());
        assert!(matches!(result, Err(HuffError::Uninitialized)));
        assert!(model.show_codings().is_empty());
    }

    #[test]
    fn test_size_policy_refuses_before_writing() {
        let input = b"abcdefgh";
        let mut model = HuffModel::new();
        model.initialize(&input[..]).unwrap();

        let mut out = Vec::new();
        let err = model
            .write(&input[..], &mut out, CompressOptions::default())
            .unwrap_err();
        match err {
            HuffError::SizeIncrease { extra_bits } => {
                let predicted = model.compressed_size_bits().unwrap();
                assert_eq!(extra_bits, predicted - 64);
            }
            other => panic!("expected size error, got {:?}", other),
        }
        assert!(out.is_empty());

        let report = model
            .write(&input[..], &mut out, CompressOptions::forced())
            .unwrap();
        assert!(report.saved_bits() < 0);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_longer_input_than_initialized_is_refused() {
        // Doubling counts a:1 b:2 .. j:512 chain the tree, so `a` gets a
        // 10-bit code. The tally compresses; a run of `a` does not.
        let sample: Vec<u8> = (0..10u8)
            .flat_map(|i| std::iter::repeat(b'a' + i).take(1 << i))
            .collect();
        let mut model = HuffModel::new();
        model.initialize(&sample[..]).unwrap();
        model.check_size_policy(CompressOptions::default()).unwrap();
        assert_eq!(model.table().unwrap().code_len(b'a' as Symbol), Some(10));

        let input = vec![b'a'; 200];
        let result = model.write(&input[..], Vec::new(), CompressOptions::default());
        assert!(matches!(result, Err(HuffError::SizeIncrease { .. })));

        let report = model
            .write(&input[..], Vec::new(), CompressOptions::forced())
            .unwrap();
        assert_eq!(report.original_bits, 200 * 8);
        assert!(report.saved_bits() < 0);
    }

    #[test]
    fn test_mismatched_input() {
        let mut model = HuffModel::new();
        model.initialize(&b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab"[..]).unwrap();
        let result = model.write(&b"abc"[..], Vec::new(), CompressOptions::forced());
        assert!(matches!(result, Err(HuffError::UnmappedSymbol(99))));
    }

    #[test]
    fn test_listings() {
        let mut model = HuffModel::new();
        model.initialize(&b"aab"[..]).unwrap();
        assert_eq!(model.counter().total(), 3);
        assert_eq!(model.table().unwrap().code_len(b'a' as Symbol), Some(1));
        assert_eq!(model.show_counts(), vec!["97 2", "98 1"]);
        // a:2 b:1 EOF:1 -> b and EOF merge first, then a ties with them and goes left.
        assert_eq!(model.show_codings(), vec!["97 0", "98 10"]);
    }

    #[test]
    fn test_cancel_stops_write() {
        let cancel = CancelToken::new();
        let mut model = HuffModel::new().with_cancel_token(cancel.clone());
        model.initialize(TEXT).unwrap();
        cancel.cancel();
        let result = model.write(TEXT, Vec::new(), CompressOptions::forced());
        assert!(matches!(result, Err(HuffError::Cancelled)));
    }

    #[test]
    fn test_progress_counts_symbols() {
        let progress = ProgressCounter::new();
        let mut model = HuffModel::new().with_progress(progress.clone());
        model.initialize(TEXT).unwrap();
        let mut compressed = Vec::new();
        model
            .write(TEXT, &mut compressed, CompressOptions::default())
            .unwrap();
        assert_eq!(progress.processed(), TEXT.len() as u64);

        progress.reset();
        model.uncompress(&compressed[..], Vec::new()).unwrap();
        assert_eq!(progress.processed(), TEXT.len() as u64);
    }

    #[test]
    fn test_uncompress_replaces_tree() {
        let mut writer_model = HuffModel::new();
        writer_model.initialize(TEXT).unwrap();
        let mut compressed = Vec::new();
        writer_model
            .write(TEXT, &mut compressed, CompressOptions::default())
            .unwrap();

        let mut reader_model = HuffModel::new();
        reader_model.uncompress(&compressed[..], Vec::new()).unwrap();
        assert!(reader_model
            .tree()
            .unwrap()
            .same_shape(writer_model.tree().unwrap()));
        assert_eq!(reader_model.show_codings(), writer_model.show_codings());
        assert!(reader_model.show_counts().is_empty());
    }

    #[test]
    fn test_nibble_alphabet() {
        let params = CodecParams {
            alphabet_size: 16,
            word_bits: 4,
            leaf_value_bits: 5,
            ..CodecParams::default()
        };
        let input = [0x11u8, 0x11, 0x12, 0x11, 0xF1, 0x11];
        let mut model = HuffModel::with_params(params).unwrap();
        assert_eq!(model.initialize(&input[..]).unwrap(), 48);
        let mut compressed = Vec::new();
        model
            .write(&input[..], &mut compressed, CompressOptions::forced())
            .unwrap();

        let mut out = Vec::new();
        HuffModel::with_params(params)
            .unwrap()
            .uncompress(&compressed[..], &mut out)
            .unwrap();
        assert_eq!(out, input);
    }
}
