//! A static Huffman compressor and decompressor.
//!
//! Byte values are mapped to prefix-free bit codes derived from their
//! frequencies; frequent bytes get short codes. A compressed stream is
//! self-describing: it starts with a magic number and the serialized coding
//! tree, followed by the codes of the input and an end-of-stream code.
//!
//! # Quick Start
//!
//! ```
//! use huff_codec::{compress_bytes, decompress_bytes, CompressOptions};
//!
//! let text = b"so much depends upon a red wheel barrow glazed with rain water".repeat(8);
//! let packed = compress_bytes(&text, CompressOptions::default())?;
//! assert!(packed.len() < text.len());
//! assert_eq!(decompress_bytes(&packed)?, text);
//! # Ok::<(), huff_codec::HuffError>(())
//! ```
//!
//! # Working with the codec directly
//!
//! ```
//! use huff_codec::bitstream::{BitReader, BitWriter};
//! use huff_codec::codec::{build_code_table, build_tree, decode_to_vec, encode, read_header, write_header, CodecParams};
//! use huff_codec::SymbolCounter;
//!
//! let mut counts = SymbolCounter::default();
//! counts.count_all(&b"abracadabra"[..])?;
//!
//! let tree = build_tree(&counts, &CodecParams::default())?;
//! let table = build_code_table(&tree);
//!
//! let mut sink = BitWriter::new(Vec::new());
//! write_header(&tree, &mut sink)?;
//! encode(&table, b"abracadabra".iter().map(|&b| b as u16), &mut sink)?;
//! let bytes = sink.into_inner()?;
//!
//! let mut source = BitReader::new(&bytes[..]);
//! let tree = read_header(&mut source)?;
//! let symbols = decode_to_vec(&tree, &mut source)?;
//! assert_eq!(symbols.len(), 11);
//! # Ok::<(), huff_codec::HuffError>(())
//! ```
//!
//! # Features
//!
//! - **Self-describing header**: preorder tree, 9-bit leaves, 32-bit magic number
//! - **Size policy**: refuses output larger than the input unless forced
//! - **Configurable format**: alphabet size, field widths and magic via `CodecParams`
//! - **Optional parallelism**: enable the `rayon` feature for `compress_batch`

// Core modules
pub mod bitstream;
pub mod codec;
pub mod counter;
pub mod model;
pub mod utils;

// Session API
pub use model::{
    compress_batch, compress_bytes, compress_file, decompress_bytes, decompress_file,
    CompressOptions, CompressionReport, HuffModel,
};

// Codec types
pub use codec::{CodeTable, CodeTree, CodeTreeNode, CodecParams, Symbol, TieBreak};
pub use counter::{SymbolCounter, WeightSource};

// Error types
pub use utils::error::{HuffError, Result};
pub use utils::progress::{CancelToken, ProgressCounter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_roundtrip() -> Result<()> {
        let data = b"the quick brown fox jumps over the lazy dog ".repeat(10);
        let packed = compress_bytes(&data, CompressOptions::default())?;
        assert_eq!(&packed[..4], &[0xFA, 0xCE, 0x82, 0x00]);
        assert_eq!(decompress_bytes(&packed)?, data);
        Ok(())
    }

    #[test]
    fn test_model_defaults() {
        let model = HuffModel::new();
        assert_eq!(model.params(), &CodecParams::default());
        assert!(model.tree().is_none());
        assert!(model.show_counts().is_empty());
    }
}
