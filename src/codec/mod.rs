//! Static Huffman codec.
//!
//! ## Pipeline
//!
//! Compression: weights → [`PriorityForest`] → [`TreeBuilder`] → header
//! ([`HuffHeader`]) plus [`CodeTable`] → [`HuffEncoder`].
//! Decompression: [`HuffHeader::read_header`] → [`decode`].
//!
//! ## Module Map
//!
//! - `constants` - Default format constants (alphabet, magic number, field widths)
//! - `params` - `CodecParams` and the forest tie-break policy
//! - `tree` - Coding tree nodes
//! - `forest` - Linear-scan priority forest
//! - `builder` - Tree construction
//! - `header` - Tree serialization
//! - `table` - Symbol-to-code table
//! - `encoder` / `decoder` - Payload bit streams

pub mod builder;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod forest;
pub mod header;
pub mod params;
pub mod table;
pub mod tree;

pub use builder::{build_tree, TreeBuilder};
pub use decoder::{decode, decode_to_vec, decode_with};
pub use encoder::{encode, HuffEncoder};
pub use forest::PriorityForest;
pub use header::{read_header, write_header, HuffHeader};
pub use params::{CodecParams, TieBreak};
pub use table::{build_code_table, Code, CodeTable};
pub use tree::{CodeTree, CodeTreeNode, Symbol};
