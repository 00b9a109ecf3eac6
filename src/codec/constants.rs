//! Default layout of the compressed format.

/// Number of distinct input symbols (one per byte value).
pub const ALPHABET_SIZE: u16 = 256;

/// End-of-stream sentinel, one past the last real symbol.
pub const PSEUDO_EOF: u16 = ALPHABET_SIZE;

/// Width of one uncompressed symbol.
pub const BITS_PER_WORD: u8 = 8;

/// Width of the symbol field stored in each header leaf.
pub const LEAF_VALUE_BITS: u8 = 9;

/// Marker at the start of every compressed stream.
pub const MAGIC_NUMBER: u32 = 0xFACE_8200;

/// Width of the magic number field.
pub const MAGIC_BITS: u8 = 32;
