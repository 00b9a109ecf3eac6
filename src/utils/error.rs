// src/utils/error.rs

use thiserror::Error;

use crate::codec::tree::Symbol;

/// The primary error type for all operations in the Huffman codec library.
#[derive(Error, Debug)]
pub enum HuffError {
    /// An error occurred in the underlying byte reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header did not start with the expected magic number.
    #[error("Magic number incorrect: expected {expected:#x}, found {found:#x}")]
    Format { expected: u32, found: u32 },

    /// The header grammar was violated (leaf value out of range, runaway depth).
    #[error("Malformed coding tree in header: {0}")]
    MalformedTree(String),

    /// The bit source ran out before a field or the end-of-stream code completed.
    #[error("Trouble reading bits: input ended inside the {0}")]
    Truncated(&'static str),

    /// A symbol was passed to the encoder that the code table has no code for.
    #[error("Symbol {0} has no code in the table; was the tree built from this input?")]
    UnmappedSymbol(Symbol),

    /// Tree building was started without any fragments, not even the end-of-stream leaf.
    #[error("Cannot build a coding tree from an empty forest")]
    EmptyForest,

    /// Compression would grow the data and force was not requested.
    #[error("Compression uses {extra_bits} more bits! Use force compression instead")]
    SizeIncrease { extra_bits: u64 },

    /// An operation that needs counts and a tree ran before `initialize`.
    #[error("The model has not been initialized with any input")]
    Uninitialized,

    /// An invalid argument was provided to a function.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The session was cancelled by its host.
    #[error("Operation cancelled")]
    Cancelled,
}

/// A specialized `Result` type for codec operations.
pub type Result<T> = std::result::Result<T, HuffError>;
