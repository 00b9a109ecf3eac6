//! Session orchestration: counting, the size policy, and file helpers.

pub mod io;
pub mod session;

pub use io::{
    compress_batch, compress_bytes, compress_bytes_with, compress_file, decompress_bytes,
    decompress_bytes_with, decompress_file,
};
pub use session::{CompressOptions, CompressionReport, HuffModel};
