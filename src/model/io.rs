//! Whole-buffer and whole-file helpers built on [`HuffModel`].

use log::warn;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use crate::codec::CodecParams;
use crate::model::session::{CompressOptions, CompressionReport, HuffModel};
use crate::utils::error::{HuffError, Result};

/// Compresses a buffer with the default format.
pub fn compress_bytes(data: &[u8], options: CompressOptions) -> Result<Vec<u8>> {
    compress_bytes_with(data, CodecParams::default(), options)
}

pub fn compress_bytes_with(
    data: &[u8],
    params: CodecParams,
    options: CompressOptions,
) -> Result<Vec<u8>> {
    let mut model = HuffModel::with_params(params)?;
    model.initialize(data)?;
    let mut out = Vec::with_capacity(data.len() / 2 + 8);
    model.write(data, &mut out, options)?;
    Ok(out)
}

/// Decompresses a buffer written with the default format.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decompress_bytes_with(data, CodecParams::default())
}

pub fn decompress_bytes_with(data: &[u8], params: CodecParams) -> Result<Vec<u8>> {
    let mut model = HuffModel::with_params(params)?;
    let mut out = Vec::with_capacity(data.len() * 2);
    model.uncompress(data, &mut out)?;
    Ok(out)
}

/// Compresses `src` into `dst`.
///
/// The size policy is checked before `dst` is created. If writing fails
/// part way, `dst` is removed.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    options: CompressOptions,
) -> Result<CompressionReport> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    let mut model = HuffModel::new();
    model.initialize(BufReader::new(File::open(src)?))?;
    model.check_size_policy(options)?;

    let result = File::create(dst).map_err(HuffError::from).and_then(|out| {
        model.write(
            BufReader::new(File::open(src)?),
            BufWriter::new(out),
            options,
        )
    });
    if let Err(e) = &result {
        discard_partial(dst, e);
    }
    result
}

/// Decompresses `src` into `dst`, removing `dst` if decoding fails.
///
/// Returns the number of bytes written.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<u64> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    let input = BufReader::new(File::open(src)?);
    let result = File::create(dst)
        .map_err(HuffError::from)
        .and_then(|out| HuffModel::new().uncompress(input, BufWriter::new(out)));
    if let Err(e) = &result {
        discard_partial(dst, e);
    }
    result
}

fn discard_partial(dst: &Path, cause: &HuffError) {
    match fs::remove_file(dst) {
        Ok(()) => warn!("discarded partial output {}: {}", dst.display(), cause),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} failed before any output: {}", dst.display(), cause)
        }
        Err(e) => warn!(
            "could not remove partial output {} ({}) after: {}",
            dst.display(),
            e,
            cause
        ),
    }
}

/// Compresses independent buffers, one session each.
///
/// With the `rayon` feature the sessions run in parallel.
pub fn compress_batch<T>(inputs: &[T], options: CompressOptions) -> Vec<Result<Vec<u8>>>
where
    T: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        inputs
            .par_iter()
            .map(|input| compress_bytes(input.as_ref(), options))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        inputs
            .iter()
            .map(|input| compress_bytes(input.as_ref(), options))
            .collect()
    }
}
