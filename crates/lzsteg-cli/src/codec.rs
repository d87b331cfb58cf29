//! Plain compression and decompression of cover streams.

use lzsteg_core::{Format, LzStegError};

use crate::CliResult;

pub fn compress(format: Format, plain: &[u8]) -> CliResult<Vec<u8>> {
    match format {
        Format::Lz4 => Ok(lz4_flex::block::compress_prepend_size(plain)),
        Format::Snappy => snap::raw::Encoder::new()
            .compress_vec(plain)
            .map_err(|e| LzStegError::CompressionError(e.to_string())),
    }
}

pub fn decompress(format: Format, cover: &[u8]) -> CliResult<Vec<u8>> {
    match format {
        Format::Lz4 => lz4_flex::block::decompress_size_prepended(cover)
            .map_err(|e| LzStegError::CompressionError(e.to_string())),
        Format::Snappy => snap::raw::Decoder::new()
            .decompress_vec(cover)
            .map_err(|e| LzStegError::CompressionError(e.to_string())),
    }
}
