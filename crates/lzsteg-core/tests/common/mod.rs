#![allow(dead_code)]

use lzsteg_core::Format;

const WORDS: &[&str] = &[
    "steganography", "compression", "window", "offset", "match", "literal", "token", "stream",
    "the", "a", "of", "in", "hidden", "message", "cover", "history", "decoder", "byte",
];

/// deterministic word salad, repetitive enough for plenty of matches
pub fn text(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut text = Vec::with_capacity(len + 16);
    while text.len() < len {
        text.extend_from_slice(WORDS[rng.usize(..WORDS.len())].as_bytes());
        text.push(match rng.u8(..12) {
            0 => b'\n',
            1 => b',',
            _ => b' ',
        });
    }
    text.truncate(len);
    text
}

pub fn compress(format: Format, plain: &[u8]) -> Vec<u8> {
    match format {
        Format::Lz4 => lz4_flex::block::compress_prepend_size(plain),
        Format::Snappy => snap::raw::Encoder::new()
            .compress_vec(plain)
            .expect("Failed to compress"),
    }
}

pub fn decompress(format: Format, cover: &[u8]) -> Vec<u8> {
    match format {
        Format::Lz4 => {
            lz4_flex::block::decompress_size_prepended(cover).expect("Failed to decompress")
        }
        Format::Snappy => snap::raw::Decoder::new()
            .decompress_vec(cover)
            .expect("Failed to decompress"),
    }
}

pub fn cover(format: Format, seed: u64, len: usize) -> (Vec<u8>, Vec<u8>) {
    let plain = text(seed, len);
    (compress(format, &plain), plain)
}

pub const FORMATS: [Format; 2] = [Format::Lz4, Format::Snappy];
