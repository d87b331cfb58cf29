//! Token readers for the supported cover stream formats.
//!
//! A reader walks the compressed stream once, front to back, and hands out one [`Token`]
//! per call of [`TokenReader::next_token`]. It never keeps a borrow of the cover, so the
//! caller is free to patch offset fields of tokens it has already received.

mod lz4;
mod snappy;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use byteorder::{ByteOrder, LittleEndian};
use enum_dispatch::enum_dispatch;

use crate::error::LzStegError;
use crate::result::Result;

pub use lz4::Lz4Reader;
pub use snappy::SnappyReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// LZ4 sequence, 16 bit offset
    Lz4,
    /// Snappy copy with 11 bit offset
    Copy1,
    /// Snappy copy with 16 bit offset
    Copy2,
    /// Snappy copy with 32 bit offset
    Copy4,
}

/// a back-reference into the decoded history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub kind: MatchKind,
    pub length: usize,
    pub offset: usize,
    /// cover position of the (low byte of the) offset field
    pub field: usize,
    /// decoded position of the first byte the match produces
    pub position: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `length` raw bytes stored at cover position `start`
    Literal { start: usize, length: usize },
    Match(Match),
}

#[enum_dispatch]
pub trait TokenReader {
    /// decoded length announced by the stream header
    fn decoded_len(&self) -> u64;

    /// next token in stream order, `None` once the announced length is decoded
    fn next_token(&mut self, cover: &[u8]) -> Result<Option<Token>>;

    /// whether the offset of this match may be changed to carry message bits
    fn is_embeddable(&self, m: &Match) -> bool;

    /// largest offset the offset field of this match can express
    fn max_lookback(&self, m: &Match) -> usize;

    /// Rewrites the offset field of `m` inside the cover.
    /// An offset the field cannot express fails with `InvalidOffset` at `m.position`.
    fn patch_offset(&self, cover: &mut [u8], m: &Match, offset: usize) -> Result<()>;
}

#[enum_dispatch(TokenReader)]
pub enum Reader {
    Lz4Reader,
    SnappyReader,
}

/// supported cover stream formats
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// LZ4 block prefixed with its 4 byte little endian decoded size
    #[default]
    Lz4,
    /// raw Snappy block
    Snappy,
}

impl Format {
    /// creates a reader positioned at the first token of `cover`
    pub fn reader(self, cover: &[u8]) -> Result<Reader> {
        Ok(match self {
            Format::Lz4 => Lz4Reader::new(cover)?.into(),
            Format::Snappy => SnappyReader::new(cover)?.into(),
        })
    }

    /// guesses the format from a file extension like `.lz4` or `.sz`
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| LzStegError::UnsupportedFormat(path.display().to_string()))?;

        ext.parse()
    }
}

impl FromStr for Format {
    type Err = LzStegError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lz4" => Ok(Format::Lz4),
            "snappy" | "sz" | "snz" => Ok(Format::Snappy),
            other => Err(LzStegError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Lz4 => write!(f, "lz4"),
            Format::Snappy => write!(f, "snappy"),
        }
    }
}

/// bounds checked read position inside the cover
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ByteCursor {
    position: usize,
}

impl ByteCursor {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn take<'c>(&mut self, cover: &'c [u8], count: usize) -> Result<&'c [u8]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|&end| end <= cover.len())
            .ok_or(LzStegError::TruncatedCover {
                needed: count - cover.len().saturating_sub(self.position).min(count),
                position: self.position,
            })?;
        let bytes = &cover[self.position..end];
        self.position = end;

        Ok(bytes)
    }

    pub fn read_u8(&mut self, cover: &[u8]) -> Result<u8> {
        Ok(self.take(cover, 1)?[0])
    }

    pub fn read_u16(&mut self, cover: &[u8]) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(cover, 2)?))
    }

    pub fn read_u32(&mut self, cover: &[u8]) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(cover, 4)?))
    }

    /// little endian unsigned integer of 1 to 8 bytes
    pub fn read_uint(&mut self, cover: &[u8], bytes: usize) -> Result<u64> {
        Ok(LittleEndian::read_uint(self.take(cover, bytes)?, bytes))
    }
}

/// the cover bytes of an offset field, checked against the cover length
pub(crate) fn field_mut(cover: &mut [u8], field: usize, width: usize) -> Result<&mut [u8]> {
    let end = field.saturating_add(width);
    let available = cover.len();
    cover
        .get_mut(field..end)
        .ok_or(LzStegError::TruncatedCover {
            needed: end.saturating_sub(available),
            position: field,
        })
}
