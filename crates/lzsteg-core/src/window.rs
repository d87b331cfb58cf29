//! Replay of the decoded stream into a bounded history, exactly as a decompressor holds it.

use crate::error::LzStegError;
use crate::hash_chain::{slot, Candidates, HashChain, WINDOW_SIZE};
use crate::result::Result;

pub struct Window {
    history: Box<[u8]>,
    position: u64,
    index: HashChain,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            history: vec![0; WINDOW_SIZE].into_boxed_slice(),
            position: 0,
            index: HashChain::new(),
        }
    }
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of bytes decoded so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// byte at a logical position, only meaningful for the last [`WINDOW_SIZE`] positions
    #[inline]
    pub fn byte_at(&self, position: u64) -> u8 {
        self.history[slot(position)]
    }

    pub fn prefix_at(&self, position: u64) -> [u8; 4] {
        [
            self.byte_at(position),
            self.byte_at(position + 1),
            self.byte_at(position + 2),
            self.byte_at(position + 3),
        ]
    }

    fn push_byte(&mut self, byte: u8) {
        self.history[slot(self.position)] = byte;
        self.position += 1;
        if self.position >= 4 {
            let start = self.position - 4;
            self.index.insert(start, self.prefix_at(start));
        }
    }

    pub fn push_literal(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_byte(b);
        }
    }

    /// A match must point into the decoded history and stay within `max_lookback`.
    pub fn check_offset(&self, offset: usize, max_lookback: usize) -> Result<()> {
        if offset == 0
            || offset as u64 > self.position
            || offset > max_lookback
            || offset > WINDOW_SIZE
        {
            return Err(LzStegError::InvalidOffset {
                offset,
                position: self.position,
                max_lookback,
            });
        }

        Ok(())
    }

    /// Copies `length` bytes from `offset` back, one at a time, so overlapping matches
    /// repeat the bytes they have just written.
    pub fn push_match(&mut self, length: usize, offset: usize, max_lookback: usize) -> Result<()> {
        self.check_offset(offset, max_lookback)?;
        for _ in 0..length {
            let b = self.byte_at(self.position - offset as u64);
            self.push_byte(b);
        }

        Ok(())
    }

    /// true if the `length` bytes at `a` and `b` are identical
    pub fn same_content(&self, a: u64, b: u64, length: usize) -> bool {
        (0..length as u64).all(|i| self.byte_at(a + i) == self.byte_at(b + i))
    }

    /// earlier positions whose 4 byte prefix hashes like `prefix`, newest first
    pub fn candidates(&self, prefix: [u8; 4], max_lookback: usize) -> Candidates<'_> {
        self.index.candidates(prefix, self.position, max_lookback)
    }
}
