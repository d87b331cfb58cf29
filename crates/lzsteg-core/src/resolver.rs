//! Equivalence classes of match offsets.
//!
//! Two offsets are equivalent when the bytes they copy are identical. A class of `k`
//! equivalent offsets lets the encoder pick one of them freely and so carries
//! `floor(log2 k)` message bits without changing the decoded output.

use crate::result::Result;
use crate::window::Window;

/// Shortest match that can be looked up in the hash chains
pub const MIN_MATCH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    offsets: Vec<usize>,
}

impl EquivalenceClass {
    /// Collects every offset that copies the same `length` bytes as `offset` does at the
    /// current window position, most recent first.
    ///
    /// Self-overlapping matches (`offset < length`) and matches shorter than [`MIN_MATCH`]
    /// are never searched, their class is just the given offset. Candidates are compared
    /// byte by byte, a shared hash is not enough. The given offset is not added if the
    /// search did not surface it, see [`EquivalenceClass::include`].
    pub fn resolve(
        window: &Window,
        length: usize,
        offset: usize,
        max_lookback: usize,
    ) -> Result<Self> {
        window.check_offset(offset, max_lookback)?;
        if offset < length || length < MIN_MATCH {
            return Ok(Self::single(offset));
        }

        let current = window.position();
        let source = current - offset as u64;
        let offsets = window
            .candidates(window.prefix_at(source), max_lookback)
            .filter(|&p| current - p >= length as u64)
            .filter(|&p| p == source || window.same_content(p, source, length))
            .map(|p| (current - p) as usize)
            .collect();

        Ok(Self { offsets })
    }

    pub fn single(offset: usize) -> Self {
        Self {
            offsets: vec![offset],
        }
    }

    /// appends `offset` unless it is already part of the class
    pub fn include(&mut self, offset: usize) {
        if !self.offsets.contains(&offset) {
            self.offsets.push(offset);
        }
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn position_of(&self, offset: usize) -> Option<usize> {
        self.offsets.iter().position(|&o| o == offset)
    }

    /// message bits this class can carry
    pub fn bits(&self) -> u32 {
        if self.offsets.is_empty() {
            0
        } else {
            self.offsets.len().ilog2()
        }
    }

    /// `log2` of the class size, the theoretical capacity
    pub fn fractional_bits(&self) -> f64 {
        if self.offsets.is_empty() {
            0.0
        } else {
            (self.offsets.len() as f64).log2()
        }
    }
}
