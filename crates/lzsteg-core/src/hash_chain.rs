//! Hash chains over the 4 byte prefixes of the decoded history.
//!
//! Every decoded position `p` is filed under the hash of the four bytes starting at `p`.
//! The `head` table holds the newest position per bucket, the `prev` table links each
//! position to the previous occupant of its bucket. Both tables are indexed by the position
//! masked to the window size, positions themselves are kept at full width.

use byteorder::{BigEndian, ByteOrder};

/// Size of the decoded history, in bytes
pub const WINDOW_SIZE: usize = 1 << 16;

const WINDOW_MASK: u64 = (WINDOW_SIZE - 1) as u64;

/// array slot of a logical position
#[inline]
pub(crate) fn slot(position: u64) -> usize {
    (position & WINDOW_MASK) as usize
}

/// Integer mix of the 4 bytes, reduced to 16 bits.
///
/// Store and retrieve must agree on this function bit for bit, otherwise they derive
/// different equivalence classes from the same history.
pub fn hash4(prefix: [u8; 4]) -> u16 {
    let mut a = BigEndian::read_u32(&prefix);
    a = a.wrapping_add(!(a << 15));
    a ^= a >> 10;
    a = a.wrapping_add(a << 3);
    a ^= a >> 6;
    a = a.wrapping_add(!(a << 11));
    a ^= a >> 16;

    a as u16
}

pub struct HashChain {
    head: Box<[Option<u64>]>,
    prev: Box<[Option<u64>]>,
}

impl Default for HashChain {
    fn default() -> Self {
        Self {
            head: vec![None; WINDOW_SIZE].into_boxed_slice(),
            prev: vec![None; WINDOW_SIZE].into_boxed_slice(),
        }
    }
}

impl HashChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// files `position` as the newest entry of the bucket of `prefix`
    pub fn insert(&mut self, position: u64, prefix: [u8; 4]) {
        let bucket = hash4(prefix) as usize;
        let previous = self.head[bucket].replace(position);
        self.prev[slot(position)] = previous;
    }

    /// Positions filed under the bucket of `prefix`, newest first.
    ///
    /// The walk ends at the first position older than `current - max_lookback`.
    /// Candidates only share the hash, callers must compare the bytes themselves.
    pub fn candidates(&self, prefix: [u8; 4], current: u64, max_lookback: usize) -> Candidates<'_> {
        Candidates {
            chain: self,
            next: self.head[hash4(prefix) as usize],
            oldest: current.saturating_sub(max_lookback as u64),
        }
    }
}

pub struct Candidates<'a> {
    chain: &'a HashChain,
    next: Option<u64>,
    oldest: u64,
}

impl Iterator for Candidates<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.next.take()?;
        if position < self.oldest {
            return None;
        }
        // a slot reused by a newer position would point forward, that ends the chain
        self.next = self.chain.prev[slot(position)].filter(|&p| p < position);

        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_should_be_deterministic_and_spread() {
        assert_eq!(hash4(*b"abcd"), hash4(*b"abcd"));
        assert_ne!(hash4(*b"abcd"), hash4(*b"abce"));
        assert_ne!(hash4(*b"abcd"), hash4(*b"dcba"));
    }

    #[test]
    fn should_yield_candidates_newest_first() {
        let mut chain = HashChain::new();
        chain.insert(3, *b"abcd");
        chain.insert(10, *b"wxyz");
        chain.insert(20, *b"abcd");
        chain.insert(42, *b"abcd");

        let found: Vec<u64> = chain.candidates(*b"abcd", 50, 65535).collect();
        assert_eq!(found, vec![42, 20, 3]);

        let found: Vec<u64> = chain.candidates(*b"wxyz", 50, 65535).collect();
        assert_eq!(found, vec![10]);
    }

    #[test]
    fn should_stop_at_the_lookback_limit() {
        let mut chain = HashChain::new();
        chain.insert(100, *b"abcd");
        chain.insert(5000, *b"abcd");
        chain.insert(7000, *b"abcd");

        let found: Vec<u64> = chain.candidates(*b"abcd", 7100, 2047).collect();
        assert_eq!(found, vec![7000]);
    }

    #[test]
    fn should_keep_a_candidate_exactly_at_the_lookback_limit() {
        let mut chain = HashChain::new();
        chain.insert(100, *b"abcd");
        chain.insert(5053, *b"abcd");
        chain.insert(7000, *b"abcd");

        let found: Vec<u64> = chain.candidates(*b"abcd", 7100, 2047).collect();
        assert_eq!(found, vec![7000, 5053]);
    }

    #[test]
    fn should_use_full_width_positions_beyond_the_window_size() {
        let mut chain = HashChain::new();
        let base = 3 * WINDOW_SIZE as u64;
        chain.insert(base - 10, *b"abcd");
        chain.insert(base + 10, *b"abcd");

        let found: Vec<u64> = chain.candidates(*b"abcd", base + 20, 65535).collect();
        assert_eq!(found, vec![base + 10, base - 10]);
    }

    #[test]
    fn should_not_follow_a_slot_reused_by_a_newer_position() {
        let mut chain = HashChain::new();
        chain.insert(9, *b"wxyz");
        chain.insert(7, *b"abcd");
        // same slot as 7, one window later, links to 9
        chain.insert(7 + WINDOW_SIZE as u64, *b"wxyz");

        let found: Vec<u64> = chain.candidates(*b"abcd", 100, 65535).collect();
        assert_eq!(found, vec![7]);
    }
}
