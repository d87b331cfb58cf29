use byteorder::{ByteOrder, LittleEndian};

use super::{field_mut, ByteCursor, Match, MatchKind, Token, TokenReader};
use crate::error::LzStegError;
use crate::hash_chain::WINDOW_SIZE;
use crate::resolver::MIN_MATCH;
use crate::result::Result;

// The low 2 bits of every tag byte select the element type:
// - literal: length is 1 + the upper 6 bits, values 60..63 announce 1..4 length bytes
// - copy 1: length 4 + bits 2..4, offset bits 8..10 in the upper 3 bits, 1 offset byte
// - copy 2: length 1 + the upper 6 bits, 2 offset bytes
// - copy 4: length 1 + the upper 6 bits, 4 offset bytes
const TAG_LITERAL: u8 = 0x00;
const TAG_COPY_1: u8 = 0x01;
const TAG_COPY_2: u8 = 0x02;

const MAX_COPY_1_OFFSET: usize = 0x7ff;
const MAX_COPY_2_OFFSET: usize = 0xffff;

/// a 32 bit length needs at most 5 varint bytes
const MAX_VARINT_LEN: usize = 5;

/// Reads a raw Snappy block: a varint decoded length followed by tagged elements.
pub struct SnappyReader {
    cursor: ByteCursor,
    decoded: u64,
    end: u64,
}

impl SnappyReader {
    pub fn new(cover: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::default();
        let end = read_varint(&mut cursor, cover)?;

        Ok(Self {
            cursor,
            decoded: 0,
            end,
        })
    }
}

fn read_varint(cursor: &mut ByteCursor, cover: &[u8]) -> Result<u64> {
    let mut value = 0u64;
    for i in 0..MAX_VARINT_LEN {
        let b = cursor.read_u8(cover)?;
        value |= ((b & 0x7f) as u64) << (7 * i);
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(LzStegError::InvalidHeader("varint length exceeds 32 bits"))
}

impl TokenReader for SnappyReader {
    fn decoded_len(&self) -> u64 {
        self.end
    }

    fn next_token(&mut self, cover: &[u8]) -> Result<Option<Token>> {
        if self.decoded >= self.end {
            return Ok(None);
        }

        let tag = self.cursor.read_u8(cover)?;
        let upper = (tag >> 2) as usize;
        let token = match tag & 0x3 {
            TAG_LITERAL => {
                let length = if upper >= 60 {
                    1 + self.cursor.read_uint(cover, upper - 59)? as usize
                } else {
                    1 + upper
                };
                let start = self.cursor.position();
                self.cursor.take(cover, length)?;
                Token::Literal { start, length }
            }
            TAG_COPY_1 => {
                let field = self.cursor.position();
                let offset = self.cursor.read_u8(cover)? as usize + (((tag & 0xe0) as usize) << 3);
                Token::Match(Match {
                    kind: MatchKind::Copy1,
                    length: 4 + (upper & 0x7),
                    offset,
                    field,
                    position: self.decoded,
                })
            }
            TAG_COPY_2 => {
                let field = self.cursor.position();
                let offset = self.cursor.read_u16(cover)? as usize;
                Token::Match(Match {
                    kind: MatchKind::Copy2,
                    length: 1 + upper,
                    offset,
                    field,
                    position: self.decoded,
                })
            }
            _ => {
                let field = self.cursor.position();
                let offset = self.cursor.read_u32(cover)? as usize;
                Token::Match(Match {
                    kind: MatchKind::Copy4,
                    length: 1 + upper,
                    offset,
                    field,
                    position: self.decoded,
                })
            }
        };

        self.decoded += match token {
            Token::Literal { length, .. } => length as u64,
            Token::Match(m) => m.length as u64,
        };

        Ok(Some(token))
    }

    fn is_embeddable(&self, m: &Match) -> bool {
        matches!(m.kind, MatchKind::Copy1 | MatchKind::Copy2) && m.length >= MIN_MATCH
    }

    fn max_lookback(&self, m: &Match) -> usize {
        match m.kind {
            MatchKind::Copy1 => MAX_COPY_1_OFFSET,
            MatchKind::Copy2 => MAX_COPY_2_OFFSET,
            // 32 bit offsets are only bounded by the decoded history
            MatchKind::Copy4 | MatchKind::Lz4 => WINDOW_SIZE,
        }
    }

    fn patch_offset(&self, cover: &mut [u8], m: &Match, offset: usize) -> Result<()> {
        let max_lookback = self.max_lookback(m);
        if !self.is_embeddable(m) || offset == 0 || offset > max_lookback {
            return Err(LzStegError::InvalidOffset {
                offset,
                position: m.position,
                max_lookback,
            });
        }

        match m.kind {
            MatchKind::Copy1 => {
                // tag byte directly in front of the low offset byte
                let field = field_mut(cover, m.field.wrapping_sub(1), 2)?;
                field[0] = (field[0] & 0x1f) | ((offset >> 3) & 0xe0) as u8;
                field[1] = (offset & 0xff) as u8;
            }
            _ => LittleEndian::write_u16(field_mut(cover, m.field, 2)?, offset as u16),
        }

        Ok(())
    }
}
