use byteorder::{ByteOrder, LittleEndian};

use super::{field_mut, ByteCursor, Match, MatchKind, Token, TokenReader};
use crate::error::LzStegError;
use crate::result::Result;

/// every LZ4 match copies at least this many bytes
const MIN_MATCH_LEN: usize = 4;
const MAX_OFFSET: usize = 0xffff;
/// nibble value announcing additional length bytes
const RUN_MASK: usize = 0xf;

/// Reads an LZ4 block with a 4 byte little endian decoded size in front.
///
/// Each sequence is a token byte (literal length nibble, match length nibble), the
/// literals, a 2 byte offset and the remaining match length. The last sequence carries
/// literals only.
pub struct Lz4Reader {
    cursor: ByteCursor,
    decoded: u64,
    end: u64,
    pending: Option<Match>,
}

impl Lz4Reader {
    pub fn new(cover: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::default();
        let end = cursor.read_u32(cover)? as u64;

        Ok(Self {
            cursor,
            decoded: 0,
            end,
            pending: None,
        })
    }

    fn read_length(&mut self, cover: &[u8], nibble: usize) -> Result<usize> {
        let mut length = nibble;
        if nibble == RUN_MASK {
            loop {
                let b = self.cursor.read_u8(cover)?;
                length += b as usize;
                if b != 255 {
                    break;
                }
            }
        }

        Ok(length)
    }
}

impl TokenReader for Lz4Reader {
    fn decoded_len(&self) -> u64 {
        self.end
    }

    fn next_token(&mut self, cover: &[u8]) -> Result<Option<Token>> {
        if let Some(m) = self.pending.take() {
            return Ok(Some(Token::Match(m)));
        }
        if self.decoded >= self.end {
            return Ok(None);
        }

        let token = self.cursor.read_u8(cover)? as usize;
        let literal_len = self.read_length(cover, token >> 4)?;
        let start = self.cursor.position();
        self.cursor.take(cover, literal_len)?;
        self.decoded += literal_len as u64;

        let literal = Token::Literal {
            start,
            length: literal_len,
        };
        if self.decoded >= self.end {
            return Ok((literal_len > 0).then_some(literal));
        }

        let field = self.cursor.position();
        let offset = self.cursor.read_u16(cover)? as usize;
        let length = self.read_length(cover, token & RUN_MASK)? + MIN_MATCH_LEN;
        let m = Match {
            kind: MatchKind::Lz4,
            length,
            offset,
            field,
            position: self.decoded,
        };
        self.decoded += length as u64;

        if literal_len == 0 {
            return Ok(Some(Token::Match(m)));
        }
        self.pending = Some(m);

        Ok(Some(literal))
    }

    fn is_embeddable(&self, m: &Match) -> bool {
        m.kind == MatchKind::Lz4
    }

    fn max_lookback(&self, _m: &Match) -> usize {
        MAX_OFFSET
    }

    fn patch_offset(&self, cover: &mut [u8], m: &Match, offset: usize) -> Result<()> {
        if offset == 0 || offset > MAX_OFFSET {
            return Err(LzStegError::InvalidOffset {
                offset,
                position: m.position,
                max_lookback: MAX_OFFSET,
            });
        }
        LittleEndian::write_u16(field_mut(cover, m.field, 2)?, offset as u16);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(cover: &[u8]) -> Result<Vec<Token>> {
        let mut reader = Lz4Reader::new(cover)?;
        let mut tokens = Vec::new();
        while let Some(t) = reader.next_token(cover)? {
            tokens.push(t);
        }
        Ok(tokens)
    }

    #[test]
    fn should_read_a_literal_only_block() {
        // 5 bytes decoded, one sequence with 5 literals and no match
        let cover = [5, 0, 0, 0, 0x50, b'h', b'e', b'l', b'l', b'o'];

        assert_eq!(
            tokens(&cover).unwrap(),
            vec![Token::Literal {
                start: 5,
                length: 5
            }]
        );
    }

    #[test]
    fn should_read_literals_followed_by_a_match() {
        // "abcd" + copy of 8 at offset 4 + "xyz"
        let cover = [
            15, 0, 0, 0, //
            0x44, b'a', b'b', b'c', b'd', 4, 0, //
            0x30, b'x', b'y', b'z',
        ];

        assert_eq!(
            tokens(&cover).unwrap(),
            vec![
                Token::Literal {
                    start: 5,
                    length: 4
                },
                Token::Match(Match {
                    kind: MatchKind::Lz4,
                    length: 8,
                    offset: 4,
                    field: 9,
                    position: 4
                }),
                Token::Literal {
                    start: 12,
                    length: 3
                },
            ]
        );
    }

    #[test]
    fn should_read_extended_lengths() {
        let mut cover = vec![0u8; 4];
        // 15 + 255 + 10 = 280 literals, match of 15 + 3 + 4 = 22
        cover.extend_from_slice(&[0xff, 255, 10]);
        cover.extend(std::iter::repeat(b'a').take(280));
        cover.extend_from_slice(&[1, 0, 3]);
        cover.extend_from_slice(&[0x10, b'!']);
        LittleEndian::write_u32(&mut cover[..4], 280 + 22 + 1);

        let t = tokens(&cover).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(
            t[0],
            Token::Literal {
                start: 7,
                length: 280
            }
        );
        assert!(matches!(
            t[1],
            Token::Match(Match {
                length: 22,
                offset: 1,
                field: 287,
                ..
            })
        ));
    }

    #[test]
    fn should_report_a_truncated_block() {
        let cover = [9, 0, 0, 0, 0x50, b'h', b'e'];

        assert!(matches!(
            tokens(&cover),
            Err(LzStegError::TruncatedCover { needed: 3, .. })
        ));
        assert!(matches!(
            Lz4Reader::new(&[1, 0]),
            Err(LzStegError::TruncatedCover { .. })
        ));
    }

    #[test]
    fn should_patch_the_offset_field_in_place() {
        let mut cover = vec![
            15, 0, 0, 0, //
            0x44, b'a', b'b', b'c', b'd', 4, 0, //
            0x30, b'x', b'y', b'z',
        ];
        let reader = Lz4Reader::new(&cover).unwrap();
        let m = Match {
            kind: MatchKind::Lz4,
            length: 8,
            offset: 4,
            field: 9,
            position: 4,
        };

        reader.patch_offset(&mut cover, &m, 0x1234).unwrap();
        assert_eq!(&cover[9..11], &[0x34, 0x12]);
        assert!(matches!(
            reader.patch_offset(&mut cover, &m, 0x10000),
            Err(LzStegError::InvalidOffset {
                offset: 0x10000,
                position: 4,
                ..
            })
        ));
        assert!(reader.patch_offset(&mut cover, &m, 0).is_err());
    }
}
