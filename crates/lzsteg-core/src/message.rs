//! Message framing and the bit packing between message bytes and class indices.
//!
//! Bits are taken least significant first within each byte, bytes in order. The index
//! chosen for a class of `n` bits is made of the next `n` message bits, the first of
//! them being the lowest bit of the index.

use std::io::Cursor;

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};
use byteorder::{ByteOrder, LittleEndian as LE};

use crate::error::LzStegError;
use crate::options::EmbedOptions;
use crate::result::Result;

pub const LENGTH_PREFIX_LEN: usize = 2;
pub const MAX_PREFIXED_LEN: usize = u16::MAX as usize;

/// Applies the framing of `options` to `message`.
pub fn frame(message: &[u8], options: &EmbedOptions) -> Result<Vec<u8>> {
    let mut framed = Vec::with_capacity(message.len() + LENGTH_PREFIX_LEN + 1);
    if options.length_prefix {
        if message.len() > MAX_PREFIXED_LEN {
            return Err(LzStegError::MessageTooLong {
                length: message.len(),
            });
        }
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        LE::write_u16(&mut prefix, message.len() as u16);
        framed.extend_from_slice(&prefix);
    }
    framed.extend_from_slice(message);
    if options.null_terminate {
        framed.push(0);
    }

    Ok(framed)
}

/// Hands out the bits of a framed message in embedding order.
pub struct PayloadBits {
    reader: BitReader<Cursor<Vec<u8>>, LittleEndian>,
    total_bits: u64,
    consumed: u64,
}

impl PayloadBits {
    pub fn new(payload: Vec<u8>) -> Self {
        let total_bits = payload.len() as u64 * 8;

        Self {
            reader: BitReader::endian(Cursor::new(payload), LittleEndian),
            total_bits,
            consumed: 0,
        }
    }

    /// length of the framed message in bytes
    pub fn len(&self) -> usize {
        (self.total_bits / 8) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total_bits == 0
    }

    /// true once every message bit has been handed out
    pub fn is_exhausted(&self) -> bool {
        self.consumed >= self.total_bits
    }

    /// message bytes whose bits have all been handed out
    pub fn bytes_written(&self) -> usize {
        (self.consumed.min(self.total_bits) / 8) as usize
    }

    /// Next `bits` message bits as index, zero filled past the end of the message.
    pub fn take(&mut self, bits: u32) -> Result<usize> {
        let available = self.total_bits.saturating_sub(self.consumed);
        let from_message = (bits as u64).min(available) as u32;
        let index = if from_message > 0 {
            self.reader.read::<u32>(from_message)?
        } else {
            0
        };
        self.consumed += bits as u64;

        Ok(index as usize)
    }
}

/// Collects recovered bits into message bytes and watches the framing for the end.
pub struct MessageCollector {
    writer: BitWriter<Vec<u8>, LittleEndian>,
    options: EmbedOptions,
    /// framed length announced by the length prefix
    expected: Option<usize>,
    complete: bool,
}

impl MessageCollector {
    pub fn new(options: EmbedOptions) -> Self {
        Self {
            writer: BitWriter::endian(Vec::new(), LittleEndian),
            options,
            expected: None,
            complete: false,
        }
    }

    /// Appends the low `bits` bits of `index`.
    /// Returns true as soon as the framing says the message is complete, remaining bits
    /// of `index` are dropped then.
    pub fn push(&mut self, bits: u32, index: usize) -> Result<bool> {
        for i in 0..bits {
            self.writer.write_bit((index >> i) & 1 == 1)?;
            if self.writer.byte_aligned() && self.byte_completed() {
                self.complete = true;
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn byte_completed(&mut self) -> bool {
        let Some(bytes) = self.writer.writer() else {
            return false;
        };

        if self.options.length_prefix {
            if bytes.len() == LENGTH_PREFIX_LEN {
                self.expected = Some(LENGTH_PREFIX_LEN + LE::read_u16(bytes) as usize);
            }
            return self.expected.is_some_and(|expected| bytes.len() >= expected);
        }

        self.options.null_terminate && bytes.last() == Some(&0)
    }

    /// Removes the framing and returns the message.
    ///
    /// - length prefix: fails with `IncompleteMessage` when fewer bytes than announced were
    ///   recovered (both counted with the 2 byte prefix)
    /// - null terminator only: fails with `MissingTerminator` when no zero byte was recovered
    /// - no framing: every complete byte recovered
    pub fn finish(self) -> Result<Vec<u8>> {
        let Self {
            writer,
            options,
            expected,
            complete,
        } = self;
        let mut bytes = writer.into_writer();

        if options.length_prefix {
            if !complete {
                return Err(LzStegError::IncompleteMessage {
                    expected: expected.unwrap_or(LENGTH_PREFIX_LEN),
                    recovered: bytes.len(),
                });
            }
            bytes.truncate(expected.unwrap_or(LENGTH_PREFIX_LEN));
            return Ok(bytes.split_off(LENGTH_PREFIX_LEN));
        }

        if options.null_terminate {
            if !complete {
                return Err(LzStegError::MissingTerminator);
            }
            bytes.pop();
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_frame_with_length_prefix_and_terminator() {
        let both = EmbedOptions::default().with_length_prefix(true);

        assert_eq!(
            frame(b"hi", &EmbedOptions::default()).unwrap(),
            vec![b'h', b'i', 0]
        );
        assert_eq!(frame(b"hi", &both).unwrap(), vec![2, 0, b'h', b'i', 0]);
        assert_eq!(frame(b"", &EmbedOptions::unframed()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn should_reject_messages_too_long_for_the_prefix() {
        let opts = EmbedOptions::unframed().with_length_prefix(true);
        let message = vec![1u8; MAX_PREFIXED_LEN + 1];

        assert!(matches!(
            frame(&message, &opts),
            Err(LzStegError::MessageTooLong { length: 65536 })
        ));
        assert!(frame(&message[1..], &opts).is_ok());
    }

    #[test]
    fn should_hand_out_bits_lsb_first() {
        let mut bits = PayloadBits::new(vec![0b1011_0110, 0xff]);

        assert_eq!(bits.take(1).unwrap(), 0);
        assert_eq!(bits.take(3).unwrap(), 0b011);
        assert_eq!(bits.take(4).unwrap(), 0b1011);
        assert_eq!(bits.bytes_written(), 1);
        assert!(!bits.is_exhausted());

        // only 8 bits are left, the rest is zero filled
        assert_eq!(bits.take(12).unwrap(), 0x0ff);
        assert!(bits.is_exhausted());
        assert_eq!(bits.bytes_written(), 2);
    }

    #[test]
    fn collector_should_restore_what_payload_bits_hand_out() {
        let mut bits = PayloadBits::new(b"lz".to_vec());
        let mut collector = MessageCollector::new(EmbedOptions::unframed());

        for width in [3, 5, 2, 6] {
            let index = bits.take(width).unwrap();
            assert!(!collector.push(width, index).unwrap());
        }
        assert_eq!(collector.finish().unwrap(), b"lz");
    }

    #[test]
    fn collector_should_stop_at_the_terminator() {
        let mut collector = MessageCollector::new(EmbedOptions::default());

        assert!(!collector.push(8, b'a' as usize).unwrap());
        // the terminator completes in the middle of this index
        assert!(collector.push(16, 0xff00).unwrap());
        assert_eq!(collector.finish().unwrap(), b"a");
    }

    #[test]
    fn collector_should_stop_after_the_announced_length() {
        let opts = EmbedOptions::unframed().with_length_prefix(true);
        let mut collector = MessageCollector::new(opts);

        for b in [1u8, 0, b'x'] {
            if collector.push(8, b as usize).unwrap() {
                break;
            }
        }
        assert_eq!(collector.finish().unwrap(), b"x");

        let mut collector = MessageCollector::new(opts);
        assert!(collector.push(16, 0).unwrap(), "empty message");
        assert_eq!(collector.finish().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn collector_should_report_incomplete_messages() {
        let opts = EmbedOptions::unframed().with_length_prefix(true);
        let mut collector = MessageCollector::new(opts);
        collector.push(16, 5).unwrap();
        collector.push(8, b'a' as usize).unwrap();

        assert!(matches!(
            collector.finish(),
            Err(LzStegError::IncompleteMessage {
                expected: 7,
                recovered: 3
            })
        ));

        let mut collector = MessageCollector::new(EmbedOptions::default());
        collector.push(8, b'a' as usize).unwrap();
        assert!(matches!(
            collector.finish(),
            Err(LzStegError::MissingTerminator)
        ));
    }

    #[test]
    fn collector_should_ignore_zero_bytes_inside_a_length_prefixed_message() {
        let opts = EmbedOptions::default().with_length_prefix(true);
        let mut collector = MessageCollector::new(opts);

        let mut done = false;
        for b in [2u8, 0, 0, 7] {
            done = collector.push(8, b as usize).unwrap();
        }
        assert!(done);
        assert_eq!(collector.finish().unwrap(), vec![0, 7]);
    }
}
