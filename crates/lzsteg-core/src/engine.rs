//! Capacity scan, message storage and message retrieval.
//!
//! All three walk the cover once, front to back, replaying every token into a fresh
//! [`Window`]. Whenever the reader hands out an embeddable match, the equivalence class of
//! its offset is resolved against the window and used to count, write or read bits.

use log::{debug, trace};

use crate::error::LzStegError;
use crate::format::{Format, Match, Reader, Token, TokenReader};
use crate::message::{frame, MessageCollector, PayloadBits};
use crate::options::EmbedOptions;
use crate::resolver::EquivalenceClass;
use crate::result::Result;
use crate::window::Window;

/// Hidden capacity of a cover stream
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Capacity {
    /// bits `store` can rely on, the sum of `floor(log2 k)` over all classes
    pub bits: u64,
    /// the sum of `log2 k`, what an ideal coder could squeeze out
    pub fractional_bits: f64,
    /// number of embeddable matches
    pub sites: u64,
}

impl Capacity {
    pub fn bytes(&self) -> u64 {
        self.bits / 8
    }

    pub fn fractional_bytes(&self) -> f64 {
        self.fractional_bits / 8.0
    }

    fn add(&mut self, class: &EquivalenceClass) {
        self.bits += class.bits() as u64;
        self.fractional_bits += class.fractional_bits();
        self.sites += 1;
    }
}

/// an embeddable match together with its resolved class
struct Site {
    token: Match,
    class: EquivalenceClass,
}

/// reader and window state of one pass over a cover
struct Session {
    reader: Reader,
    window: Window,
}

impl Session {
    fn new(format: Format, cover: &[u8]) -> Result<Self> {
        Ok(Self {
            reader: format.reader(cover)?,
            window: Window::new(),
        })
    }

    /// Replays tokens into the window until the next embeddable match.
    /// The match itself is not replayed yet, see [`Session::advance`].
    fn next_site(&mut self, cover: &[u8]) -> Result<Option<Site>> {
        while let Some(token) = self.reader.next_token(cover)? {
            match token {
                Token::Literal { start, length } => {
                    let bytes = start
                        .checked_add(length)
                        .and_then(|end| cover.get(start..end))
                        .ok_or(LzStegError::TruncatedCover {
                            needed: length,
                            position: start,
                        })?;
                    self.window.push_literal(bytes);
                }
                Token::Match(m) if self.reader.is_embeddable(&m) => {
                    let class = EquivalenceClass::resolve(
                        &self.window,
                        m.length,
                        m.offset,
                        self.reader.max_lookback(&m),
                    )?;
                    trace!(
                        "match at {} (length {}, offset {}): {} equivalent offsets",
                        self.window.position(),
                        m.length,
                        m.offset,
                        class.len()
                    );
                    return Ok(Some(Site { token: m, class }));
                }
                Token::Match(m) => {
                    self.window
                        .push_match(m.length, m.offset, self.reader.max_lookback(&m))?;
                }
            }
        }

        Ok(None)
    }

    /// replays the match of `site`, any offset of its class yields the same bytes
    fn advance(&mut self, site: &Site) -> Result<()> {
        let m = &site.token;
        self.window
            .push_match(m.length, m.offset, self.reader.max_lookback(m))
    }

    fn patch(&self, cover: &mut [u8], m: &Match, offset: usize) -> Result<()> {
        self.reader.patch_offset(cover, m, offset)
    }
}

/// Hides messages in the match offsets of LZ4 or Snappy compressed streams.
///
/// ```
/// use lzsteg_core::{Format, LzSteg};
///
/// let cover = lz4_flex::block::compress_prepend_size(b"to be or not to be, that is the question");
/// let capacity = LzSteg::new(Format::Lz4).scan(&cover)?;
/// println!("{} bytes can be hidden", capacity.bytes());
/// # Ok::<(), lzsteg_core::LzStegError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LzSteg {
    format: Format,
    options: EmbedOptions,
}

impl LzSteg {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            options: EmbedOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    /// decoded length announced by the header of `cover`
    pub fn decoded_len(&self, cover: &[u8]) -> Result<u64> {
        Ok(self.format.reader(cover)?.decoded_len())
    }

    /// Counts how many message bits `cover` can carry. Does not modify the cover.
    pub fn scan(&self, cover: &[u8]) -> Result<Capacity> {
        let mut session = Session::new(self.format, cover)?;
        let mut capacity = Capacity::default();

        while let Some(mut site) = session.next_site(cover)? {
            site.class.include(site.token.offset);
            capacity.add(&site.class);
            session.advance(&site)?;
        }
        debug!(
            "{} cover of {} bytes: {} embeddable matches, {} bits ({:.2} fractional)",
            self.format,
            cover.len(),
            capacity.sites,
            capacity.bits,
            capacity.fractional_bits
        );

        Ok(capacity)
    }

    /// Hides `message` by rewriting match offsets of `cover` in place.
    ///
    /// The decoded content of the cover stays the same. Fails with
    /// [`LzStegError::CapacityExceeded`] when the stream ends before the framed message is
    /// stored, the cover holds a partial message then.
    pub fn store(&self, cover: &mut [u8], message: &[u8]) -> Result<()> {
        let mut bits = PayloadBits::new(frame(message, &self.options)?);
        if bits.is_empty() {
            return Ok(());
        }

        let mut session = Session::new(self.format, cover)?;
        let mut patched = 0usize;
        while let Some(mut site) = session.next_site(cover)? {
            site.class.include(site.token.offset);
            let width = site.class.bits();
            if width > 0 {
                let index = bits.take(width)?;
                let offset = site.class.offsets()[index];
                if offset != site.token.offset {
                    session.patch(cover, &site.token, offset)?;
                    patched += 1;
                }
                if bits.is_exhausted() {
                    debug!(
                        "stored {} bytes in {} cover, {} offsets rewritten",
                        bits.len(),
                        self.format,
                        patched
                    );
                    return Ok(());
                }
            }
            session.advance(&site)?;
        }

        Err(LzStegError::CapacityExceeded {
            written: bits.bytes_written(),
            total: bits.len(),
        })
    }

    /// Recovers a message hidden by [`LzSteg::store`] with the same options.
    pub fn retrieve(&self, cover: &[u8]) -> Result<Vec<u8>> {
        let mut session = Session::new(self.format, cover)?;
        let mut collector = MessageCollector::new(self.options);

        while let Some(site) = session.next_site(cover)? {
            let index = site
                .class
                .position_of(site.token.offset)
                .ok_or(LzStegError::MalformedEncoding {
                    field: site.token.field,
                })?;
            if collector.push(site.class.bits(), index)? {
                break;
            }
            session.advance(&site)?;
        }

        let message = collector.finish()?;
        debug!("retrieved {} bytes from {} cover", message.len(), self.format);

        Ok(message)
    }
}
