/// Framing of the hidden message
///
/// `store` and `retrieve` have to agree on these, the stream itself does not record them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Put the message length as 2 byte little endian number in front of the message.
    /// Limits the message to 65535 bytes.
    pub length_prefix: bool,

    /// Append a zero byte after the message.
    /// Without a length prefix this is what tells `retrieve` where the message ends,
    /// so the message itself should not contain zero bytes.
    pub null_terminate: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            length_prefix: false,
            null_terminate: true,
        }
    }
}

impl EmbedOptions {
    /// the message bytes as they are, retrieve hands back everything recovered
    pub fn unframed() -> Self {
        Self {
            length_prefix: false,
            null_terminate: false,
        }
    }

    pub fn with_length_prefix(mut self, length_prefix: bool) -> Self {
        self.length_prefix = length_prefix;
        self
    }

    pub fn with_null_terminator(mut self, null_terminate: bool) -> Self {
        self.null_terminate = null_terminate;
        self
    }
}
