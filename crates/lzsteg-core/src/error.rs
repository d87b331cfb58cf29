use thiserror::Error;

#[derive(Error, Debug)]
pub enum LzStegError {
    /// Represents a cover stream that ran out of embeddable matches before the whole message was stored
    #[error("Capacity Error: only {written} of {total} message bytes fit into the cover stream")]
    CapacityExceeded { written: usize, total: usize },

    /// Represents a match offset that is not part of its own equivalence class.
    /// The stream was not written by `store` or it was recompressed / corrupted
    #[error("Malformed encoding: offset field at byte {field} does not belong to its equivalence class")]
    MalformedEncoding { field: usize },

    /// Represents a match that points outside of the decoded history
    #[error("Invalid offset {offset} at decoded position {position} (lookback limit {max_lookback})")]
    InvalidOffset {
        offset: usize,
        position: u64,
        max_lookback: usize,
    },

    /// Represents a token or header that reaches past the end of the cover stream
    #[error("Cover stream is truncated: {needed} more byte(s) required at byte {position}")]
    TruncatedCover { needed: usize, position: usize },

    /// Represents a stream header that does not describe a decoded length
    #[error("Invalid stream header: {0}")]
    InvalidHeader(&'static str),

    /// Represents a message that cannot be described by the 16 bit length prefix
    #[error("Message of {length} bytes is too long for a length prefix (max 65535)")]
    MessageTooLong { length: usize },

    /// Represents a length prefixed message whose announced length was not recovered
    #[error("Incomplete message: expected {expected} bytes but only {recovered} could be recovered")]
    IncompleteMessage { expected: usize, recovered: usize },

    /// Represents a null terminated message without terminator
    #[error("No message terminator found")]
    MissingTerminator,

    /// Represents an unknown cover stream format name or file extension
    #[error("Cover format is not supported: {0}")]
    UnsupportedFormat(String),

    /// Represents a failure of the external compressor or decompressor
    #[error("Compression error: {0}")]
    CompressionError(String),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No cover stream set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}
