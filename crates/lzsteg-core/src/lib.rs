//! # lzsteg Core API
//!
//! Hides messages inside LZ4 and Snappy compressed streams without changing what they
//! decompress to. A match token copies bytes from somewhere back in the decoded history,
//! and often the very same bytes can be found at several distances. Picking one of these
//! equivalent offsets on purpose carries message bits, the decompressor does not care.
//!
//! The entry points are
//! - [`LzSteg`] for working on in-memory streams, with `scan`, `store` and `retrieve`
//! - [`api::hide`], [`api::unveil`] and [`api::scan`] for working on files
//!
//! # Usage Examples
//!
//! ## Hide a message inside an LZ4 stream
//!
//! ```rust,no_run
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//!
//! lzsteg_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_cover("tests/covers/cover.lz4")
//!     .with_output(temp_dir.path().join("cover-with-a-secret.lz4"))
//!     .execute()
//!     .expect("Failed to hide message in cover");
//! ```
//!
//! ## Unveil a message from a Snappy stream
//!
//! ```rust,no_run
//! use lzsteg_core::Format;
//!
//! let message = lzsteg_core::api::unveil::prepare()
//!     .from_secret_file("cover-with-a-secret.bin")
//!     .with_format(Format::Snappy)
//!     .execute()
//!     .expect("Failed to unveil message from cover");
//! ```
//!
//! ## Work on a stream in memory
//!
//! ```rust
//! use lzsteg_core::{EmbedOptions, Format, LzSteg};
//!
//! let text = b"abcdXabcdY".repeat(2);
//! let mut cover = snap::raw::Encoder::new().compress_vec(&text).unwrap();
//!
//! let steg = LzSteg::new(Format::Snappy).with_options(EmbedOptions::unframed());
//! let capacity = steg.scan(&cover).unwrap();
//! if capacity.bytes() > 0 {
//!     steg.store(&mut cover, b"!").unwrap();
//! }
//! assert_eq!(snap::raw::Decoder::new().decompress_vec(&cover).unwrap(), text);
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod commands;
pub mod engine;
pub mod error;
pub mod format;
pub mod hash_chain;
pub mod message;
pub mod options;
pub mod resolver;
pub mod result;
pub mod window;

pub use crate::engine::{Capacity, LzSteg};
pub use crate::error::LzStegError;
pub use crate::format::Format;
pub use crate::options::EmbedOptions;
pub use crate::resolver::EquivalenceClass;
pub use crate::result::Result;
