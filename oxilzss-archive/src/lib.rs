//! # OxiLZSS Archive
//!
//! Container support for OxiLZSS.
//!
//! The codec produces a bare token stream. Platform images wrap that stream
//! in a fixed 384-byte `complzss` header carrying the sizes and a checksum:
//!
//! - [`complzss`]: header parsing and writing, reader and writer
//! - [`detect`]: tell a wrapped payload from a raw stream
//!
//! ## Example
//!
//! ```rust
//! use oxilzss_archive::{ComplzssReader, ComplzssWriter};
//!
//! let mut writer = ComplzssWriter::new(Vec::new());
//! writer.write_compressed(b"Hello, Hello, Hello!").unwrap();
//! let packed = writer.into_inner();
//!
//! let mut reader = ComplzssReader::new(packed.as_slice()).unwrap();
//! assert_eq!(reader.header().uncompressed_size, 20);
//! assert_eq!(reader.decompress().unwrap(), b"Hello, Hello, Hello!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod complzss;
pub mod detect;

// Re-exports
pub use complzss::{
    ComplzssHeader, ComplzssReader, ComplzssWriter, ContainerOptions, locate, pack, unpack,
};
pub use detect::ContainerFormat;
