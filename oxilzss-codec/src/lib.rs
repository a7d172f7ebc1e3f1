//! # OxiLZSS Codec
//!
//! Pure Rust implementation of the classic LZSS bitstream used by
//! `complzss` containers in bootloader and kernel images.
//!
//! - **Window**: 4 KB ring buffer, pre-filled with spaces
//! - **Lookahead**: 18 bytes, matches of 3..=18 bytes become references
//! - **Match finder**: one binary search tree per leading byte
//! - **Framing**: one control byte per eight tokens, LSB first
//!
//! Both directions take a whole buffer and return a whole buffer. Neither
//! can fail: empty input gives empty output, and truncated or foreign input
//! decodes as far as it goes.
//!
//! ## Example
//!
//! ```rust
//! use oxilzss_codec::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = compress(original);
//! let decompressed = decompress(&compressed);
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Inspecting a stream
//!
//! ```rust
//! use oxilzss_codec::{compress, inspect};
//!
//! let compressed = compress(&[b'A'; 1000]);
//! let stats = inspect(&compressed);
//!
//! assert_eq!(stats.decoded_len(), 1000);
//! assert!(stats.references > stats.literals);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod encode;
pub mod token;
pub mod tree;

// Re-exports
pub use decode::{LzssDecoder, decompress, decompress_with_limit};
pub use encode::{LzssEncoder, compress};
pub use token::{LzssToken, StreamStats, TokenReader, TokenWriter, inspect};
pub use tree::{Match, MatchTree};
