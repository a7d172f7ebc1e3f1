//! complzss container support.
//!
//! A complzss payload is a 384-byte big-endian header followed by the raw
//! LZSS token stream:
//!
//! ```text
//! offset  size   field
//! 0       4      compression type  "comp"
//! 4       4      signature         "lzss"
//! 8       4      checksum          (recorded, not verified)
//! 12      4      uncompressed size
//! 16      4      compressed size
//! 20      0x16c  padding
//! ```
//!
//! # Example
//!
//! ```no_run
//! use oxilzss_archive::complzss::ComplzssReader;
//! use std::fs::File;
//!
//! let file = File::open("kernelcache.bin").unwrap();
//! let mut reader = ComplzssReader::new(file).unwrap();
//! let data = reader.decompress().unwrap();
//! ```

use oxilzss_codec::{compress, decompress_with_limit};
use oxilzss_core::error::{LzssError, Result};
use std::io::{Read, Write};

/// Magic at the start of every header ("comp" followed by "lzss").
pub const MAGIC: &[u8; 8] = b"complzss";

/// Compression type field, "comp".
pub const COMPRESSION_TYPE: u32 = 0x636f_6d70;

/// Signature field, "lzss".
pub const SIGNATURE: u32 = 0x6c7a_7373;

/// Length of the zero padding that closes the header.
pub const PADDING_LEN: usize = 0x16c;

/// Total header length.
pub const HEADER_LEN: usize = 20 + PADDING_LEN;

/// complzss header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplzssHeader {
    /// Checksum of the uncompressed data, as recorded by the producer.
    pub checksum: u32,
    /// Size of the data after decompression.
    pub uncompressed_size: u32,
    /// Size of the token stream following the header.
    pub compressed_size: u32,
}

impl ComplzssHeader {
    /// Build a header for a payload, rejecting sizes that do not fit.
    pub fn for_payload(
        checksum: u32,
        uncompressed_len: usize,
        compressed_len: usize,
    ) -> Result<Self> {
        let uncompressed_size = u32::try_from(uncompressed_len).map_err(|_| {
            LzssError::invalid_header(format!(
                "uncompressed size {} does not fit in 32 bits",
                uncompressed_len
            ))
        })?;
        let compressed_size = u32::try_from(compressed_len).map_err(|_| {
            LzssError::invalid_header(format!(
                "compressed size {} does not fit in 32 bits",
                compressed_len
            ))
        })?;

        Ok(Self {
            checksum,
            uncompressed_size,
            compressed_size,
        })
    }

    /// Parse a header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(LzssError::buffer_too_small(HEADER_LEN, data.len()));
        }
        if &data[..8] != MAGIC {
            return Err(LzssError::invalid_magic(MAGIC.to_vec(), data[..8].to_vec()));
        }

        let field = |offset: usize| {
            u32::from_be_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ])
        };
        let header = Self {
            checksum: field(8),
            uncompressed_size: field(12),
            compressed_size: field(16),
        };

        log::debug!(
            "complzss: header checksum={:#010x} uncompressed={} compressed={}",
            header.checksum,
            header.uncompressed_size,
            header.compressed_size
        );
        Ok(header)
    }

    /// Read and parse a header from a reader.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = Vec::with_capacity(HEADER_LEN);
        reader.take(HEADER_LEN as u64).read_to_end(&mut buf)?;
        if buf.len() < HEADER_LEN {
            return Err(LzssError::unexpected_eof(HEADER_LEN - buf.len()));
        }
        Self::parse(&buf)
    }

    /// Serialize the header, padding included.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&COMPRESSION_TYPE.to_be_bytes());
        out[4..8].copy_from_slice(&SIGNATURE.to_be_bytes());
        out[8..12].copy_from_slice(&self.checksum.to_be_bytes());
        out[12..16].copy_from_slice(&self.uncompressed_size.to_be_bytes());
        out[16..20].copy_from_slice(&self.compressed_size.to_be_bytes());
        out
    }

    /// Check whether `available` bytes after the header can hold the payload.
    pub fn payload_fits(&self, available: usize) -> bool {
        self.compressed_size as usize <= available
    }

    /// Compressed size over uncompressed size, 0.0 for an empty payload.
    pub fn ratio(&self) -> f64 {
        if self.uncompressed_size == 0 {
            0.0
        } else {
            self.compressed_size as f64 / self.uncompressed_size as f64
        }
    }
}

/// Options for writing a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerOptions {
    /// Value stored in the checksum field. The writer does not compute it.
    pub checksum: u32,
}

/// Offset of the first complzss header in `data`, if any.
pub fn locate(data: &[u8]) -> Option<usize> {
    data.windows(MAGIC.len()).position(|w| w == MAGIC)
}

/// complzss reader.
pub struct ComplzssReader<R: Read> {
    reader: R,
    header: ComplzssHeader,
}

impl<R: Read> ComplzssReader<R> {
    /// Create a reader, consuming and validating the header.
    pub fn new(mut reader: R) -> Result<Self> {
        let header = ComplzssHeader::read_from(&mut reader)?;
        Ok(Self { reader, header })
    }

    /// Get the parsed header.
    pub fn header(&self) -> &ComplzssHeader {
        &self.header
    }

    /// Read the raw token stream that follows the header.
    pub fn read_payload(&mut self) -> Result<Vec<u8>> {
        let expected = self.header.compressed_size as usize;
        // Sizes come from the header; grow with the data actually read.
        let mut payload = Vec::new();
        (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut payload)?;
        if payload.len() < expected {
            return Err(LzssError::unexpected_eof(expected - payload.len()));
        }
        Ok(payload)
    }

    /// Read and decompress the payload.
    ///
    /// Output stops at the recorded uncompressed size; a shorter result is
    /// a [`LzssError::SizeMismatch`].
    pub fn decompress(&mut self) -> Result<Vec<u8>> {
        let payload = self.read_payload()?;
        let expected = self.header.uncompressed_size as usize;
        let data = decompress_with_limit(&payload, expected);
        if data.len() != expected {
            return Err(LzssError::size_mismatch(expected, data.len()));
        }
        Ok(data)
    }

    /// Get the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// complzss writer.
pub struct ComplzssWriter<W: Write> {
    writer: W,
    options: ContainerOptions,
}

impl<W: Write> ComplzssWriter<W> {
    /// Create a writer with default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, ContainerOptions::default())
    }

    /// Create a writer with explicit options.
    pub fn with_options(writer: W, options: ContainerOptions) -> Self {
        Self { writer, options }
    }

    /// Compress `data` and write header and payload.
    pub fn write_compressed(&mut self, data: &[u8]) -> Result<ComplzssHeader> {
        let payload = compress(data);
        let header =
            ComplzssHeader::for_payload(self.options.checksum, data.len(), payload.len())?;

        self.writer.write_all(&header.to_bytes())?;
        self.writer.write_all(&payload)?;

        log::debug!(
            "complzss: wrote {} + {} bytes for {} input bytes",
            HEADER_LEN,
            payload.len(),
            data.len()
        );
        Ok(header)
    }

    /// Get the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Compress `data` into an in-memory complzss container.
pub fn pack(data: &[u8], options: ContainerOptions) -> Result<Vec<u8>> {
    let mut writer = ComplzssWriter::with_options(Vec::new(), options);
    writer.write_compressed(data)?;
    Ok(writer.into_inner())
}

/// Find the complzss header in `data` and decompress its payload.
pub fn unpack(data: &[u8]) -> Result<(ComplzssHeader, Vec<u8>)> {
    let offset = locate(data).ok_or_else(|| {
        LzssError::invalid_magic(MAGIC.to_vec(), data[..data.len().min(8)].to_vec())
    })?;
    let mut reader = ComplzssReader::new(&data[offset..])?;
    let decoded = reader.decompress()?;
    Ok((reader.header, decoded))
}
