//! Error types for OxiLZSS operations.
//!
//! The codec itself is total and never fails. These errors come from the
//! layers around it: I/O, container header validation and size checks.

use std::io;
use thiserror::Error;

/// The main error type for OxiLZSS operations.
#[derive(Debug, Error)]
pub enum LzssError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in container header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Decompressed size does not match the size recorded in the header.
    #[error("Size mismatch: header records {expected} bytes, decoded {actual}")]
    SizeMismatch {
        /// Size recorded in the header.
        expected: usize,
        /// Size actually produced.
        actual: usize,
    },

    /// Buffer too small for operation.
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
}

/// Result type alias for OxiLZSS operations.
pub type Result<T> = std::result::Result<T, LzssError>;

impl LzssError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a size mismatch error.
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LzssError::invalid_magic(b"complzss".to_vec(), b"bvx2".to_vec());
        assert!(err.to_string().contains("Invalid magic"));

        let err = LzssError::size_mismatch(100, 42);
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("42"));

        let err = LzssError::invalid_header("compressed size overflows u32");
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: LzssError = io_err.into();
        assert!(matches!(err, LzssError::Io(_)));
    }
}
