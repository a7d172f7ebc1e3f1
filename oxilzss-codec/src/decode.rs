//! LZSS decoder.
//!
//! Decoding needs no match tree: literals are written at the window cursor,
//! and references copy from absolute ring positions one byte at a time, so a
//! copy that overlaps the cursor repeats the bytes it has just produced.
//!
//! Truncated input is not an error. Decoding stops at the first token that
//! runs out of bytes and returns what was produced so far.

use crate::token::{LzssToken, TokenReader};
use oxilzss_core::WindowBuffer;
use oxilzss_core::params::INITIAL_POSITION;

/// Single-use LZSS decoder state.
#[derive(Debug)]
pub struct LzssDecoder {
    /// Ring buffer for history.
    window: WindowBuffer,
    /// Write cursor.
    position: usize,
    /// Output buffer.
    output: Vec<u8>,
    /// Stop after this many output bytes.
    limit: usize,
}

impl LzssDecoder {
    /// Create a decoder with no output limit.
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Create a decoder that stops once `limit` bytes have been produced.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            window: WindowBuffer::standard(),
            position: INITIAL_POSITION,
            output: Vec::new(),
            limit,
        }
    }

    /// Append one byte to the output and the window.
    ///
    /// Returns `false` once the output limit has been reached.
    #[inline]
    fn emit(&mut self, byte: u8) -> bool {
        if self.output.len() >= self.limit {
            return false;
        }
        self.output.push(byte);
        self.window.set(self.position, byte);
        self.position = self.window.wrap(self.position + 1);
        true
    }

    /// Decode a raw token stream.
    pub fn decode(mut self, input: &[u8]) -> Vec<u8> {
        self.output.reserve(input.len().saturating_mul(2).min(self.limit));

        let mut literals = 0usize;
        let mut references = 0usize;

        'tokens: for token in TokenReader::new(input) {
            match token {
                LzssToken::Literal(byte) => {
                    if !self.emit(byte) {
                        break;
                    }
                    literals += 1;
                }
                LzssToken::Reference { position, length } => {
                    let start = position as usize;
                    for k in 0..length as usize {
                        let byte = self.window.get(start + k);
                        if !self.emit(byte) {
                            break 'tokens;
                        }
                    }
                    references += 1;
                }
            }
        }

        log::debug!(
            "lzss: decompressed {} bytes to {} bytes ({} literals, {} references)",
            input.len(),
            self.output.len(),
            literals,
            references
        );
        self.output
    }
}

impl Default for LzssDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompress a raw LZSS token stream.
///
/// Empty input yields empty output. Any byte sequence is accepted; garbage
/// in gives garbage out.
pub fn decompress(input: &[u8]) -> Vec<u8> {
    LzssDecoder::new().decode(input)
}

/// Decompress a raw LZSS token stream, producing at most `limit` bytes.
pub fn decompress_with_limit(input: &[u8], limit: usize) -> Vec<u8> {
    LzssDecoder::with_limit(limit).decode(input)
}
