//! LZSS encoder.
//!
//! The encoder slides two cursors around the window: `s`, the oldest
//! dictionary byte, and `r`, the start of the lookahead. Every byte the
//! window advances removes the string at `s` from the match tree, stores the
//! next input byte there, and inserts the string at the new `r`, which also
//! yields the match used by the next token.

use crate::token::TokenWriter;
use crate::tree::{Match, MatchTree};
use oxilzss_core::WindowBuffer;
use oxilzss_core::params::{INITIAL_POSITION, MAX_MATCH, THRESHOLD};

/// Single-use LZSS encoder state.
///
/// Owns the window and the match tree for the duration of one
/// [`encode`](Self::encode) call.
#[derive(Debug)]
pub struct LzssEncoder {
    window: WindowBuffer,
    tree: MatchTree,
}

impl LzssEncoder {
    /// Create a fresh encoder.
    pub fn new() -> Self {
        Self {
            window: WindowBuffer::standard(),
            tree: MatchTree::new(),
        }
    }

    /// Encode the whole input into a raw token stream.
    pub fn encode(mut self, input: &[u8]) -> Vec<u8> {
        if input.is_empty() {
            return Vec::new();
        }

        let mut writer = TokenWriter::with_capacity(input.len() / 2 + 16);
        let mut source = input.iter().copied();
        let mut s = 0usize;
        let mut r = INITIAL_POSITION;
        let mut literals = 0usize;
        let mut references = 0usize;

        // Fill the lookahead.
        let mut remaining = 0usize;
        for byte in source.by_ref().take(MAX_MATCH) {
            self.window.set(r + remaining, byte);
            remaining += 1;
        }

        // The strings just before the lookahead all start with filler bytes.
        for i in 1..=MAX_MATCH {
            self.tree.insert(&self.window, r - i);
        }
        let mut found: Match = self.tree.insert(&self.window, r);

        loop {
            // Matches may run into stale bytes past the end of the input.
            let mut length = found.length.min(remaining);
            if length <= THRESHOLD {
                length = 1;
                writer.literal(self.window.get(r));
                literals += 1;
            } else {
                writer.reference(found.position, length);
                references += 1;
            }

            let mut advanced = 0;
            while advanced < length {
                let Some(byte) = source.next() else {
                    break;
                };
                self.tree.delete(s);
                self.window.set(s, byte);
                s = self.window.wrap(s + 1);
                r = self.window.wrap(r + 1);
                found = self.tree.insert(&self.window, r);
                advanced += 1;
            }

            // Input is exhausted: drain what is left of the lookahead.
            while advanced < length {
                self.tree.delete(s);
                s = self.window.wrap(s + 1);
                r = self.window.wrap(r + 1);
                remaining -= 1;
                if remaining > 0 {
                    found = self.tree.insert(&self.window, r);
                }
                advanced += 1;
            }

            if remaining == 0 {
                break;
            }
        }

        let output = writer.finish();
        log::debug!(
            "lzss: compressed {} bytes to {} bytes ({} literals, {} references)",
            input.len(),
            output.len(),
            literals,
            references
        );
        output
    }
}

impl Default for LzssEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compress a buffer into a raw LZSS token stream.
///
/// Empty input yields empty output. No container header is written.
pub fn compress(input: &[u8]) -> Vec<u8> {
    LzssEncoder::new().encode(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{LzssToken, TokenReader};

    #[test]
    fn test_empty() {
        assert!(compress(b"").is_empty());
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(compress(b"a"), vec![0x01, b'a']);
    }

    #[test]
    fn test_short_literals() {
        // Nothing repeats, every token is a literal.
        assert_eq!(compress(b"xyz"), vec![0x07, b'x', b'y', b'z']);
    }

    #[test]
    fn test_leading_spaces_match_filler() {
        // The dictionary starts out as spaces, so a run of spaces is a
        // reference from the very first token.
        let tokens: Vec<LzssToken> = TokenReader::new(&compress(b"          ")).collect();

        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0], LzssToken::Reference { length: 10, .. }));
    }

    #[test]
    fn test_run_uses_overlapping_reference() {
        let tokens: Vec<LzssToken> = TokenReader::new(&compress(&[b'A'; 22])).collect();

        assert_eq!(tokens[0], LzssToken::Literal(b'A'));
        assert_eq!(
            tokens[1],
            LzssToken::Reference {
                position: INITIAL_POSITION as u16,
                length: 18,
            }
        );
        assert_eq!(
            tokens.iter().map(LzssToken::expanded_len).sum::<usize>(),
            22
        );
    }

    #[test]
    fn test_lengths_within_bounds() {
        let data = b"abcabcabcabcabcabcabcabcabcabcabcabcabcabcabcab".repeat(8);
        for token in TokenReader::new(&compress(&data)) {
            if let LzssToken::Reference { length, .. } = token {
                assert!((3..=18).contains(&length));
            }
        }
    }
}
