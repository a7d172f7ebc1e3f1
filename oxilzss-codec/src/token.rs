//! Token stream framing.
//!
//! The compressed stream is a sequence of groups. Each group is one control
//! byte followed by up to eight tokens; bit `i` of the control byte (LSB
//! first) is set when token `i` is a literal and clear when it is a
//! reference.
//!
//! ```text
//! literal:    [byte]
//! reference:  [pos & 0xFF] [((pos >> 4) & 0xF0) | (length - 3)]
//! ```

use oxilzss_core::params::{
    LENGTH_BITS, MAX_MATCH, MIN_MATCH, POSITION_BITS, TOKENS_PER_GROUP, WINDOW_MASK,
};

/// Low bits of a reference's second byte that hold the biased length.
const LENGTH_MASK: u8 = (1 << LENGTH_BITS) - 1;

/// Shift that moves position bits 8..12 into the high nibble of the second byte.
const HIGH_POSITION_SHIFT: u32 = POSITION_BITS - 8;

/// LZSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssToken {
    /// A literal byte.
    Literal(u8),
    /// A back-reference into the window.
    Reference {
        /// Absolute ring position where the copy starts.
        position: u16,
        /// Number of bytes to copy (3..=18).
        length: u8,
    },
}

impl LzssToken {
    /// Number of output bytes this token expands to.
    pub fn expanded_len(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Reference { length, .. } => *length as usize,
        }
    }
}

/// Packs tokens into control-byte groups.
#[derive(Debug)]
pub struct TokenWriter {
    /// Finished groups.
    output: Vec<u8>,
    /// Control byte followed by up to sixteen token bytes.
    group: [u8; 1 + 2 * TOKENS_PER_GROUP],
    /// Next free slot in `group`.
    group_len: usize,
    /// Control bit for the next token.
    mask: u8,
}

impl TokenWriter {
    /// Create a writer with an output capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            group: [0; 1 + 2 * TOKENS_PER_GROUP],
            group_len: 1,
            mask: 1,
        }
    }

    /// Append a literal byte.
    pub fn literal(&mut self, byte: u8) {
        self.group[0] |= self.mask;
        self.group[self.group_len] = byte;
        self.group_len += 1;
        self.advance();
    }

    /// Append a reference. `position` is masked to 12 bits and `length` must
    /// be in `MIN_MATCH..=MAX_MATCH`.
    pub fn reference(&mut self, position: usize, length: usize) {
        debug_assert!((MIN_MATCH..=MAX_MATCH).contains(&length));
        let position = position & WINDOW_MASK;
        self.group[self.group_len] = position as u8;
        let high = (position >> HIGH_POSITION_SHIFT) as u8 & !LENGTH_MASK;
        self.group[self.group_len + 1] = high | (length - MIN_MATCH) as u8;
        self.group_len += 2;
        self.advance();
    }

    /// Append any token.
    pub fn push(&mut self, token: LzssToken) {
        match token {
            LzssToken::Literal(byte) => self.literal(byte),
            LzssToken::Reference { position, length } => {
                self.reference(position as usize, length as usize)
            }
        }
    }

    fn advance(&mut self) {
        self.mask <<= 1;
        if self.mask == 0 {
            self.flush_group();
        }
    }

    fn flush_group(&mut self) {
        self.output.extend_from_slice(&self.group[..self.group_len]);
        self.group[0] = 0;
        self.group_len = 1;
        self.mask = 1;
    }

    /// Flush any partial group and return the stream.
    pub fn finish(mut self) -> Vec<u8> {
        if self.group_len > 1 {
            self.flush_group();
        }
        self.output
    }
}

/// Iterator over the tokens of a raw stream.
///
/// Parsing stops silently at the first token that runs out of input, the
/// same way the decoder does.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    input: &'a [u8],
    pos: usize,
    /// Control bits in the low byte, sentinel ones above them.
    flags: u16,
    control_bytes: usize,
}

impl<'a> TokenReader<'a> {
    /// Create a reader over a raw token stream.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            flags: 0,
            control_bytes: 0,
        }
    }

    /// Number of input bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of control bytes loaded so far.
    pub fn control_bytes(&self) -> usize {
        self.control_bytes
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }
}

impl Iterator for TokenReader<'_> {
    type Item = LzssToken;

    fn next(&mut self) -> Option<LzssToken> {
        self.flags >>= 1;
        if self.flags & 0x100 == 0 {
            let control = self.next_byte()?;
            self.control_bytes += 1;
            // The high byte counts down the eight tokens of the group.
            self.flags = u16::from(control) | 0xFF00;
        }

        if self.flags & 1 == 1 {
            self.next_byte().map(LzssToken::Literal)
        } else {
            let low = self.next_byte()?;
            let high = self.next_byte()?;
            let position =
                u16::from(low) | (u16::from(high & !LENGTH_MASK) << HIGH_POSITION_SHIFT);
            let length = (high & LENGTH_MASK) + MIN_MATCH as u8;
            Some(LzssToken::Reference { position, length })
        }
    }
}

/// Token counts of a raw stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Number of literal tokens.
    pub literals: usize,
    /// Number of reference tokens.
    pub references: usize,
    /// Bytes produced by references.
    pub matched_bytes: usize,
    /// Number of control bytes read.
    pub control_bytes: usize,
    /// Stream bytes consumed by complete tokens.
    pub consumed: usize,
}

impl StreamStats {
    /// Total number of bytes the stream decodes to.
    pub fn decoded_len(&self) -> usize {
        self.literals + self.matched_bytes
    }

    /// Average reference length, 0.0 when there are none.
    pub fn average_match(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.matched_bytes as f64 / self.references as f64
        }
    }
}

/// Count the tokens of a raw stream without decoding it.
pub fn inspect(input: &[u8]) -> StreamStats {
    let mut stats = StreamStats::default();
    let mut reader = TokenReader::new(input);

    while let Some(token) = reader.next() {
        match token {
            LzssToken::Literal(_) => stats.literals += 1,
            LzssToken::Reference { length, .. } => {
                stats.references += 1;
                stats.matched_bytes += length as usize;
            }
        }
        stats.consumed = reader.position();
    }
    stats.control_bytes = reader.control_bytes();

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_group() {
        let mut writer = TokenWriter::with_capacity(16);
        for &b in b"abc" {
            writer.literal(b);
        }

        assert_eq!(writer.finish(), vec![0b0000_0111, b'a', b'b', b'c']);
    }

    #[test]
    fn test_reference_packing() {
        let mut writer = TokenWriter::with_capacity(16);
        writer.literal(b'x');
        writer.reference(0xABC, 18);

        assert_eq!(writer.finish(), vec![0b0000_0001, b'x', 0xBC, 0xAF]);
    }

    #[test]
    fn test_full_group_flushes() {
        let mut writer = TokenWriter::with_capacity(32);
        for i in 0..9u8 {
            writer.literal(i);
        }

        let out = writer.finish();
        assert_eq!(out.len(), 1 + 8 + 1 + 1);
        assert_eq!(out[0], 0xFF);
        assert_eq!(out[9], 0x01);
        assert_eq!(out[10], 8);
    }

    #[test]
    fn test_empty_writer() {
        assert!(TokenWriter::with_capacity(0).finish().is_empty());
    }

    #[test]
    fn test_reader_parses_writer_output() {
        let tokens = [
            LzssToken::Literal(b'A'),
            LzssToken::Reference {
                position: 4077,
                length: 3,
            },
            LzssToken::Literal(0),
            LzssToken::Reference {
                position: 0,
                length: 18,
            },
        ];
        let mut writer = TokenWriter::with_capacity(16);
        for &token in &tokens {
            writer.push(token);
        }
        let stream = writer.finish();

        let parsed: Vec<LzssToken> = TokenReader::new(&stream).collect();
        assert_eq!(parsed, tokens);
    }

    #[test]
    fn test_reader_stops_on_truncated_reference() {
        // Control byte says "reference", but only one of its two bytes follows.
        let parsed: Vec<LzssToken> = TokenReader::new(&[0x00, 0x12]).collect();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_reader_reloads_after_eight_tokens() {
        let mut stream = vec![0xFF];
        stream.extend_from_slice(b"12345678");
        stream.push(0x01);
        stream.push(b'9');

        let parsed: Vec<LzssToken> = TokenReader::new(&stream).collect();
        assert_eq!(parsed.len(), 9);
        assert_eq!(parsed[8], LzssToken::Literal(b'9'));
    }

    #[test]
    fn test_inspect_counts() {
        let mut writer = TokenWriter::with_capacity(16);
        writer.literal(b'a');
        writer.literal(b'b');
        writer.reference(100, 5);
        let stream = writer.finish();

        let stats = inspect(&stream);
        assert_eq!(stats.literals, 2);
        assert_eq!(stats.references, 1);
        assert_eq!(stats.matched_bytes, 5);
        assert_eq!(stats.control_bytes, 1);
        assert_eq!(stats.consumed, stream.len());
        assert_eq!(stats.decoded_len(), 7);
        assert!((stats.average_match() - 5.0).abs() < f64::EPSILON);
    }
}
