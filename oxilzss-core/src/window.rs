//! Sliding window buffer for LZSS compression and decompression.
//!
//! The window is a circular buffer of `capacity` bytes followed by a mirror
//! of its first `lookahead - 1` bytes. Any write that lands in the head of
//! the ring is duplicated into the mirror, so a full lookahead key can be
//! borrowed as one contiguous slice from every ring position without
//! special-casing the wrap.
//!
//! ```text
//!  0                       capacity - lookahead      capacity     capacity + lookahead - 1
//!  ├── filler (initial) ──────────┼── first input ───────┼── mirror of [0, lookahead-1) ──┤
//! ```

use crate::params::{FILLER, MAX_MATCH, WINDOW_SIZE};

/// A ring buffer with a mirrored tail, shared in shape by the encoder and
/// the decoder.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    /// Ring storage followed by the mirror region.
    buffer: Vec<u8>,
    /// Ring capacity (must be power of 2).
    capacity: usize,
    /// Lookahead length; the mirror holds `lookahead - 1` bytes.
    lookahead: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
}

impl WindowBuffer {
    /// Create a new window buffer.
    ///
    /// Positions `[0, capacity - lookahead)` are pre-filled with `filler`;
    /// the rest of the ring and the mirror start zeroed.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of 2, or if `lookahead` is zero or
    /// not smaller than `capacity`.
    pub fn new(capacity: usize, lookahead: usize, filler: u8) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "Capacity must be a power of 2, got {}",
            capacity
        );
        assert!(
            lookahead > 0 && lookahead < capacity,
            "Lookahead must be in 1..{}, got {}",
            capacity,
            lookahead
        );

        let mut buffer = vec![0; capacity + lookahead - 1];
        buffer[..capacity - lookahead].fill(filler);

        Self {
            buffer,
            capacity,
            lookahead,
            mask: capacity - 1,
        }
    }

    /// Create the window used by the complzss format (4 KB ring, 18-byte
    /// lookahead, space filler).
    pub fn standard() -> Self {
        Self::new(WINDOW_SIZE, MAX_MATCH, FILLER)
    }

    /// Reduce a position to the ring.
    #[inline]
    pub fn wrap(&self, pos: usize) -> usize {
        pos & self.mask
    }

    /// Read the byte at a ring position.
    #[inline]
    pub fn get(&self, pos: usize) -> u8 {
        self.buffer[pos & self.mask]
    }

    /// Write a byte at a ring position, keeping the mirror in sync.
    #[inline]
    pub fn set(&mut self, pos: usize, byte: u8) {
        let pos = pos & self.mask;
        self.buffer[pos] = byte;
        if pos < self.lookahead - 1 {
            self.buffer[pos + self.capacity] = byte;
        }
    }

    /// Borrow the `lookahead` bytes starting at a ring position.
    #[inline]
    pub fn key(&self, pos: usize) -> &[u8] {
        let pos = pos & self.mask;
        &self.buffer[pos..pos + self.lookahead]
    }
}

impl Default for WindowBuffer {
    fn default() -> Self {
        Self::standard()
    }
}
