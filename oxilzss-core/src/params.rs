//! Parameters of the complzss LZSS bitstream.
//!
//! The format is fixed: a 4 KB window, 18-byte lookahead and a break-even
//! threshold of 2. Back-reference positions are 12-bit absolute ring
//! positions and lengths are stored in a 4-bit field biased by
//! [`MIN_MATCH`].

/// Size of the ring buffer (N). Must be a power of two.
pub const WINDOW_SIZE: usize = 1 << POSITION_BITS;

/// Mask for ring arithmetic (N - 1).
pub const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// Upper limit for a match length (F), also the lookahead size.
pub const MAX_MATCH: usize = MIN_MATCH + (1 << LENGTH_BITS) - 1;

/// Matches of this length or shorter are sent as literals.
pub const THRESHOLD: usize = 2;

/// Shortest length carried by a reference token.
pub const MIN_MATCH: usize = THRESHOLD + 1;

/// Byte used to pre-fill the dictionary before any input arrives.
pub const FILLER: u8 = b' ';

/// Ring position where the first input byte is placed (N - F).
pub const INITIAL_POSITION: usize = WINDOW_SIZE - MAX_MATCH;

/// Sentinel index for an absent tree link.
pub const NIL: usize = WINDOW_SIZE;

/// Number of tokens covered by one control byte.
pub const TOKENS_PER_GROUP: usize = 8;

/// Bits used by the position field of a reference token.
pub const POSITION_BITS: u32 = 12;

/// Bits used by the length field of a reference token.
pub const LENGTH_BITS: u32 = 4;
