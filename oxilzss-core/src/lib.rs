//! # OxiLZSS Core
//!
//! Core components for the OxiLZSS compression library.
//!
//! This crate provides the building blocks shared by the codec and the
//! container layers:
//!
//! - [`window`]: Sliding window buffer with a mirrored tail for key comparison
//! - [`params`]: Fixed parameters of the LZSS bitstream format
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiLZSS is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     oxilzss binary                                      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     complzss header parsing and writing                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Match tree, token stream, encoder, decoder          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     WindowBuffer, parameters, errors                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxilzss_core::WindowBuffer;
//! use oxilzss_core::params::{FILLER, INITIAL_POSITION};
//!
//! let mut window = WindowBuffer::standard();
//! assert_eq!(window.get(0), FILLER);
//!
//! window.set(INITIAL_POSITION, b'A');
//! assert_eq!(window.get(INITIAL_POSITION), b'A');
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod error;
pub mod params;
pub mod window;

// Re-exports for convenience
pub use error::{LzssError, Result};
pub use window::WindowBuffer;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{LzssError, Result};
    pub use crate::params::*;
    pub use crate::window::WindowBuffer;
}
