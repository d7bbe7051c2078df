//! # OxiBlock Core
//!
//! Core components for the OxiBlock transform toolkit.
//!
//! This crate provides the building blocks shared by every transform:
//!
//! - [`bitbuffer`]: MSB-first bit/byte buffer used for all transform I/O
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Driver                                              │
//! │     CLI, container framing, statistics                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Transforms                                          │
//! │     BWT, MTF, Huffman, RLE, Pipeline                    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitBuffer (this crate)                              │
//! │     MSB-first bit packing, big-endian integers          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiblock_core::BitBuffer;
//!
//! let mut buf = BitBuffer::new();
//! buf.write_int(0x12345678);
//! buf.flush();
//! assert_eq!(buf.as_slice(), &[0x12, 0x34, 0x56, 0x78]);
//!
//! buf.reset_position();
//! assert_eq!(buf.read_int().unwrap(), 0x12345678);
//! assert!(buf.is_end_of_data());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitbuffer;
pub mod error;

// Re-exports for convenience
pub use bitbuffer::BitBuffer;
pub use error::{OxiBlockError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitbuffer::BitBuffer;
    pub use crate::error::{OxiBlockError, Result};
}
