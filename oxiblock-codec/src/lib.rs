//! Block-sorting transforms for OxiBlock.
//!
//! This crate provides pure Rust implementations of four reversible byte
//! transforms, each taking a whole buffer in and returning a whole buffer:
//!
//! 1. Burrows-Wheeler Transform ([`bwt`]) - sorts cyclic rotations to cluster bytes
//! 2. Move-to-Front Transform ([`mtf`]) - turns clusters into small values
//! 3. Huffman coding ([`huffman`]) - entropy codes with an embedded tree
//! 4. Run-Length Encoding ([`rle`]) - packs runs behind 1- or 2-byte headers
//!
//! The order in which they are chained is up to the caller; [`Pipeline`]
//! offers a typed way to do it.
//!
//! ```
//! use oxiblock_codec::{bwt, huffman, mtf};
//!
//! let original = b"abracadabra";
//! let packed = huffman::compress(&mtf::encode(&bwt::transform(original).unwrap())).unwrap();
//! let unpacked = bwt::inverse_transform(&mtf::decode(&huffman::expand(&packed).unwrap())).unwrap();
//! assert_eq!(unpacked, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bwt;
pub mod huffman;
pub mod mtf;
mod pipeline;
pub mod rle;

pub use pipeline::{Pipeline, StageStats, Transform};

/// Longest input whose length fits the 32-bit signed headers.
pub const LENGTH_LIMIT: usize = i32::MAX as usize;
