//! Error types for OxiBlock operations.
//!
//! Every transform either returns a complete output buffer or fails with one
//! of these errors. Nothing is retried and no partial output is returned.

use std::io;
use thiserror::Error;

/// The main error type for OxiBlock operations.
#[derive(Debug, Error)]
pub enum OxiBlockError {
    /// I/O error from the file driver.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A read on the bit buffer ran past the last stored byte.
    #[error("Out of data: attempted to read beyond byte {position} of {len}")]
    OutOfData {
        /// Read cursor at the time of the failed read.
        position: usize,
        /// Number of bytes held by the buffer.
        len: usize,
    },

    /// Input is longer than a 32-bit length header can describe.
    #[error("Input too large: {len} bytes exceeds maximum of {max}")]
    InputTooLarge {
        /// Length of the rejected input.
        len: usize,
        /// Largest supported length.
        max: usize,
    },

    /// A decoded header value is impossible for the format.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Unknown transform name or identifier.
    #[error("Unknown transform: {name}")]
    UnknownTransform {
        /// The unrecognised name or id.
        name: String,
    },

    /// Invalid magic number in a container header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid container header.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },
}

/// Result type alias for OxiBlock operations.
pub type Result<T> = std::result::Result<T, OxiBlockError>;

impl OxiBlockError {
    /// Create an out-of-data error.
    pub fn out_of_data(position: usize, len: usize) -> Self {
        Self::OutOfData { position, len }
    }

    /// Create an input-too-large error.
    pub fn input_too_large(len: usize, max: usize) -> Self {
        Self::InputTooLarge { len, max }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an unknown transform error.
    pub fn unknown_transform(name: impl Into<String>) -> Self {
        Self::UnknownTransform { name: name.into() }
    }

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

    /// Whether this error was caused by truncated input.
    pub fn is_out_of_data(&self) -> bool {
        matches!(self, Self::OutOfData { .. })
    }
}
