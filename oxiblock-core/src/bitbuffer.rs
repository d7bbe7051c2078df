//! MSB-first bit buffer shared by every transform.
//!
//! `BitBuffer` owns a growable byte vector and two disjoint sets of state:
//! a pending byte for writing and a read cursor for reading. Bits are packed
//! starting from the most significant bit of each byte.
//!
//! A buffer is written first, then read. Writes never touch the read cursor
//! and reads never touch the pending byte; use [`BitBuffer::reset_position`]
//! to rewind before re-reading a buffer that was just written.
//!
//! # Example
//!
//! ```
//! use oxiblock_core::bitbuffer::BitBuffer;
//!
//! let mut buf = BitBuffer::new();
//! buf.write_bit(true);
//! buf.write_byte(0xAA);
//! buf.flush();
//! assert_eq!(buf.as_slice(), &[0xD5, 0x00]);
//!
//! buf.reset_position();
//! assert!(buf.read_bit().unwrap());
//! assert_eq!(buf.read_byte().unwrap(), 0xAA);
//! ```

use crate::error::{OxiBlockError, Result};
use std::ops::{Index, IndexMut};

/// Bit masks from the MSB down, indexed by bits already consumed.
const BIT_MASKS: [u8; 8] = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

/// An append-then-read byte buffer with MSB-first bit packing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    /// Completed bytes.
    data: Vec<u8>,
    /// Bits written but not yet forming a full byte (right-aligned).
    pending: u8,
    /// Number of valid bits in `pending` (0-7).
    pending_bits: u8,
    /// Index of the next byte to pull from `data`.
    position: usize,
    /// Byte currently being consumed by bit reads.
    current: u8,
    /// Unread bits remaining in `current` (0-8).
    remaining_bits: u8,
}

impl BitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of completed bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no bytes have been completed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Completed bytes. Pending bits are not included until [`flush`](Self::flush).
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Flush pending bits and return the bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.flush();
        self.data
    }

    /// Number of written bits waiting for a full byte.
    pub fn pending_bits(&self) -> u8 {
        self.pending_bits
    }

    /// Index of the next byte the reader will pull.
    pub fn position(&self) -> usize {
        self.position
    }

    fn write_and_clear_pending(&mut self) {
        if self.pending_bits > 0 {
            self.data.push(self.pending << (8 - self.pending_bits));
            self.pending = 0;
            self.pending_bits = 0;
        }
    }

    /// Append a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.pending = (self.pending << 1) | bit as u8;
        self.pending_bits += 1;

        if self.pending_bits == 8 {
            self.data.push(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }
    }

    /// Append a byte, keeping the current bit alignment.
    #[inline]
    pub fn write_byte(&mut self, value: u8) {
        if self.pending_bits == 0 {
            self.data.push(value);
            return;
        }

        for mask in BIT_MASKS {
            self.write_bit(value & mask != 0);
        }
    }

    /// Append a sequence of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.pending_bits == 0 {
            self.data.extend_from_slice(bytes);
            return;
        }

        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Append a 32-bit signed integer, big-endian.
    pub fn write_int(&mut self, value: i32) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte);
        }
    }

    /// Pad pending bits with zeros into a final byte.
    ///
    /// Must be called before treating the buffer as finished output;
    /// otherwise the last partial byte is lost.
    pub fn flush(&mut self) {
        self.write_and_clear_pending();
    }

    /// Rewind the read cursor to the first byte without touching the data.
    pub fn reset_position(&mut self) {
        self.position = 0;
        self.current = 0;
        self.remaining_bits = 0;
    }

    /// Whether every stored byte has been pulled by the reader.
    pub fn is_end_of_data(&self) -> bool {
        self.position >= self.data.len()
    }

    fn populate(&mut self) -> Result<()> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or_else(|| OxiBlockError::out_of_data(self.position, self.data.len()))?;
        self.current = byte;
        self.position += 1;
        self.remaining_bits = 8;
        Ok(())
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.remaining_bits == 0 {
            self.populate()?;
        }

        let bit = self.current & BIT_MASKS[(8 - self.remaining_bits) as usize] != 0;
        self.remaining_bits -= 1;
        Ok(bit)
    }

    /// Read a byte, splicing across a byte boundary when mid-byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.remaining_bits == 0 {
            self.populate()?;
            self.remaining_bits = 0;
            return Ok(self.current);
        }

        let held = self.remaining_bits;
        if held == 8 {
            self.remaining_bits = 0;
            return Ok(self.current);
        }

        let head = self.current << (8 - held);
        self.populate()?;
        self.remaining_bits = held;
        Ok(head | (self.current >> held))
    }

    /// Read `buf.len()` bytes.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(())
    }

    /// Read a 32-bit signed integer, big-endian.
    pub fn read_int(&mut self) -> Result<i32> {
        let mut bytes = [0u8; 4];
        self.read_bytes(&mut bytes)?;
        Ok(i32::from_be_bytes(bytes))
    }
}

impl From<Vec<u8>> for BitBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

impl From<&[u8]> for BitBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl From<BitBuffer> for Vec<u8> {
    fn from(buf: BitBuffer) -> Self {
        buf.into_vec()
    }
}

impl Index<usize> for BitBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.data[index]
    }
}

impl IndexMut<usize> for BitBuffer {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.data[index]
    }
}
