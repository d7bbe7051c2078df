//! Move-to-Front Transform.
//!
//! MTF replaces each byte with its position in a 256-entry recency list and
//! then moves that byte to the front of the list. After a BWT, local byte
//! clusters become long runs of small values.

use log::debug;
use oxiblock_core::BitBuffer;

/// Identity permutation of all byte values.
fn identity_list() -> [u8; 256] {
    std::array::from_fn(|i| i as u8)
}

/// Move `list[pos]` to the front, shifting the entries before it right by one.
#[inline]
fn move_to_front(list: &mut [u8; 256], pos: usize) {
    if pos > 0 {
        list[..=pos].rotate_right(1);
    }
}

/// Perform Move-to-Front encoding.
///
/// The output has the same length as the input.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut list = identity_list();
    let mut out = BitBuffer::with_capacity(data.len());

    for &byte in data {
        // The list is a permutation of 0-255, so every byte is present.
        let pos = list.iter().position(|&b| b == byte).unwrap_or_default();
        out.write_byte(pos as u8);
        move_to_front(&mut list, pos);
    }

    debug!("mtf encode: {} bytes", data.len());
    out.into_vec()
}

/// Perform Move-to-Front decoding.
///
/// Reverses [`encode`] exactly when started from the same identity list.
pub fn decode(data: &[u8]) -> Vec<u8> {
    let mut list = identity_list();
    let mut out = BitBuffer::with_capacity(data.len());

    for &pos in data {
        let byte = list[pos as usize];
        out.write_byte(byte);
        move_to_front(&mut list, pos as usize);
    }

    debug!("mtf decode: {} bytes", data.len());
    out.into_vec()
}
