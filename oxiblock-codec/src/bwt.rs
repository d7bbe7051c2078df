//! Burrows-Wheeler Transform.
//!
//! The BWT is a reversible permutation that sorts every cyclic rotation of
//! the input and keeps the last byte of each, grouping similar bytes
//! together.
//!
//! Output layout: a 4-byte big-endian start index followed by `n` bytes of
//! the last column.

use crate::LENGTH_LIMIT;
use log::debug;
use oxiblock_core::BitBuffer;
use oxiblock_core::error::{OxiBlockError, Result};
use std::cmp::Ordering;

/// Length of the start index header.
pub const HEADER_LEN: usize = 4;

/// Compare the cyclic rotations starting at `a` and `b`, from byte `from`.
#[inline]
fn compare_rotations(data: &[u8], a: usize, b: usize, from: usize) -> Ordering {
    let n = data.len();
    for i in from..n {
        let byte_a = data[(a + i) % n];
        let byte_b = data[(b + i) % n];
        match byte_a.cmp(&byte_b) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Sort rotation start offsets by the rotations they denote.
fn sort_rotations(data: &[u8]) -> Vec<usize> {
    let n = data.len();
    let mut indices: Vec<usize> = (0..n).collect();

    if n > 8 {
        // Compare a 4-byte prefix key first; fall back to the full rotation on ties.
        let key_len = 4;
        let keys: Vec<u32> = (0..n)
            .map(|i| {
                (0..key_len).fold(0u32, |key, j| (key << 8) | data[(i + j) % n] as u32)
            })
            .collect();

        indices.sort_unstable_by(|&a, &b| match keys[a].cmp(&keys[b]) {
            Ordering::Equal => compare_rotations(data, a, b, key_len),
            other => other,
        });
    } else {
        indices.sort_unstable_by(|&a, &b| compare_rotations(data, a, b, 0));
    }

    indices
}

/// Perform the Burrows-Wheeler Transform.
///
/// Returns the start index header followed by the last column of the sorted
/// rotation matrix. Empty input yields only the header, with index 0.
pub fn transform(data: &[u8]) -> Result<Vec<u8>> {
    let n = data.len();
    if n > LENGTH_LIMIT {
        return Err(OxiBlockError::input_too_large(n, LENGTH_LIMIT));
    }

    let indices = sort_rotations(data);

    // The rotation starting at offset 0 is the original input.
    let start_index = indices.iter().take_while(|&&i| i != 0).count();

    let mut out = BitBuffer::with_capacity(HEADER_LEN + n);
    out.write_int(start_index as i32);
    for &rotation in &indices {
        out.write_byte(data[(rotation + n - 1) % n]);
    }

    debug!("bwt: {} bytes, start index {}", n, start_index);
    Ok(out.into_vec())
}

/// Perform the inverse Burrows-Wheeler Transform.
///
/// Reads the start index header and reconstructs the original bytes from
/// the last column.
pub fn inverse_transform(input: &[u8]) -> Result<Vec<u8>> {
    let mut buf = BitBuffer::from(input);
    let start = buf.read_int()?;
    let n = input.len() - HEADER_LEN;

    let mut column = vec![0u8; n];
    buf.read_bytes(&mut column)?;

    if n == 0 {
        return Ok(Vec::new());
    }

    let start = usize::try_from(start)
        .ok()
        .filter(|&s| s < n)
        .ok_or_else(|| {
            OxiBlockError::corrupted(0, format!("BWT start index {} outside 0..{}", start, n))
        })?;

    // Stable counting sort of (position, byte) pairs by byte: `origin[k]` is
    // the read-order position of the k-th smallest byte.
    let mut counts = [0usize; 256];
    for &byte in &column {
        counts[byte as usize] += 1;
    }

    let mut next_slot = [0usize; 256];
    let mut total = 0;
    for (slot, &count) in next_slot.iter_mut().zip(counts.iter()) {
        *slot = total;
        total += count;
    }

    let mut origin = vec![0usize; n];
    for (position, &byte) in column.iter().enumerate() {
        origin[next_slot[byte as usize]] = position;
        next_slot[byte as usize] += 1;
    }

    // Row k of the sorted list holds byte column[origin[k]]. Periodic inputs
    // split the chain into several identical cycles, so walk exactly n steps
    // rather than stopping on the first return to `start`.
    let mut result = Vec::with_capacity(n);
    let mut row = start;
    for _ in 0..n {
        result.push(column[origin[row]]);
        row = origin[row];
    }

    debug!("inverse bwt: {} bytes, start index {}", result.len(), start);
    Ok(result)
}
