//! Run-Length Encoding with packed block headers.
//!
//! The input is split into blocks. A repeating block stores one byte and a
//! count; a literal block stores its bytes verbatim. Each block starts with a
//! 1- or 2-byte header:
//!
//! ```text
//! small: [R 0 c5 c4 c3 c2 c1 c0]                    count 0-63
//! large: [R 1 c13 .. c8] [c7 .. c0]                 count 0-16383
//! ```
//!
//! `R` marks a repeating run. Only runs longer than two bytes are stored as
//! repeating blocks; shorter ones are cheaper as literals.

use log::debug;
use oxiblock_core::BitBuffer;
use oxiblock_core::error::Result;

/// Largest count that fits a 1-byte header (6 bits).
pub const MAX_SMALL_BLOCK: usize = 63;

/// Largest count that fits a 2-byte header (14 bits).
pub const MAX_LARGE_BLOCK: usize = 16383;

/// Header flag for a repeating run.
pub const REPEATING_RUN_FLAG: u8 = 0x80;

/// Header flag for a 2-byte header.
pub const LARGE_BLOCK_FLAG: u8 = 0x40;

/// Shortest run stored as a repeating block.
pub const MIN_REPEATING_RUN: usize = 3;

/// A span of the input described by one header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    start: usize,
    count: usize,
    repeating: bool,
}

/// Append blocks covering `start..start + len`, at most [`MAX_LARGE_BLOCK`] each.
fn push_blocks(blocks: &mut Vec<Block>, mut start: usize, mut len: usize, repeating: bool) {
    while len > 0 {
        let count = len.min(MAX_LARGE_BLOCK);
        blocks.push(Block {
            start,
            count,
            repeating,
        });
        start += count;
        len -= count;
    }
}

/// Split `data` into repeating and literal blocks.
fn plan_blocks(data: &[u8]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let mut end = i + 1;
        while end < data.len() && data[end] == byte {
            end += 1;
        }

        if end - i >= MIN_REPEATING_RUN {
            push_blocks(&mut blocks, literal_start, i - literal_start, false);
            push_blocks(&mut blocks, i, end - i, true);
            literal_start = end;
        }
        i = end;
    }
    push_blocks(&mut blocks, literal_start, data.len() - literal_start, false);

    blocks
}

fn write_header(out: &mut BitBuffer, block: &Block) {
    let flag = if block.repeating {
        REPEATING_RUN_FLAG
    } else {
        0
    };

    if block.count > MAX_SMALL_BLOCK {
        out.write_byte(((block.count >> 8) as u8 & 0x3F) | LARGE_BLOCK_FLAG | flag);
        out.write_byte((block.count & 0xFF) as u8);
    } else {
        out.write_byte(block.count as u8 | flag);
    }
}

/// Run-length encode `data`.
///
/// Empty input produces no blocks.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let blocks = plan_blocks(data);
    let mut out = BitBuffer::with_capacity(data.len() + data.len() / MAX_SMALL_BLOCK + 1);

    for block in &blocks {
        write_header(&mut out, block);
        if block.repeating {
            out.write_byte(data[block.start]);
        } else {
            out.write_bytes(&data[block.start..block.start + block.count]);
        }
    }

    debug!(
        "rle encode: {} bytes -> {} blocks, {} bytes",
        data.len(),
        blocks.len(),
        out.len()
    );
    out.into_vec()
}

/// Decode data produced by [`encode`].
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut buf = BitBuffer::from(input);
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut blocks = 0usize;

    while !buf.is_end_of_data() {
        let header = buf.read_byte()?;
        let repeating = header & REPEATING_RUN_FLAG != 0;
        let mut count = (header & 0x3F) as usize;
        if header & LARGE_BLOCK_FLAG != 0 {
            count = (count << 8) | buf.read_byte()? as usize;
        }

        if repeating {
            let value = buf.read_byte()?;
            out.resize(out.len() + count, value);
        } else {
            let start = out.len();
            out.resize(start + count, 0);
            buf.read_bytes(&mut out[start..])?;
        }
        blocks += 1;
    }

    debug!("rle decode: {} blocks -> {} bytes", blocks, out.len());
    Ok(out)
}
