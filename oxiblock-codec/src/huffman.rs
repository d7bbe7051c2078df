//! Huffman coding with an embedded tree.
//!
//! The encoder builds a tree from byte frequencies, serializes its shape into
//! the output, and then writes each input byte's code. The decoder reads the
//! same shape back, so tie-breaking during construction never has to match.
//!
//! Output layout:
//! - 4-byte big-endian count of original bytes
//! - tree, depth-first: `1` + 8-bit value for a leaf, `0` then left and right
//!   subtrees for an internal node
//! - code bits of every input byte, in input order
//! - zero padding to the next byte boundary

use crate::LENGTH_LIMIT;
use log::debug;
use oxiblock_core::BitBuffer;
use oxiblock_core::error::{OxiBlockError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Weight stored on nodes read back from a stream.
pub const UNWEIGHTED: u64 = 0;

/// Deepest tree a stream may describe (256 leaves in a chain).
pub const MAX_TREE_DEPTH: usize = 256;

/// Node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A single byte value.
    Leaf {
        /// The byte this leaf decodes to.
        symbol: u8,
        /// Occurrence count at build time, [`UNWEIGHTED`] once parsed.
        frequency: u64,
    },
    /// Two owned subtrees.
    Internal {
        /// Sum of both children's frequencies.
        frequency: u64,
        /// Subtree reached by a `0` bit.
        left: Box<HuffmanNode>,
        /// Subtree reached by a `1` bit.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Frequency recorded on this node.
    pub fn frequency(&self) -> u64 {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Build a tree from 256 byte frequencies.
    ///
    /// Returns `None` when every frequency is zero. Equal frequencies are
    /// dequeued in insertion order: leaves by byte value, then merged nodes
    /// in creation order.
    pub fn build(frequencies: &[u64; 256]) -> Option<Self> {
        let mut heap = BinaryHeap::new();
        let mut order = 0usize;
        // Nodes live in `pool`; the heap carries (weight, order, slot).
        let mut pool: Vec<Option<HuffmanNode>> = Vec::new();

        for (symbol, &frequency) in frequencies.iter().enumerate() {
            if frequency > 0 {
                pool.push(Some(Self::Leaf {
                    symbol: symbol as u8,
                    frequency,
                }));
                heap.push(Reverse((frequency, order, pool.len() - 1)));
                order += 1;
            }
        }

        while heap.len() > 1 {
            let (Some(Reverse((_, _, l))), Some(Reverse((_, _, r)))) = (heap.pop(), heap.pop())
            else {
                break;
            };
            let left = pool[l].take()?;
            let right = pool[r].take()?;

            let parent = Self::Internal {
                frequency: left.frequency() + right.frequency(),
                left: Box::new(left),
                right: Box::new(right),
            };
            let weight = parent.frequency();
            pool.push(Some(parent));
            heap.push(Reverse((weight, order, pool.len() - 1)));
            order += 1;
        }

        let Reverse((_, _, root)) = heap.pop()?;
        pool[root].take()
    }

    /// Serialize the tree shape depth-first.
    pub fn write(&self, out: &mut BitBuffer) {
        match self {
            Self::Leaf { symbol, .. } => {
                out.write_bit(true);
                out.write_byte(*symbol);
            }
            Self::Internal { left, right, .. } => {
                out.write_bit(false);
                left.write(out);
                right.write(out);
            }
        }
    }

    /// Parse a tree written by [`write`](Self::write).
    pub fn read(input: &mut BitBuffer) -> Result<Self> {
        Self::read_at_depth(input, 0)
    }

    fn read_at_depth(input: &mut BitBuffer, depth: usize) -> Result<Self> {
        if depth > MAX_TREE_DEPTH {
            return Err(OxiBlockError::corrupted(
                input.position() as u64,
                "Huffman tree deeper than 256 levels",
            ));
        }

        if input.read_bit()? {
            return Ok(Self::Leaf {
                symbol: input.read_byte()?,
                frequency: UNWEIGHTED,
            });
        }

        let left = Self::read_at_depth(input, depth + 1)?;
        let right = Self::read_at_depth(input, depth + 1)?;
        Ok(Self::Internal {
            frequency: UNWEIGHTED,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Walk from this node to a leaf, reading one bit per internal node.
    ///
    /// A leaf root consumes no bits.
    pub fn decode_symbol(&self, input: &mut BitBuffer) -> Result<u8> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { symbol, .. } => return Ok(*symbol),
                Self::Internal { left, right, .. } => {
                    node = if input.read_bit()? { right } else { left };
                }
            }
        }
    }
}

/// Bit strings for every byte value, derived from a tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Vec<bool>>>,
}

impl CodeTable {
    /// Derive codes by a depth-first walk: `0` to the left, `1` to the right.
    ///
    /// A leaf root gets the empty code.
    pub fn from_tree(root: &HuffmanNode) -> Self {
        let mut codes = vec![None; 256];
        let mut path = Vec::new();
        Self::assign(root, &mut path, &mut codes);
        Self { codes }
    }

    fn assign(node: &HuffmanNode, path: &mut Vec<bool>, codes: &mut [Option<Vec<bool>>]) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                codes[*symbol as usize] = Some(path.clone());
            }
            HuffmanNode::Internal { left, right, .. } => {
                path.push(false);
                Self::assign(left, path, codes);
                path.pop();
                path.push(true);
                Self::assign(right, path, codes);
                path.pop();
            }
        }
    }

    /// Code for `symbol`, if the tree contains it.
    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }
}

/// Count occurrences of each byte value.
pub fn frequencies(data: &[u8]) -> [u64; 256] {
    let mut freqs = [0u64; 256];
    for &byte in data {
        freqs[byte as usize] += 1;
    }
    freqs
}

/// Compress `data` with a tree built from its own byte frequencies.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > LENGTH_LIMIT {
        return Err(OxiBlockError::input_too_large(data.len(), LENGTH_LIMIT));
    }

    let mut out = BitBuffer::with_capacity(data.len() / 2 + 8);
    out.write_int(data.len() as i32);

    let Some(root) = HuffmanNode::build(&frequencies(data)) else {
        debug!("huffman compress: empty input");
        return Ok(out.into_vec());
    };

    root.write(&mut out);

    let table = CodeTable::from_tree(&root);
    for &byte in data {
        // Every input byte has a leaf since the tree was built from this data.
        for &bit in table.get(byte).unwrap_or_default() {
            out.write_bit(bit);
        }
    }

    out.flush();
    debug!(
        "huffman compress: {} bytes, {} symbols -> {} bytes",
        data.len(),
        root.leaf_count(),
        out.len()
    );
    Ok(out.into_vec())
}

/// Expand data produced by [`compress`].
pub fn expand(input: &[u8]) -> Result<Vec<u8>> {
    let mut buf = BitBuffer::from(input);
    let length = buf.read_int()?;
    let length = usize::try_from(length)
        .map_err(|_| OxiBlockError::corrupted(0, format!("negative Huffman length {}", length)))?;

    if length == 0 {
        return Ok(Vec::new());
    }

    let root = HuffmanNode::read(&mut buf)?;

    // Untrusted length: only a single-leaf tree decodes more symbols than bits.
    let mut out = BitBuffer::with_capacity(length.min(input.len().saturating_mul(8)));
    for _ in 0..length {
        out.write_byte(root.decode_symbol(&mut buf)?);
    }

    debug!(
        "huffman expand: {} symbols -> {} bytes",
        root.leaf_count(),
        length
    );
    Ok(out.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8) -> HuffmanNode {
        HuffmanNode::Leaf {
            symbol,
            frequency: UNWEIGHTED,
        }
    }

    #[test]
    fn test_build_empty() {
        assert!(HuffmanNode::build(&[0; 256]).is_none());
    }

    #[test]
    fn test_build_frequencies_sum() {
        let root = HuffmanNode::build(&frequencies(b"abracadabra")).unwrap();
        assert_eq!(root.frequency(), 11);
        assert_eq!(root.leaf_count(), 5);
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let mut data = vec![b'a'; 100];
        data.extend_from_slice(&[b'b'; 10]);
        data.extend_from_slice(b"cd");
        let root = HuffmanNode::build(&frequencies(&data)).unwrap();
        let table = CodeTable::from_tree(&root);

        assert_eq!(table.get(b'a').unwrap().len(), 1);
        assert!(table.get(b'd').unwrap().len() > table.get(b'b').unwrap().len());
        assert!(table.get(b'z').is_none());
    }

    #[test]
    fn test_single_leaf_has_empty_code() {
        let root = HuffmanNode::build(&frequencies(&[0x41; 10])).unwrap();
        assert!(root.is_leaf());
        assert_eq!(CodeTable::from_tree(&root).get(0x41), Some(&[][..]));
    }

    #[test]
    fn test_tree_serialization() {
        let tree = HuffmanNode::Internal {
            frequency: UNWEIGHTED,
            left: Box::new(leaf(0xFF)),
            right: Box::new(leaf(0x00)),
        };

        let mut buf = BitBuffer::new();
        tree.write(&mut buf);
        buf.flush();
        // 0, 1 11111111, 1 00000000 -> 0111 1111 1110 0000 0000 (padded)
        assert_eq!(buf.as_slice(), &[0x7F, 0xE0, 0x00]);

        buf.reset_position();
        assert_eq!(HuffmanNode::read(&mut buf).unwrap(), tree);
    }

    #[test]
    fn test_code_table_paths() {
        let tree = HuffmanNode::Internal {
            frequency: UNWEIGHTED,
            left: Box::new(leaf(b'x')),
            right: Box::new(HuffmanNode::Internal {
                frequency: UNWEIGHTED,
                left: Box::new(leaf(b'y')),
                right: Box::new(leaf(b'z')),
            }),
        };
        let table = CodeTable::from_tree(&tree);
        assert_eq!(table.get(b'x'), Some(&[false][..]));
        assert_eq!(table.get(b'y'), Some(&[true, false][..]));
        assert_eq!(table.get(b'z'), Some(&[true, true][..]));
    }

    #[test]
    fn test_compress_empty() {
        let compressed = compress(b"").unwrap();
        assert_eq!(compressed, vec![0, 0, 0, 0]);
        assert!(expand(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_roundtrip() {
        let data = vec![0x41u8; 100];
        let compressed = compress(&data).unwrap();
        // Length, then a one-leaf tree (9 bits) padded to two bytes; no code bits.
        assert_eq!(compressed, vec![0, 0, 0, 100, 0xA0, 0x80]);
        assert_eq!(expand(&compressed).unwrap(), data);
    }

    #[test]
    fn test_roundtrip() {
        let test_cases = [
            b"a".as_slice(),
            b"ab",
            b"hello world",
            b"abracadabra",
            b"mississippi river",
            b"the quick brown fox jumps over the lazy dog",
        ];

        for data in test_cases {
            let compressed = compress(data).unwrap();
            assert_eq!(expand(&compressed).unwrap(), data, "Failed for: {:?}", data);
        }
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let compressed = compress(&data).unwrap();
        assert_eq!(expand(&compressed).unwrap(), data);
    }

    #[test]
    fn test_skewed_data_compresses() {
        let mut data = vec![0u8; 4000];
        data.extend((0..100).map(|i| (i % 7) as u8 + 1));
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len() / 4);
    }

    #[test]
    fn test_expand_truncated() {
        let compressed = compress(b"abracadabra").unwrap();
        let err = expand(&compressed[..compressed.len() - 2]).unwrap_err();
        assert!(err.is_out_of_data());
    }

    #[test]
    fn test_expand_negative_length() {
        let err = expand(&[0x80, 0, 0, 0, 0xA0, 0x80]).unwrap_err();
        assert!(matches!(err, OxiBlockError::CorruptedData { .. }));
    }

    #[test]
    fn test_expand_runaway_tree() {
        // Length 1 followed by nothing but internal-node bits.
        let mut input = vec![0, 0, 0, 1];
        input.extend_from_slice(&[0u8; 64]);
        let err = expand(&input).unwrap_err();
        assert!(matches!(err, OxiBlockError::CorruptedData { .. }));
    }
}
