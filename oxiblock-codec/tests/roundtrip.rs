//! Round-trip tests for every transform and pipeline.

use oxiblock_codec::{Pipeline, Transform, bwt, huffman, mtf, rle};

/// Reproducible pseudo-random bytes.
fn random_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect()
}

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. ";
    text.iter().copied().cycle().take(size).collect()
}

fn samples() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        vec![0],
        vec![0xFF],
        b"banana".to_vec(),
        b"mississippi".to_vec(),
        vec![0x41; 100],
        vec![0; 1000],
        (0..=255u8).collect(),
        text_like(3000),
        random_bytes(2048, 7),
        random_bytes(333, 0xDEADBEEF),
    ]
}

#[test]
fn test_mtf_roundtrip() {
    for data in samples() {
        assert_eq!(mtf::decode(&mtf::encode(&data)), data);
    }
}

#[test]
fn test_rle_roundtrip() {
    for data in samples() {
        assert_eq!(rle::decode(&rle::encode(&data)).unwrap(), data);
    }
}

#[test]
fn test_bwt_roundtrip() {
    for data in samples() {
        let encoded = bwt::transform(&data).unwrap();
        assert_eq!(bwt::inverse_transform(&encoded).unwrap(), data);
    }
}

#[test]
fn test_huffman_roundtrip() {
    for data in samples() {
        let compressed = huffman::compress(&data).unwrap();
        assert_eq!(huffman::expand(&compressed).unwrap(), data);
    }
}

#[test]
fn test_full_chain_by_hand() {
    let data = text_like(5000);
    let packed = huffman::compress(&mtf::encode(&bwt::transform(&data).unwrap())).unwrap();
    let unpacked =
        bwt::inverse_transform(&mtf::decode(&huffman::expand(&packed).unwrap())).unwrap();
    assert_eq!(unpacked, data);
    assert!(packed.len() < data.len() / 4);
}

#[test]
fn test_bwt_rle_chain_by_hand() {
    let data = text_like(5000);
    let packed = rle::encode(&bwt::transform(&data).unwrap());
    let unpacked = bwt::inverse_transform(&rle::decode(&packed).unwrap()).unwrap();
    assert_eq!(unpacked, data);
    assert!(packed.len() < data.len());
}

#[test]
fn test_every_two_step_pipeline() {
    let data = text_like(1500);
    for first in Transform::ALL {
        for second in Transform::ALL {
            let pipeline = Pipeline::new().then(first).then(second);
            let packed = pipeline.encode(&data).unwrap();
            assert_eq!(pipeline.decode(&packed).unwrap(), data, "{}", pipeline);
        }
    }
}

#[test]
fn test_long_pipeline() {
    let pipeline: Pipeline = "rle,bwt,mtf,rle,huffman".parse().unwrap();
    for data in samples() {
        let packed = pipeline.encode(&data).unwrap();
        assert_eq!(pipeline.decode(&packed).unwrap(), data);
    }
}

#[test]
fn test_empty_input_formats() {
    assert_eq!(bwt::transform(b"").unwrap(), vec![0, 0, 0, 0]);
    assert_eq!(huffman::compress(b"").unwrap(), vec![0, 0, 0, 0]);
    assert!(mtf::encode(b"").is_empty());
    assert!(rle::encode(b"").is_empty());
}
