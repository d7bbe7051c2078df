//! Test command implementation.
//!
//! Runs each pipeline forward and back over a file and checks that the
//! round trip reproduces the input byte for byte.

use log::{debug, warn};
use oxiblock_codec::{Pipeline, StageStats};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Result of one round trip.
#[derive(Debug, Serialize)]
struct RoundTrip {
    pipeline: String,
    original_size: usize,
    compressed_size: usize,
    stages: Vec<StageReport>,
    ok: bool,
    error: Option<String>,
}

/// Sizes at one step, in serializable form.
#[derive(Debug, Serialize)]
struct StageReport {
    transform: &'static str,
    input_size: usize,
    output_size: usize,
}

impl From<&StageStats> for StageReport {
    fn from(stats: &StageStats) -> Self {
        Self {
            transform: stats.transform.name(),
            input_size: stats.input_len,
            output_size: stats.output_len,
        }
    }
}

/// Whole-file report for `--json`.
#[derive(Debug, Serialize)]
struct TestReport {
    file: String,
    results: Vec<RoundTrip>,
    all_ok: bool,
}

fn round_trip(pipeline: &Pipeline, data: &[u8]) -> RoundTrip {
    let mut result = RoundTrip {
        pipeline: pipeline.to_string(),
        original_size: data.len(),
        compressed_size: 0,
        stages: Vec::new(),
        ok: false,
        error: None,
    };

    let (packed, stats) = match pipeline.encode_with_stats(data) {
        Ok(encoded) => encoded,
        Err(e) => {
            result.error = Some(e.to_string());
            return result;
        }
    };
    result.compressed_size = packed.len();
    result.stages = stats.iter().map(StageReport::from).collect();

    match pipeline.decode(&packed) {
        Ok(unpacked) => {
            result.ok = unpacked == data;
            if !result.ok {
                result.error = Some(format!(
                    "round trip produced {} bytes that differ from the original",
                    unpacked.len()
                ));
            }
        }
        Err(e) => result.error = Some(e.to_string()),
    }

    result
}

/// Returns `Ok(false)` when any pipeline fails its round trip.
pub fn cmd_test(
    input: &Path,
    pipelines: &[Pipeline],
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let data = fs::read(input)?;

    let mut results = Vec::with_capacity(pipelines.len());
    for pipeline in pipelines {
        debug!("Testing {} over {}", pipeline, input.display());
        let result = round_trip(pipeline, &data);
        if let Some(error) = &result.error {
            warn!("{}: {}", pipeline, error);
        }
        results.push(result);
    }
    let all_ok = results.iter().all(|r| r.ok);

    if json {
        let report = TestReport {
            file: input.display().to_string(),
            results,
            all_ok,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(all_ok);
    }

    for result in &results {
        if result.ok {
            println!(
                "Original data: {} bytes.   {} compressed data: {} bytes.",
                result.original_size, result.pipeline, result.compressed_size
            );
        } else {
            println!(
                "**** The {} decoded data does not match the original data ****",
                result.pipeline
            );
        }
        println!();
    }

    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_reports_sizes() {
        let data = b"abracadabra abracadabra abracadabra".to_vec();
        let result = round_trip(&Pipeline::bwt_mtf_huffman(), &data);

        assert!(result.ok);
        assert!(result.error.is_none());
        assert_eq!(result.pipeline, "bwt,mtf,huffman");
        assert_eq!(result.original_size, data.len());
        assert_eq!(result.stages.len(), 3);
        assert_eq!(result.stages[2].output_size, result.compressed_size);
    }

    #[test]
    fn test_report_serializes() {
        let result = round_trip(&Pipeline::bwt_rle(), b"aaaaaaaabbbbbbbb");
        let report = TestReport {
            file: "sample.txt".to_string(),
            results: vec![result],
            all_ok: true,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["file"], "sample.txt");
        assert_eq!(value["results"][0]["pipeline"], "bwt,rle");
        assert_eq!(value["results"][0]["stages"][0]["transform"], "bwt");
        assert_eq!(value["results"][0]["ok"], true);
    }
}
