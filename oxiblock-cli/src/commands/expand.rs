//! Expand command implementation.

use crate::container::Header;
use crate::utils::expanded_path;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_expand(input: &Path, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| expanded_path(input));
    let data = fs::read(input)?;

    let (header, payload) = Header::parse(&data)?;
    info!(
        "Expanding {} (version {}, {})",
        input.display(),
        header.version,
        header.pipeline
    );
    let expanded = header.pipeline.decode(payload)?;
    fs::write(&output, &expanded)?;

    println!(
        "{} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        data.len(),
        expanded.len()
    );

    Ok(())
}
