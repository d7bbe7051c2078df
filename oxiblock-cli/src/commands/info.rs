//! Info command implementation.

use crate::container::Header;
use std::fs;
use std::path::Path;

pub fn cmd_info(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;
    let (header, payload) = Header::parse(&data)?;

    println!("File Information");
    println!("================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", data.len());
    println!("Version: {}", header.version);
    println!("Pipeline: {}", header.pipeline);
    println!("Steps: {}", header.pipeline.steps().len());
    println!("Header size: {} bytes", header.encoded_len());
    println!("Payload size: {} bytes", payload.len());

    Ok(())
}
