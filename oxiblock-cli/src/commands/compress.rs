//! Compress command implementation.

use crate::container::Header;
use crate::utils::{compressed_path, create_progress_bar, space_savings};
use log::{debug, info};
use oxiblock_codec::Pipeline;
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_compress(
    input: &Path,
    output: Option<PathBuf>,
    pipeline: &Pipeline,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| compressed_path(input));
    let data = fs::read(input)?;

    info!("Compressing {} with {}", input.display(), pipeline);
    let mut packed = Header::new(pipeline.clone()).to_bytes()?;

    let pb = create_progress_bar(pipeline.steps().len() as u64, progress);
    let mut payload = data.clone();
    for &step in pipeline.steps() {
        pb.set_message(step.name());
        let next = step.apply(&payload)?;
        debug!("  {:<8} {:>10} -> {:>10} bytes", step, payload.len(), next.len());
        payload = next;
        pb.inc(1);
    }
    pb.finish_and_clear();

    packed.extend_from_slice(&payload);
    fs::write(&output, &packed)?;

    println!(
        "{} -> {} ({} -> {} bytes, {:.1}% saved)",
        input.display(),
        output.display(),
        data.len(),
        packed.len(),
        space_savings(data.len(), packed.len())
    );

    Ok(())
}
