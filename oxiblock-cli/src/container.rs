//! On-disk framing for compressed files.
//!
//! ```text
//! +-------+---------+-------+-----------------+---------+
//! | "OXB" | version | count | step ids (count) | payload |
//! +-------+---------+-------+-----------------+---------+
//!   3 B      1 B      1 B        count B
//! ```
//!
//! The step ids record the pipeline that produced the payload, so a file
//! expands without the caller naming the chain again.

use oxiblock_codec::{Pipeline, Transform};
use oxiblock_core::{OxiBlockError, Result};

/// Container magic bytes.
pub const MAGIC: [u8; 3] = *b"OXB";

/// Current container version.
pub const VERSION: u8 = 1;

/// Default file extension, without the dot.
pub const EXTENSION: &str = "oxb";

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Format version.
    pub version: u8,
    /// Pipeline that produced the payload.
    pub pipeline: Pipeline,
}

impl Header {
    /// Header for the current version.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            version: VERSION,
            pipeline,
        }
    }

    /// Encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        MAGIC.len() + 2 + self.pipeline.steps().len()
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let steps = self.pipeline.steps();
        let count = u8::try_from(steps.len()).map_err(|_| {
            OxiBlockError::invalid_header(format!("too many steps: {}", steps.len()))
        })?;

        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&MAGIC);
        out.push(self.version);
        out.push(count);
        out.extend(steps.iter().map(Transform::id));
        Ok(out)
    }

    /// Parse a header from the start of `data`, returning it with the
    /// remaining payload.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < MAGIC.len() + 2 {
            return Err(OxiBlockError::invalid_header(format!(
                "file too short: {} bytes",
                data.len()
            )));
        }

        let (magic, rest) = data.split_at(MAGIC.len());
        if magic != MAGIC {
            return Err(OxiBlockError::invalid_magic(MAGIC, magic));
        }

        let version = rest[0];
        if version != VERSION {
            return Err(OxiBlockError::invalid_header(format!(
                "unsupported version {}",
                version
            )));
        }

        let count = rest[1] as usize;
        let rest = &rest[2..];
        if rest.len() < count {
            return Err(OxiBlockError::invalid_header(format!(
                "expected {} step ids, found {}",
                count,
                rest.len()
            )));
        }

        let (ids, payload) = rest.split_at(count);
        let steps = ids
            .iter()
            .map(|&id| Transform::from_id(id))
            .collect::<Result<Vec<_>>>()?;

        Ok((
            Self {
                version,
                pipeline: Pipeline::from(steps),
            },
            payload,
        ))
    }
}
