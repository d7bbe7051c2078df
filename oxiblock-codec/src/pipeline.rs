//! Composition of transforms.
//!
//! A [`Pipeline`] threads one byte buffer through an ordered list of
//! [`Transform`] steps. Decoding applies each step's inverse in reverse
//! order, so `decode(encode(x)) == x` for every pipeline.
//!
//! ```
//! use oxiblock_codec::{Pipeline, Transform};
//!
//! let pipeline = Pipeline::new()
//!     .then(Transform::Bwt)
//!     .then(Transform::Mtf)
//!     .then(Transform::Huffman);
//! assert_eq!(pipeline, "bwt,mtf,huffman".parse::<Pipeline>().unwrap());
//!
//! let packed = pipeline.encode(b"banana bandana").unwrap();
//! assert_eq!(pipeline.decode(&packed).unwrap(), b"banana bandana");
//! ```

use crate::{bwt, huffman, mtf, rle};
use log::trace;
use oxiblock_core::error::{OxiBlockError, Result};
use std::fmt;
use std::str::FromStr;

/// One reversible transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Burrows-Wheeler Transform.
    Bwt,
    /// Move-to-Front Transform.
    Mtf,
    /// Huffman coding.
    Huffman,
    /// Run-Length Encoding.
    Rle,
}

impl Transform {
    /// All transforms, in id order.
    pub const ALL: [Transform; 4] = [Self::Bwt, Self::Mtf, Self::Huffman, Self::Rle];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bwt => "bwt",
            Self::Mtf => "mtf",
            Self::Huffman => "huffman",
            Self::Rle => "rle",
        }
    }

    /// Stable one-byte identifier.
    pub fn id(&self) -> u8 {
        match self {
            Self::Bwt => 1,
            Self::Mtf => 2,
            Self::Huffman => 3,
            Self::Rle => 4,
        }
    }

    /// Look up a transform by its identifier.
    pub fn from_id(id: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| OxiBlockError::unknown_transform(format!("id {}", id)))
    }

    /// Apply the forward transform.
    pub fn apply(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Bwt => bwt::transform(data),
            Self::Mtf => Ok(mtf::encode(data)),
            Self::Huffman => huffman::compress(data),
            Self::Rle => Ok(rle::encode(data)),
        }
    }

    /// Apply the inverse transform.
    pub fn invert(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Bwt => bwt::inverse_transform(data),
            Self::Mtf => Ok(mtf::decode(data)),
            Self::Huffman => huffman::expand(data),
            Self::Rle => rle::decode(data),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = OxiBlockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bwt" => Ok(Self::Bwt),
            "mtf" => Ok(Self::Mtf),
            "huffman" | "huff" => Ok(Self::Huffman),
            "rle" => Ok(Self::Rle),
            other => Err(OxiBlockError::unknown_transform(other)),
        }
    }
}

/// Sizes observed at one pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    /// The step that ran.
    pub transform: Transform,
    /// Bytes fed into the step.
    pub input_len: usize,
    /// Bytes produced by the step.
    pub output_len: usize,
}

impl StageStats {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            1.0
        } else {
            self.output_len as f64 / self.input_len as f64
        }
    }
}

/// An ordered chain of transforms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pipeline {
    steps: Vec<Transform>,
}

impl Pipeline {
    /// Create an empty pipeline (the identity).
    pub fn new() -> Self {
        Self::default()
    }

    /// BWT, then MTF, then Huffman.
    pub fn bwt_mtf_huffman() -> Self {
        Self::from(vec![Transform::Bwt, Transform::Mtf, Transform::Huffman])
    }

    /// BWT, then RLE.
    pub fn bwt_rle() -> Self {
        Self::from(vec![Transform::Bwt, Transform::Rle])
    }

    /// Append a step.
    pub fn then(mut self, step: Transform) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps in application order.
    pub fn steps(&self) -> &[Transform] {
        &self.steps
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step in order.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.encode_with_stats(data).map(|(out, _)| out)
    }

    /// Apply every step in order, recording sizes at each step.
    pub fn encode_with_stats(&self, data: &[u8]) -> Result<(Vec<u8>, Vec<StageStats>)> {
        let mut current = data.to_vec();
        let mut stats = Vec::with_capacity(self.steps.len());

        for &step in &self.steps {
            let next = step.apply(&current)?;
            trace!("{}: {} -> {} bytes", step, current.len(), next.len());
            stats.push(StageStats {
                transform: step,
                input_len: current.len(),
                output_len: next.len(),
            });
            current = next;
        }

        Ok((current, stats))
    }

    /// Apply every inverse in reverse order.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut current = data.to_vec();

        for &step in self.steps.iter().rev() {
            let next = step.invert(&current)?;
            trace!("inverse {}: {} -> {} bytes", step, current.len(), next.len());
            current = next;
        }

        Ok(current)
    }
}

impl From<Vec<Transform>> for Pipeline {
    fn from(steps: Vec<Transform>) -> Self {
        Self { steps }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("identity");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for Pipeline {
    type Err = OxiBlockError;

    /// Parse a list such as `"bwt,mtf,huffman"` or `"bwt+rle"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("identity") {
            return Ok(Self::new());
        }
        s.split([',', '+'])
            .map(str::parse::<Transform>)
            .collect::<Result<Vec<_>>>()
            .map(Self::from)
    }
}
