//! Landmark sources.
//!
//! A source yields one `Capture` per tracker frame:
//! - recorded JSON-lines files (`file.rs`)
//! - synthetic scripted bodies for demos and tests (`stub://`, `synthetic.rs`)
//!
//! Live camera tracking lives outside this crate; a host publishes its samples straight
//! into the session's `SampleSlot`.
//!
//! Sources never judge anything. They only decide whether a frame holds a complete body.

pub mod file;
pub mod synthetic;

use anyhow::{anyhow, Result};
use std::path::PathBuf;

use crate::landmark::LandmarkSample;

pub use file::{FileConfig, FileSource};
pub use synthetic::{SyntheticConfig, SyntheticSource};

/// One tracker frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Capture {
    /// A complete body was tracked.
    Body(LandmarkSample),
    /// The frame had no (complete) body in it.
    NoBody,
    /// The source has no more frames.
    Ended,
}

impl Capture {
    /// The value to publish into a `SampleSlot`. `None` for `NoBody` and `Ended`.
    pub fn into_sample(self) -> Option<LandmarkSample> {
        match self {
            Capture::Body(sample) => Some(sample),
            Capture::NoBody | Capture::Ended => None,
        }
    }
}

/// Capture statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceStats {
    pub captures: u64,
    pub bodies: u64,
    pub source: String,
}

pub trait LandmarkSource {
    fn connect(&mut self) -> Result<()>;

    fn next_capture(&mut self) -> Result<Capture>;

    fn stats(&self) -> SourceStats;
}

/// Open a source from a URI.
///
/// - `stub://<script>` builds a `SyntheticSource` with `frames_per_step` frames per step
/// - `file://<path>` or a bare local path builds a looping `FileSource`
pub fn open_source(uri: &str, frames_per_step: u32) -> Result<Box<dyn LandmarkSource>> {
    if uri.trim().is_empty() {
        return Err(anyhow!("landmark source URI is empty"));
    }
    if uri.starts_with("stub://") {
        return Ok(Box::new(SyntheticSource::new(SyntheticConfig {
            uri: uri.to_string(),
            frames_per_step,
        })?));
    }
    let path = match uri.strip_prefix("file://") {
        Some(path) => path,
        None if uri.contains("://") => {
            return Err(anyhow!(
                "unsupported landmark source {:?} (expected stub:// or a local file)",
                uri
            ))
        }
        None => uri,
    };
    Ok(Box::new(FileSource::new(FileConfig {
        path: PathBuf::from(path),
        looping: true,
    })?))
}
