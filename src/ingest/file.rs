//! Recorded landmark source.
//!
//! Reads a JSON-lines recording, one frame per line:
//!
//! ```text
//! # comment lines and blank lines are skipped
//! null                                  <- no body in this frame
//! [[0.51, 0.20, 0.99], [0.52, 0.18, 0.98], ...]   <- [x, y, visibility] per landmark
//! ```
//!
//! Frames that are present but incomplete are reported as `Capture::NoBody`.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use super::{Capture, LandmarkSource, SourceStats};
use crate::landmark::{Landmark, LandmarkSample};

/// Configuration for a recorded source.
#[derive(Clone, Debug)]
pub struct FileConfig {
    /// Local recording path.
    pub path: PathBuf,
    /// Start over from the first frame at end of file.
    pub looping: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            looping: false,
        }
    }
}

pub struct FileSource {
    config: FileConfig,
    frames: Vec<Option<LandmarkSample>>,
    cursor: usize,
    captures: u64,
    bodies: u64,
}

impl FileSource {
    pub fn new(config: FileConfig) -> Result<Self> {
        if config.path.as_os_str().is_empty() {
            return Err(anyhow!("file source requires a recording path"));
        }
        Ok(Self {
            config,
            frames: Vec::new(),
            cursor: 0,
            captures: 0,
            bodies: 0,
        })
    }

    /// Number of frames loaded by `connect`.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for FileSource {
    fn connect(&mut self) -> Result<()> {
        let raw = std::fs::read_to_string(&self.config.path)
            .with_context(|| format!("failed to read recording {}", self.config.path.display()))?;
        self.frames = parse_recording(&raw)
            .with_context(|| format!("invalid recording {}", self.config.path.display()))?;
        self.cursor = 0;
        log::info!(
            "FileSource: connected to {} ({} frames)",
            self.config.path.display(),
            self.frames.len()
        );
        Ok(())
    }

    fn next_capture(&mut self) -> Result<Capture> {
        if self.cursor >= self.frames.len() {
            if !self.config.looping || self.frames.is_empty() {
                return Ok(Capture::Ended);
            }
            self.cursor = 0;
        }
        let frame = self.frames[self.cursor].clone();
        self.cursor += 1;
        self.captures += 1;
        Ok(match frame {
            Some(sample) => {
                self.bodies += 1;
                Capture::Body(sample)
            }
            None => Capture::NoBody,
        })
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            captures: self.captures,
            bodies: self.bodies,
            source: self.config.path.display().to_string(),
        }
    }
}

/// Parse one recording line. `Ok(None)` is a frame without a (complete) body.
pub fn parse_sample_line(line: &str) -> Result<Option<LandmarkSample>> {
    let points: Option<Vec<[f32; 3]>> =
        serde_json::from_str(line.trim()).context("expected null or [[x, y, visibility], ...]")?;
    let Some(points) = points else {
        return Ok(None);
    };
    let count = points.len();
    let sample = LandmarkSample::from_points(points.into_iter().map(Landmark::from).collect());
    if sample.is_none() {
        log::debug!("incomplete landmark frame ({} points) treated as no body", count);
    }
    Ok(sample)
}

/// Parse a whole recording, skipping blank and `#` comment lines.
pub fn parse_recording(raw: &str) -> Result<Vec<Option<LandmarkSample>>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| parse_sample_line(line).with_context(|| format!("line {}", idx + 1)))
        .collect()
}
