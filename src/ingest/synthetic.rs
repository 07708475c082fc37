//! Synthetic landmark source (`stub://`).
//!
//! Generates canonical body shapes for a scripted sequence of poses, so the game loop can
//! run end to end without a tracker. The URI lists the script:
//!
//! - `stub://t-pose,victory-v` cycles through the named poses
//! - `idle` is a relaxed standing body that matches nothing
//! - `none` is an empty frame (no body detected)

use anyhow::{anyhow, Result};

use super::{Capture, LandmarkSource, SourceStats};
use crate::catalog::PoseKind;
use crate::landmark::{Landmark, LandmarkIndex as L, LandmarkSample, LANDMARK_COUNT};

const VISIBLE: f32 = 0.99;

/// Joint positions for one generated body.
#[derive(Clone, Copy)]
struct Skeleton {
    nose: (f32, f32),
    left_shoulder: (f32, f32),
    right_shoulder: (f32, f32),
    left_elbow: (f32, f32),
    right_elbow: (f32, f32),
    left_wrist: (f32, f32),
    right_wrist: (f32, f32),
    left_hip: (f32, f32),
    right_hip: (f32, f32),
}

// Standing straight, arms hanging well below the hips.
const IDLE: Skeleton = Skeleton {
    nose: (0.50, 0.20),
    left_shoulder: (0.40, 0.35),
    right_shoulder: (0.60, 0.35),
    left_elbow: (0.36, 0.62),
    right_elbow: (0.64, 0.62),
    left_wrist: (0.36, 0.90),
    right_wrist: (0.64, 0.90),
    left_hip: (0.44, 0.65),
    right_hip: (0.56, 0.65),
};

impl Skeleton {
    fn for_kind(kind: PoseKind) -> Self {
        match kind {
            PoseKind::TPose => Skeleton {
                left_elbow: (0.25, 0.35),
                right_elbow: (0.75, 0.35),
                left_wrist: (0.10, 0.36),
                right_wrist: (0.90, 0.34),
                ..IDLE
            },
            PoseKind::VictoryV => Skeleton {
                left_elbow: (0.32, 0.20),
                right_elbow: (0.68, 0.20),
                left_wrist: (0.25, 0.05),
                right_wrist: (0.75, 0.05),
                ..IDLE
            },
            PoseKind::HandsOnHips => Skeleton {
                left_elbow: (0.30, 0.52),
                right_elbow: (0.70, 0.52),
                left_wrist: (0.42, 0.66),
                right_wrist: (0.58, 0.66),
                ..IDLE
            },
            PoseKind::HandsOnHead => Skeleton {
                left_elbow: (0.30, 0.22),
                right_elbow: (0.70, 0.22),
                left_wrist: (0.45, 0.17),
                right_wrist: (0.55, 0.17),
                ..IDLE
            },
            PoseKind::RightArmUp => Skeleton {
                right_elbow: (0.62, 0.18),
                right_wrist: (0.62, 0.02),
                ..IDLE
            },
            PoseKind::ArmsCrossed => Skeleton {
                left_elbow: (0.34, 0.50),
                right_elbow: (0.66, 0.50),
                left_wrist: (0.58, 0.45),
                right_wrist: (0.42, 0.45),
                ..IDLE
            },
            PoseKind::Unknown => IDLE,
        }
    }

    fn into_sample(self) -> LandmarkSample {
        let at = |(x, y): (f32, f32)| Landmark::new(x, y, VISIBLE);
        let mut points = vec![at(self.nose); LANDMARK_COUNT];
        points[L::LeftShoulder.index()] = at(self.left_shoulder);
        points[L::RightShoulder.index()] = at(self.right_shoulder);
        points[L::LeftElbow.index()] = at(self.left_elbow);
        points[L::RightElbow.index()] = at(self.right_elbow);
        points[L::LeftWrist.index()] = at(self.left_wrist);
        points[L::RightWrist.index()] = at(self.right_wrist);
        points[L::LeftHip.index()] = at(self.left_hip);
        points[L::RightHip.index()] = at(self.right_hip);
        // Hand points (17..=22) follow their wrist, leg points (25..=32) hang below the hips.
        for idx in [17, 19, 21] {
            points[idx] = at(self.left_wrist);
        }
        for idx in [18, 20, 22] {
            points[idx] = at(self.right_wrist);
        }
        for (offset, idx) in (25..LANDMARK_COUNT).enumerate() {
            let hip = if idx % 2 == 1 { self.left_hip } else { self.right_hip };
            let drop = 0.08 * (offset / 2 + 1) as f32;
            points[idx] = at((hip.0, (hip.1 + drop).min(1.0)));
        }
        LandmarkSample::from_trusted(points)
    }
}

/// A body shape that satisfies `kind`. `Unknown` yields the idle body.
pub fn canonical_sample(kind: PoseKind) -> LandmarkSample {
    Skeleton::for_kind(kind).into_sample()
}

/// Relaxed standing body that matches none of the known poses.
pub fn idle_sample() -> LandmarkSample {
    IDLE.into_sample()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScriptStep {
    Pose(PoseKind),
    Idle,
    Empty,
}

/// Configuration for a synthetic source.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// `stub://` URI naming the pose script.
    pub uri: String,
    /// Frames emitted for each script step before moving to the next.
    pub frames_per_step: u32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            uri: "stub://idle".to_string(),
            frames_per_step: 30,
        }
    }
}

pub struct SyntheticSource {
    config: SyntheticConfig,
    script: Vec<ScriptStep>,
    frame_count: u64,
    bodies: u64,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Result<Self> {
        let script_src = config
            .uri
            .strip_prefix("stub://")
            .ok_or_else(|| anyhow!("synthetic source URI must start with stub://"))?;
        if config.frames_per_step == 0 {
            return Err(anyhow!("frames_per_step must be >= 1"));
        }
        let script = parse_script(script_src)?;
        Ok(Self {
            config,
            script,
            frame_count: 0,
            bodies: 0,
        })
    }

    fn step_at(&self, frame: u64) -> ScriptStep {
        let step = (frame / u64::from(self.config.frames_per_step)) as usize;
        self.script[step % self.script.len()]
    }
}

fn parse_script(script_src: &str) -> Result<Vec<ScriptStep>> {
    let mut script = Vec::new();
    for entry in script_src.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let step = match entry {
            "idle" => ScriptStep::Idle,
            "none" => ScriptStep::Empty,
            id => match PoseKind::from_id(id) {
                PoseKind::Unknown => {
                    return Err(anyhow!("synthetic source cannot generate pose {:?}", id))
                }
                kind => ScriptStep::Pose(kind),
            },
        };
        script.push(step);
    }
    if script.is_empty() {
        script.push(ScriptStep::Idle);
    }
    Ok(script)
}

impl LandmarkSource for SyntheticSource {
    fn connect(&mut self) -> Result<()> {
        log::info!(
            "SyntheticSource: connected to {} ({} steps)",
            self.config.uri,
            self.script.len()
        );
        Ok(())
    }

    fn next_capture(&mut self) -> Result<Capture> {
        let step = self.step_at(self.frame_count);
        self.frame_count += 1;
        let capture = match step {
            ScriptStep::Pose(kind) => Capture::Body(canonical_sample(kind)),
            ScriptStep::Idle => Capture::Body(idle_sample()),
            ScriptStep::Empty => Capture::NoBody,
        };
        if matches!(capture, Capture::Body(_)) {
            self.bodies += 1;
        }
        Ok(capture)
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            captures: self.frame_count,
            bodies: self.bodies,
            source: self.config.uri.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(uri: &str, frames_per_step: u32) -> SyntheticSource {
        SyntheticSource::new(SyntheticConfig {
            uri: uri.to_string(),
            frames_per_step,
        })
        .expect("synthetic source")
    }

    #[test]
    fn cycles_through_script_steps() {
        let mut src = source("stub://t-pose,none,idle", 2);
        src.connect().unwrap();

        let kinds: Vec<&str> = (0..8)
            .map(|_| match src.next_capture().unwrap() {
                Capture::Body(sample) if sample == canonical_sample(PoseKind::TPose) => "t",
                Capture::Body(_) => "idle",
                Capture::NoBody => "none",
                Capture::Ended => "end",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["t", "t", "none", "none", "idle", "idle", "t", "t"]
        );

        let stats = src.stats();
        assert_eq!(stats.captures, 8);
        assert_eq!(stats.bodies, 6);
    }

    #[test]
    fn rejects_unknown_poses_and_bad_uris() {
        assert!(SyntheticSource::new(SyntheticConfig {
            uri: "stub://moonwalk".to_string(),
            frames_per_step: 1,
        })
        .is_err());
        assert!(SyntheticSource::new(SyntheticConfig {
            uri: "file://poses.jsonl".to_string(),
            frames_per_step: 1,
        })
        .is_err());
        assert!(SyntheticSource::new(SyntheticConfig {
            uri: "stub://idle".to_string(),
            frames_per_step: 0,
        })
        .is_err());
    }

    #[test]
    fn empty_script_defaults_to_idle() {
        let mut src = source("stub://", 1);
        assert_eq!(src.next_capture().unwrap(), Capture::Body(idle_sample()));
    }

    #[test]
    fn generated_points_stay_in_frame() {
        for kind in PoseKind::KNOWN {
            let sample = canonical_sample(kind);
            assert_eq!(sample.points().len(), LANDMARK_COUNT);
            for lm in sample.points() {
                assert!((0.0..=1.0).contains(&lm.x) && (0.0..=1.0).contains(&lm.y));
            }
        }
    }
}
