//! Pose Wall
//!
//! Kernel for a timed "match the pose before the wall arrives" game driven by body
//! landmark tracking.
//!
//! # Architecture
//!
//! The kernel holds three invariants by construction:
//!
//! 1. **Only a match scores**: every miss (wrong shape, no body, unknown pose, judge
//!    failure) is reported with score 0.
//! 2. **One verdict per round**: a round is judged at most once no matter how many
//!    triggers fire.
//! 3. **Nothing is fatal**: missing input and backend failures degrade to a miss; the
//!    worst outcome of any fault is a lost life.
//!
//! # Module Structure
//!
//! - `landmark`: landmark samples and the last-value-wins `SampleSlot`
//! - `catalog`: pose definitions and the closed `PoseKind` set
//! - `judge`: geometric matcher and the `PoseJudge` backend seam
//! - `clock`: fixed-granularity round countdown
//! - `session`: phase/lives/score state machine
//! - `ingest`: recorded and synthetic landmark sources
//! - `config`: file + environment configuration

pub mod catalog;
pub mod clock;
pub mod config;
pub mod ingest;
pub mod judge;
pub mod landmark;
pub mod session;

pub use catalog::{validate_pose_id, PoseCatalog, PoseDefinition, PoseKind};
pub use clock::{ClockSettings, RoundClock, Tick};
pub use config::GameConfig;
pub use ingest::{open_source, Capture, FileSource, LandmarkSource, SyntheticSource};
pub use judge::{
    evaluate, judge_or_fallback, GeometricJudge, JudgeRegistry, MatchResult, PoseJudge,
    ScriptedJudge,
};
pub use landmark::{Landmark, LandmarkIndex, LandmarkSample, SampleSlot, LANDMARK_COUNT};
pub use session::{
    Action, GameSession, Phase, RoundRecord, RoundState, SessionSettings, SessionSnapshot,
};
