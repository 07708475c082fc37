//! Pose judging.
//!
//! - `matcher`: the pure geometric rules, one per `PoseKind`.
//! - `PoseJudge`: backend seam; `GeometricJudge` wraps the matcher.
//! - `judge_or_fallback`: the only path the session uses, so backend failures arrive as
//!   ordinary misses.

mod backend;
mod backends;
pub mod matcher;
mod registry;
mod result;

pub use backend::{judge_or_fallback, PoseJudge};
pub use backends::{GeometricJudge, ScriptedJudge};
pub use matcher::evaluate;
pub use registry::JudgeRegistry;
pub use result::{MatchResult, NO_BODY_FEEDBACK, UNKNOWN_POSE_FEEDBACK};
