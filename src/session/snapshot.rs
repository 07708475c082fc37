use serde::Serialize;

use crate::judge::MatchResult;

use super::transition::Phase;

/// Read-only view of the session for display and telemetry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub score: u64,
    pub lives: u32,
    pub remaining_ms: u64,
    pub warning: bool,
    /// 1-based number of the current round; 0 before the first round.
    pub round: u32,
    pub target: Option<String>,
    pub last_result: Option<MatchResult>,
}

/// Outcome of one judged round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub round: u32,
    pub pose_id: String,
    pub result: MatchResult,
}
