use serde::{Deserialize, Serialize};

/// Feedback when no complete body is visible.
pub const NO_BODY_FEEDBACK: &str = "no body detected";

/// Feedback for pose ids the matcher has no rule for.
pub const UNKNOWN_POSE_FEEDBACK: &str = "Try harder!";

/// Outcome of judging one landmark sample against one target pose.
///
/// Only a match carries a nonzero score; every constructor that produces a miss pins the
/// score to 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    /// 0..=100.
    pub score: u32,
    pub feedback: String,
}

impl MatchResult {
    pub fn hit(score: u32, feedback: impl Into<String>) -> Self {
        Self {
            matched: true,
            score: score.min(100),
            feedback: feedback.into(),
        }
    }

    pub fn miss(feedback: impl Into<String>) -> Self {
        Self {
            matched: false,
            score: 0,
            feedback: feedback.into(),
        }
    }

    pub fn no_body() -> Self {
        Self::miss(NO_BODY_FEEDBACK)
    }

    pub fn unknown_pose() -> Self {
        Self::miss(UNKNOWN_POSE_FEEDBACK)
    }

    /// Translation of a judge backend failure into an ordinary miss.
    pub fn judge_unavailable(err: &anyhow::Error) -> Self {
        Self::miss(format!("judge unavailable: {err}"))
    }

    /// Normalize results from external judges: a miss never carries score.
    pub fn normalized(self) -> Self {
        if self.matched {
            Self::hit(self.score, self.feedback)
        } else {
            Self::miss(self.feedback)
        }
    }
}
