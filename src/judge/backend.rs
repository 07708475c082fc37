use anyhow::Result;

use crate::catalog::PoseDefinition;
use crate::landmark::LandmarkSample;

use super::result::MatchResult;

/// Judge backend trait.
///
/// A judge turns the round's final landmark sample into a verdict for the active target
/// pose. The geometric matcher is the default; alternative judges (for example an
/// image-based model behind a network call) plug in here with the same contract.
///
/// Implementations may fail. The session never sees the failure: `judge_or_fallback`
/// converts it into a scoreless miss.
pub trait PoseJudge: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Produce a verdict. `sample` is `None` when no complete body was visible.
    fn judge(
        &mut self,
        sample: Option<&LandmarkSample>,
        target: &PoseDefinition,
    ) -> Result<MatchResult>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Run `judge`, translating any failure into a miss with explanatory feedback.
///
/// Results coming back from a backend are normalized so that a miss never carries score.
pub fn judge_or_fallback(
    judge: &mut dyn PoseJudge,
    sample: Option<&LandmarkSample>,
    target: &PoseDefinition,
) -> MatchResult {
    match judge.judge(sample, target) {
        Ok(result) => result.normalized(),
        Err(err) => {
            log::warn!("judge {} failed on pose {}: {:#}", judge.name(), target.id, err);
            MatchResult::judge_unavailable(&err)
        }
    }
}
