use anyhow::Result;

use crate::catalog::PoseDefinition;
use crate::judge::backend::PoseJudge;
use crate::judge::matcher::evaluate;
use crate::judge::result::MatchResult;
use crate::landmark::LandmarkSample;

/// Landmark-geometry judge. Stateless wrapper over `matcher::evaluate`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometricJudge;

impl GeometricJudge {
    pub fn new() -> Self {
        Self
    }
}

impl PoseJudge for GeometricJudge {
    fn name(&self) -> &'static str {
        "geometric"
    }

    fn judge(
        &mut self,
        sample: Option<&LandmarkSample>,
        target: &PoseDefinition,
    ) -> Result<MatchResult> {
        Ok(evaluate(sample, target))
    }
}
