use std::collections::VecDeque;

use anyhow::{anyhow, Result};

use crate::catalog::PoseDefinition;
use crate::judge::backend::PoseJudge;
use crate::judge::result::MatchResult;
use crate::landmark::LandmarkSample;

/// Judge that replays a queue of canned verdicts, ignoring its inputs.
///
/// Stands in for an external judge in tests and demos. `Err` entries simulate backend
/// failures. Once the queue is empty every call fails.
#[derive(Debug, Default)]
pub struct ScriptedJudge {
    script: VecDeque<std::result::Result<MatchResult, String>>,
    calls: usize,
}

impl ScriptedJudge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_result(mut self, result: MatchResult) -> Self {
        self.script.push_back(Ok(result));
        self
    }

    pub fn then_error(mut self, reason: &str) -> Self {
        self.script.push_back(Err(reason.to_string()));
        self
    }

    /// Number of times `judge` was invoked.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl PoseJudge for ScriptedJudge {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn judge(
        &mut self,
        _sample: Option<&LandmarkSample>,
        _target: &PoseDefinition,
    ) -> Result<MatchResult> {
        self.calls += 1;
        match self.script.pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(reason)) => Err(anyhow!(reason)),
            None => Err(anyhow!("script exhausted")),
        }
    }
}
