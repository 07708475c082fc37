//! Game session state machine.
//!
//! `GameSession` owns every piece of mutable game state: phase, lives, score, the round
//! clock, the active round and the judge. Inputs arrive through `dispatch` (player/host
//! actions) and `tick` (clock granularity). Each accepted input maps to exactly one
//! `Transition` whose effects are applied once.
//!
//! Judging happens at most once per round. Both the transition table (only `Playing`
//! accepts a judge trigger) and the per-round `judged` flag enforce it.

mod snapshot;
mod transition;

pub use snapshot::{RoundRecord, SessionSnapshot};
pub use transition::{lives_guard, transition, Action, Input, Phase, Transition};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use crate::catalog::{PoseCatalog, PoseDefinition};
use crate::clock::{ClockSettings, RoundClock, Tick};
use crate::config::GameConfig;
use crate::judge::{judge_or_fallback, GeometricJudge, JudgeRegistry, MatchResult, PoseJudge};
use crate::landmark::{LandmarkSample, SampleSlot};

pub const DEFAULT_STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSettings {
    pub clock: ClockSettings,
    pub starting_lives: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            clock: ClockSettings::default(),
            starting_lives: DEFAULT_STARTING_LIVES,
        }
    }
}

/// State of the round currently on screen.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub number: u32,
    pub pose: PoseDefinition,
    pub last_result: Option<MatchResult>,
    judged: bool,
}

impl RoundState {
    fn new(number: u32, pose: PoseDefinition) -> Self {
        Self {
            number,
            pose,
            last_result: None,
            judged: false,
        }
    }

    pub fn is_judged(&self) -> bool {
        self.judged
    }
}

pub struct GameSession {
    settings: SessionSettings,
    catalog: PoseCatalog,
    judge: Box<dyn PoseJudge>,
    rng: Box<dyn RngCore + Send>,
    samples: SampleSlot,
    clock: RoundClock,
    phase: Phase,
    score: u64,
    lives: u32,
    round: Option<RoundState>,
    rounds_started: u32,
    history: Vec<RoundRecord>,
}

impl GameSession {
    pub fn new(
        settings: SessionSettings,
        catalog: PoseCatalog,
        judge: Box<dyn PoseJudge>,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        let settings = SessionSettings {
            clock: settings.clock.normalized(),
            ..settings
        };
        Self {
            settings,
            catalog,
            judge,
            rng,
            samples: SampleSlot::new(),
            clock: RoundClock::new(settings.clock),
            phase: Phase::Start,
            score: 0,
            lives: settings.starting_lives,
            round: None,
            rounds_started: 0,
            history: Vec::new(),
        }
    }

    /// Built-in catalog, geometric judge, default timings, seeded pose selection.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            SessionSettings::default(),
            PoseCatalog::builtin(),
            Box::new(GeometricJudge::new()),
            Box::new(StdRng::seed_from_u64(seed)),
        )
    }

    pub fn from_config(cfg: &GameConfig) -> Result<Self> {
        let catalog = match &cfg.catalog_path {
            Some(path) => PoseCatalog::load(path)?,
            None => PoseCatalog::builtin(),
        };
        let rng: Box<dyn RngCore + Send> = match cfg.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        let judge = JudgeRegistry::with_geometric().take_default()?;
        log::info!(
            "session ready: {} poses, round={}ms tick={}ms lives={}",
            catalog.len(),
            cfg.clock.round_ms,
            cfg.clock.tick_ms,
            cfg.starting_lives
        );
        Ok(Self::new(cfg.session_settings(), catalog, judge, rng))
    }

    /// Apply a player/host action. Returns false when the action is not valid in the
    /// current phase (a no-op).
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.apply(Input::Action(action))
    }

    /// Advance the round clock by one tick. Ticks outside `Playing` do nothing.
    pub fn tick(&mut self) -> Tick {
        if self.phase != Phase::Playing {
            return Tick::Idle;
        }
        let tick = self.clock.tick();
        if tick == Tick::Expired {
            self.apply(Input::ClockExpired);
        }
        tick
    }

    /// Replace the latest landmark sample. `None` means no body in the latest frame.
    pub fn push_sample(&self, sample: Option<LandmarkSample>) {
        self.samples.publish(sample);
    }

    /// Shared handle to the sample slot, for sources publishing from elsewhere.
    pub fn sample_slot(&self) -> SampleSlot {
        self.samples.clone()
    }

    fn apply(&mut self, input: Input) -> bool {
        let Some(step) = transition(self.phase, self.lives, input) else {
            log::debug!("ignoring {:?} in phase {:?}", input, self.phase);
            return false;
        };
        self.run(step);
        if let Some(step) = lives_guard(self.phase, self.lives) {
            self.run(step);
        }
        true
    }

    fn run(&mut self, step: Transition) {
        match step {
            Transition::BeginRound => self.begin_round(),
            Transition::Judge => self.judge_round(),
            Transition::EndGame => self.end_game(),
            Transition::Reset => self.reset(),
        }
    }

    fn begin_round(&mut self) {
        let index = self.catalog.choose_index(&mut *self.rng);
        let Some(pose) = self.catalog.by_index(index).cloned() else {
            return;
        };
        self.rounds_started += 1;
        log::info!(
            "round {}: strike a {} ({})",
            self.rounds_started,
            pose.name,
            pose.id
        );
        self.round = Some(RoundState::new(self.rounds_started, pose));
        self.clock.reset();
        self.phase = Phase::Playing;
    }

    fn judge_round(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.judged {
            log::debug!("round {} already judged; trigger ignored", round.number);
            return;
        }
        round.judged = true;
        self.clock.halt();
        self.phase = Phase::Judging;

        let sample = self.samples.latest();
        let result = judge_or_fallback(self.judge.as_mut(), sample.as_deref(), &round.pose);
        if result.matched {
            self.score += u64::from(result.score);
        } else {
            self.lives = self.lives.saturating_sub(1);
        }
        log::info!(
            "round {} judged by {}: matched={} score={} lives={} ({})",
            round.number,
            self.judge.name(),
            result.matched,
            result.score,
            self.lives,
            result.feedback
        );

        self.history.push(RoundRecord {
            round: round.number,
            pose_id: round.pose.id.clone(),
            result: result.clone(),
        });
        round.last_result = Some(result);
        self.phase = Phase::Result;
    }

    fn end_game(&mut self) {
        self.clock.halt();
        self.phase = Phase::GameOver;
        log::info!(
            "game over: final score {} after {} rounds",
            self.score,
            self.history.len()
        );
    }

    fn reset(&mut self) {
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.round = None;
        self.rounds_started = 0;
        self.history.clear();
        self.clock = RoundClock::new(self.settings.clock);
        self.phase = Phase::Start;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn remaining_ms(&self) -> u64 {
        self.clock.remaining_ms()
    }

    pub fn is_warning(&self) -> bool {
        self.clock.is_warning()
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn current_pose(&self) -> Option<&PoseDefinition> {
        self.round.as_ref().map(|round| &round.pose)
    }

    pub fn last_result(&self) -> Option<&MatchResult> {
        self.round.as_ref().and_then(|round| round.last_result.as_ref())
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn catalog(&self) -> &PoseCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            remaining_ms: self.clock.remaining_ms(),
            warning: self.clock.is_warning(),
            round: self.round.as_ref().map_or(0, |round| round.number),
            target: self.current_pose().map(|pose| pose.id.clone()),
            last_result: self.last_result().cloned(),
        }
    }
}
