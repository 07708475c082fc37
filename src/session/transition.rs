//! Phase transition table.
//!
//! `transition` is a pure function of the current phase, remaining lives and an input.
//! It decides *which* transition happens; `GameSession` applies the side effects. Any
//! (phase, input) pair not listed is a no-op.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Start,
    Playing,
    Judging,
    Result,
    GameOver,
}

/// Discrete player/host actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Start,
    ForceJudge,
    Continue,
    Restart,
}

/// Everything that can drive the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Action(Action),
    ClockExpired,
}

impl From<Action> for Input {
    fn from(action: Action) -> Self {
        Input::Action(action)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Pick a pose, rewind the clock, enter `Playing`.
    BeginRound,
    /// Enter `Judging`, score the round, enter `Result`.
    Judge,
    /// Lives exhausted: enter `GameOver`.
    EndGame,
    /// `GameOver` back to `Start` with lives and score reset.
    Reset,
}

pub fn transition(phase: Phase, lives: u32, input: Input) -> Option<Transition> {
    match (phase, input) {
        (Phase::Start, Input::Action(Action::Start)) => Some(Transition::BeginRound),
        (Phase::Playing, Input::ClockExpired | Input::Action(Action::ForceJudge)) => {
            Some(Transition::Judge)
        }
        (Phase::Result, Input::Action(Action::Continue)) if lives == 0 => {
            Some(Transition::EndGame)
        }
        (Phase::Result, Input::Action(Action::Continue)) => Some(Transition::BeginRound),
        (Phase::GameOver, Input::Action(Action::Restart)) => Some(Transition::Reset),
        _ => None,
    }
}

/// Safety net: lives at zero outside `Start`/`GameOver` forces the game to end.
pub fn lives_guard(phase: Phase, lives: u32) -> Option<Transition> {
    match phase {
        Phase::Start | Phase::GameOver => None,
        _ if lives == 0 => Some(Transition::EndGame),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [Phase; 5] = [
        Phase::Start,
        Phase::Playing,
        Phase::Judging,
        Phase::Result,
        Phase::GameOver,
    ];

    #[test]
    fn valid_pairs() {
        assert_eq!(
            transition(Phase::Start, 3, Action::Start.into()),
            Some(Transition::BeginRound)
        );
        assert_eq!(
            transition(Phase::Playing, 3, Input::ClockExpired),
            Some(Transition::Judge)
        );
        assert_eq!(
            transition(Phase::Playing, 3, Action::ForceJudge.into()),
            Some(Transition::Judge)
        );
        assert_eq!(
            transition(Phase::Result, 2, Action::Continue.into()),
            Some(Transition::BeginRound)
        );
        assert_eq!(
            transition(Phase::Result, 0, Action::Continue.into()),
            Some(Transition::EndGame)
        );
        assert_eq!(
            transition(Phase::GameOver, 0, Action::Restart.into()),
            Some(Transition::Reset)
        );
    }

    #[test]
    fn actions_outside_their_phase_are_noops() {
        let valid = [
            (Phase::Start, Action::Start),
            (Phase::Playing, Action::ForceJudge),
            (Phase::Result, Action::Continue),
            (Phase::GameOver, Action::Restart),
        ];
        for phase in ALL_PHASES {
            for action in [
                Action::Start,
                Action::ForceJudge,
                Action::Continue,
                Action::Restart,
            ] {
                let expected_valid = valid.contains(&(phase, action));
                assert_eq!(
                    transition(phase, 3, action.into()).is_some(),
                    expected_valid,
                    "{:?} in {:?}",
                    action,
                    phase
                );
            }
        }
    }

    #[test]
    fn clock_expiry_only_matters_while_playing() {
        for phase in ALL_PHASES {
            let judged = transition(phase, 3, Input::ClockExpired).is_some();
            assert_eq!(judged, phase == Phase::Playing);
        }
    }

    #[test]
    fn lives_guard_ignores_start_and_game_over() {
        assert_eq!(lives_guard(Phase::Start, 0), None);
        assert_eq!(lives_guard(Phase::GameOver, 0), None);
        assert_eq!(lives_guard(Phase::Playing, 1), None);
        for phase in [Phase::Playing, Phase::Judging, Phase::Result] {
            assert_eq!(lives_guard(phase, 0), Some(Transition::EndGame));
        }
    }
}
