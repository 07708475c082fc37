//! Round countdown clock.
//!
//! Fixed-size ticks against a remaining-time counter. The final tick clamps to zero and
//! reports `Tick::Expired` exactly once; after that the clock is halted until `reset`.

use anyhow::{anyhow, Result};
use serde::Serialize;

pub const DEFAULT_ROUND_MS: u64 = 8_000;
pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_WARNING_MS: u64 = 1_500;
/// Smallest usable decrement. A zero tick would never reach expiry.
pub const MIN_TICK_MS: u64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ClockSettings {
    /// Full round duration.
    pub round_ms: u64,
    /// Decrement per tick.
    pub tick_ms: u64,
    /// Remaining time below which the round is "about to expire" (display only).
    pub warning_ms: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            round_ms: DEFAULT_ROUND_MS,
            tick_ms: DEFAULT_TICK_MS,
            warning_ms: DEFAULT_WARNING_MS,
        }
    }
}

impl ClockSettings {
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms < MIN_TICK_MS {
            return Err(anyhow!("tick_ms must be greater than zero"));
        }
        if self.round_ms < self.tick_ms {
            return Err(anyhow!(
                "round duration ({}ms) must be at least one tick ({}ms)",
                self.round_ms,
                self.tick_ms
            ));
        }
        if self.warning_ms > self.round_ms {
            return Err(anyhow!(
                "warning threshold ({}ms) exceeds round duration ({}ms)",
                self.warning_ms,
                self.round_ms
            ));
        }
        Ok(())
    }

    /// Same settings with the tick raised to `MIN_TICK_MS` if needed.
    pub fn normalized(self) -> Self {
        Self {
            tick_ms: self.tick_ms.max(MIN_TICK_MS),
            ..self
        }
    }
}

/// Outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Clock is not running; nothing changed.
    Idle,
    /// Time was decremented.
    Running { remaining_ms: u64 },
    /// Remaining time reached zero on this tick. Reported once per round.
    Expired,
}

#[derive(Debug, Clone)]
pub struct RoundClock {
    settings: ClockSettings,
    remaining_ms: u64,
    running: bool,
}

impl RoundClock {
    /// A halted clock showing the full round duration. A zero tick is raised to
    /// `MIN_TICK_MS` so every running round reaches expiry.
    pub fn new(settings: ClockSettings) -> Self {
        let settings = settings.normalized();
        Self {
            settings,
            remaining_ms: settings.round_ms,
            running: false,
        }
    }

    /// Rewind to the full duration and start ticking.
    pub fn reset(&mut self) {
        self.remaining_ms = self.settings.round_ms;
        self.running = true;
    }

    /// Stop ticking without touching remaining time.
    pub fn halt(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        if self.remaining_ms <= self.settings.tick_ms {
            self.remaining_ms = 0;
            self.running = false;
            return Tick::Expired;
        }
        self.remaining_ms -= self.settings.tick_ms;
        Tick::Running {
            remaining_ms: self.remaining_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True while a running round is under the warning threshold.
    pub fn is_warning(&self) -> bool {
        self.running && self.remaining_ms < self.settings.warning_ms
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::new(ClockSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_expired(clock: &mut RoundClock) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if clock.tick() == Tick::Expired {
                return ticks;
            }
            assert!(ticks < 10_000, "clock never expired");
        }
    }

    #[test]
    fn new_clock_is_halted_at_full_duration() {
        let mut clock = RoundClock::default();
        assert_eq!(clock.remaining_ms(), DEFAULT_ROUND_MS);
        assert!(!clock.is_running());
        assert_eq!(clock.tick(), Tick::Idle);
        assert_eq!(clock.remaining_ms(), DEFAULT_ROUND_MS);
    }

    #[test]
    fn default_round_expires_after_eighty_ticks() {
        let mut clock = RoundClock::default();
        clock.reset();
        assert_eq!(
            clock.tick(),
            Tick::Running {
                remaining_ms: 7_900
            }
        );
        assert_eq!(run_until_expired(&mut clock), 79);
        assert_eq!(clock.remaining_ms(), 0);
    }

    #[test]
    fn expiry_fires_once_then_idles() {
        let mut clock = RoundClock::default();
        clock.reset();
        run_until_expired(&mut clock);
        for _ in 0..5 {
            assert_eq!(clock.tick(), Tick::Idle);
        }
        assert_eq!(clock.remaining_ms(), 0);
    }

    #[test]
    fn partial_final_tick_clamps_to_zero() {
        let mut clock = RoundClock::new(ClockSettings {
            round_ms: 250,
            tick_ms: 100,
            warning_ms: 100,
        });
        clock.reset();
        assert_eq!(clock.tick(), Tick::Running { remaining_ms: 150 });
        assert_eq!(clock.tick(), Tick::Running { remaining_ms: 50 });
        assert_eq!(clock.tick(), Tick::Expired);
        assert_eq!(clock.remaining_ms(), 0);
    }

    #[test]
    fn warning_tracks_threshold_while_running() {
        let mut clock = RoundClock::new(ClockSettings {
            round_ms: 2_000,
            tick_ms: 100,
            warning_ms: 1_500,
        });
        assert!(!clock.is_warning());
        clock.reset();
        for _ in 0..5 {
            clock.tick();
        }
        assert_eq!(clock.remaining_ms(), 1_500);
        assert!(!clock.is_warning());
        clock.tick();
        assert!(clock.is_warning());
        clock.halt();
        assert!(!clock.is_warning());
        assert_eq!(clock.tick(), Tick::Idle);
    }

    #[test]
    fn reset_restarts_an_expired_clock() {
        let mut clock = RoundClock::default();
        clock.reset();
        run_until_expired(&mut clock);
        clock.reset();
        assert_eq!(clock.remaining_ms(), DEFAULT_ROUND_MS);
        assert!(clock.is_running());
    }

    #[test]
    fn zero_tick_still_expires_exactly_once() {
        let mut clock = RoundClock::new(ClockSettings {
            round_ms: 50,
            tick_ms: 0,
            warning_ms: 10,
        });
        clock.reset();
        assert_eq!(run_until_expired(&mut clock), 50);
        assert_eq!(clock.remaining_ms(), 0);
        assert_eq!(clock.tick(), Tick::Idle);
    }

    #[test]
    fn validate_rejects_inconsistent_timings() {
        assert!(ClockSettings::default().validate().is_ok());
        let zero_tick = ClockSettings {
            tick_ms: 0,
            ..ClockSettings::default()
        };
        assert!(zero_tick.validate().is_err());
        assert_eq!(zero_tick.normalized().tick_ms, MIN_TICK_MS);
        assert!(ClockSettings {
            round_ms: 50,
            ..ClockSettings::default()
        }
        .validate()
        .is_err());
        assert!(ClockSettings {
            warning_ms: 9_000,
            ..ClockSettings::default()
        }
        .validate()
        .is_err());
    }
}
