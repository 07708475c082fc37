use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::clock::{ClockSettings, DEFAULT_ROUND_MS, DEFAULT_TICK_MS, DEFAULT_WARNING_MS};
use crate::session::{SessionSettings, DEFAULT_STARTING_LIVES};

#[derive(Debug, Deserialize, Default)]
struct GameConfigFile {
    round: Option<RoundConfigFile>,
    lives: Option<LivesConfigFile>,
    catalog: Option<CatalogConfigFile>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct RoundConfigFile {
    duration_ms: Option<u64>,
    tick_ms: Option<u64>,
    warning_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct LivesConfigFile {
    starting: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct CatalogConfigFile {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub clock: ClockSettings,
    pub starting_lives: u32,
    /// TOML pose catalog; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Seed for pose selection; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clock: ClockSettings::default(),
            starting_lives: DEFAULT_STARTING_LIVES,
            catalog_path: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from the JSON file named by `POSEWALL_CONFIG` (optional), then apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("POSEWALL_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(read_config_file(Path::new(path))?),
            _ => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: GameConfigFile) -> Self {
        let round = file.round.unwrap_or_default();
        let clock = ClockSettings {
            round_ms: round.duration_ms.unwrap_or(DEFAULT_ROUND_MS),
            tick_ms: round.tick_ms.unwrap_or(DEFAULT_TICK_MS),
            warning_ms: round.warning_ms.unwrap_or(DEFAULT_WARNING_MS),
        };
        Self {
            clock,
            starting_lives: file
                .lives
                .and_then(|lives| lives.starting)
                .unwrap_or(DEFAULT_STARTING_LIVES),
            catalog_path: file.catalog.and_then(|catalog| catalog.path),
            seed: file.seed,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(ms) = env_u64("POSEWALL_ROUND_MS")? {
            self.clock.round_ms = ms;
        }
        if let Some(ms) = env_u64("POSEWALL_TICK_MS")? {
            self.clock.tick_ms = ms;
        }
        if let Some(ms) = env_u64("POSEWALL_WARNING_MS")? {
            self.clock.warning_ms = ms;
        }
        if let Some(lives) = env_u64("POSEWALL_LIVES")? {
            self.starting_lives = u32::try_from(lives)
                .map_err(|_| anyhow!("POSEWALL_LIVES is out of range"))?;
        }
        if let Ok(path) = std::env::var("POSEWALL_CATALOG") {
            if !path.trim().is_empty() {
                self.catalog_path = Some(PathBuf::from(path));
            }
        }
        if let Some(seed) = env_u64("POSEWALL_SEED")? {
            self.seed = Some(seed);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.clock.validate()?;
        if self.starting_lives == 0 {
            return Err(anyhow!("starting lives must be at least 1"));
        }
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            clock: self.clock,
            starting_lives: self.starting_lives,
        }
    }
}

fn read_config_file(path: &Path) -> Result<GameConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("{} must be a non-negative integer", key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.clock.round_ms, 8_000);
        assert_eq!(cfg.clock.tick_ms, 100);
        assert_eq!(cfg.clock.warning_ms, 1_500);
        assert_eq!(cfg.starting_lives, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file: GameConfigFile =
            serde_json::from_str(r#"{"round": {"duration_ms": 5000}}"#).unwrap();
        let cfg = GameConfig::from_file(file);
        assert_eq!(cfg.clock.round_ms, 5_000);
        assert_eq!(cfg.clock.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(cfg.starting_lives, DEFAULT_STARTING_LIVES);
        assert_eq!(cfg.catalog_path, None);
    }

    #[test]
    fn validation_rejects_inconsistent_timings() {
        let mut cfg = GameConfig::default();
        cfg.clock.tick_ms = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = GameConfig::default();
        cfg.clock.round_ms = 50;
        assert!(cfg.validate().is_err());

        let mut cfg = GameConfig::default();
        cfg.clock.warning_ms = 9_000;
        assert!(cfg.validate().is_err());

        let mut cfg = GameConfig::default();
        cfg.starting_lives = 0;
        assert!(cfg.validate().is_err());
    }
}
