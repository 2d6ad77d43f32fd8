use std::time::Duration;

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::LOOP_TIME;
use crate::error::{GameError, GameResult};

/// Which render surface the binary draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// One character per tile, redrawn in the terminal each tick.
    #[default]
    Ascii,
    /// Draw nothing; only logs show what happens.
    Headless,
}

/// Runtime configuration for the binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    /// Delay between ticks.
    pub tick: Duration,
    /// Seed for the ghosts' random source. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub render: RenderMode,
    /// Stop after this many ticks. Unbounded when `None`.
    pub max_ticks: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick: LOOP_TIME,
            seed: None,
            render: RenderMode::default(),
            max_ticks: None,
        }
    }
}

/// Configuration as read from the environment, before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
    seed: Option<u64>,
    #[serde(default)]
    render: RenderMode,
    max_ticks: Option<u64>,
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        if raw.tick_ms == 0 {
            return Err("tick_ms must be greater than zero".to_string());
        }

        Ok(Config {
            tick: Duration::from_millis(raw.tick_ms),
            seed: raw.seed,
            render: raw.render,
            max_ticks: raw.max_ticks,
        })
    }
}

fn default_tick_ms() -> u64 {
    LOOP_TIME.as_millis() as u64
}

/// The configuration sources, in priority order: `PACMAN_*` environment variables over defaults.
pub fn figment() -> Figment {
    Figment::new().merge(Env::prefixed("PACMAN_"))
}

impl Config {
    /// Extracts and validates a configuration from the given figment.
    pub fn from_figment(figment: &Figment) -> GameResult<Config> {
        figment.extract().map_err(|e| GameError::Config(e.to_string()))
    }
}

pub fn load_config() -> GameResult<Config> {
    Config::from_figment(&figment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_config().unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.tick, Duration::from_millis(50));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("PACMAN_TICK_MS", 20);
            jail.set_env("PACMAN_SEED", 7);
            jail.set_env("PACMAN_RENDER", "headless");
            jail.set_env("PACMAN_MAX_TICKS", 100);

            let config = load_config().unwrap();
            assert_eq!(config.tick, Duration::from_millis(20));
            assert_eq!(config.seed, Some(7));
            assert_eq!(config.render, RenderMode::Headless);
            assert_eq!(config.max_ticks, Some(100));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        Jail::expect_with(|jail| {
            jail.set_env("PACMAN_TICK_MS", 0);
            assert!(matches!(load_config(), Err(GameError::Config(_))));

            jail.set_env("PACMAN_TICK_MS", 50);
            jail.set_env("PACMAN_RENDER", "opengl");
            assert!(matches!(load_config(), Err(GameError::Config(_))));
            Ok(())
        });
    }
}
