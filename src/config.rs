//! Process configuration from environment variables.

use std::env;
use std::path::PathBuf;

use tracing::Level;

pub const DEFAULT_WIDTH: u16 = 33;
pub const DEFAULT_HEIGHT: u16 = 22;
pub const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 500;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Surface size in terminal columns.
    pub width: u16,
    /// Surface size in terminal rows.
    pub height: u16,
    /// Fixed engine seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    pub audio_disabled: bool,
    pub release_timeout_ms: u32,
    /// Log file. Logging is off when unset.
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            audio_disabled: false,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT_MS,
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let width = var("TETRIS_CONSOLE_WIDTH")
            .and_then(|s| s.parse().ok())
            .filter(|&w: &u16| w > 0)
            .unwrap_or(defaults.width);
        let height = var("TETRIS_CONSOLE_HEIGHT")
            .and_then(|s| s.parse().ok())
            .filter(|&h: &u16| h > 0)
            .unwrap_or(defaults.height);
        let seed = var("TETRIS_CONSOLE_SEED").and_then(|s| s.parse().ok());
        let audio_disabled = var("TETRIS_CONSOLE_AUDIO_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let release_timeout_ms = var("TETRIS_CONSOLE_RELEASE_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.release_timeout_ms);
        let log_path = var("TETRIS_CONSOLE_LOG_PATH").map(PathBuf::from);
        let log_level = var("TETRIS_CONSOLE_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            width,
            height,
            seed,
            audio_disabled,
            release_timeout_ms,
            log_path,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config(&[]), Config::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let c = config(&[
            ("TETRIS_CONSOLE_WIDTH", "45"),
            ("TETRIS_CONSOLE_HEIGHT", "32"),
            ("TETRIS_CONSOLE_SEED", "42"),
            ("TETRIS_CONSOLE_AUDIO_DISABLED", "TRUE"),
            ("TETRIS_CONSOLE_RELEASE_TIMEOUT_MS", "250"),
            ("TETRIS_CONSOLE_LOG_PATH", " /tmp/tetris.log "),
            ("TETRIS_CONSOLE_LOG_LEVEL", "debug"),
        ]);
        assert_eq!(c.width, 45);
        assert_eq!(c.height, 32);
        assert_eq!(c.seed, Some(42));
        assert!(c.audio_disabled);
        assert_eq!(c.release_timeout_ms, 250);
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/tetris.log")));
        assert_eq!(c.log_level, Level::DEBUG);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let c = config(&[
            ("TETRIS_CONSOLE_WIDTH", "0"),
            ("TETRIS_CONSOLE_HEIGHT", "tall"),
            ("TETRIS_CONSOLE_SEED", "-1"),
            ("TETRIS_CONSOLE_AUDIO_DISABLED", "yes"),
            ("TETRIS_CONSOLE_LOG_PATH", "   "),
            ("TETRIS_CONSOLE_LOG_LEVEL", "loud"),
        ]);
        assert_eq!(c, Config::default());
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = Config::from_env();
    }
}
