//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATE_PATH: &str = "draw-state.json";
pub const DEFAULT_DRAW_DELAY_MS: u64 = 1500;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON file the app state is persisted to.
    pub state_path: PathBuf,
    /// Cosmetic pause before a draw result is returned.
    pub draw_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            draw_delay: Duration::from_millis(DEFAULT_DRAW_DELAY_MS),
        }
    }
}

impl Config {
    /// Read HOST, PORT, STATE_PATH and DRAW_DELAY_MS. Empty or unparsable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            state_path: get("STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_path),
            draw_delay: get("DRAW_DELAY_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.draw_delay),
        }
    }
}
