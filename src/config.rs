use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Runtime constants (not gameplay tuning, see `tuning`).

pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Clone, Debug)]
pub struct Config {
    /// Target time between frames; the loop sleeps off whatever is left.
    pub frame_interval: Duration,
    pub score_file: PathBuf,
    pub log_file: PathBuf,
    /// Fixed seed for both the frame RNG and the fire scheduler.
    pub seed: Option<u64>,
}

impl Config {
    /// Read overrides from the environment (and `.env`), falling back to
    /// defaults for anything missing or malformed.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let frame_ms = env::var("SPACE_INVADERS_FRAME_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_FRAME_MS);

        Self {
            frame_interval: Duration::from_millis(frame_ms),
            score_file: env::var_os("SPACE_INVADERS_SCORE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(default_score_file),
            log_file: env::var_os("SPACE_INVADERS_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("space_invaders.log")),
            seed: env::var("SPACE_INVADERS_SEED")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

fn default_score_file() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".space_invaders_score")
}
