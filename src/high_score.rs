//! High-score persistence: one integer, read at startup and rewritten
//! whenever a game beats it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::StoreError;

pub trait ScoreStore {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&self, score: u32) -> Result<(), StoreError>;

    /// A missing or unreadable score means "no high score yet".
    fn load_or_default(&self) -> u32 {
        match self.load() {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "could not load high score, starting from 0");
                0
            }
        }
    }
}

// ── File-backed store ─────────────────────────────────────────────────────────

/// Stores the score as a decimal string in a plain text file.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            // Never saved before.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(StoreError::Io { path: self.path.clone(), source });
            }
        };
        contents.trim().parse().map_err(|_| StoreError::Parse {
            path: self.path.clone(),
            contents,
        })
    }

    fn save(&self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Keeps the score in memory; handy for tests and for runs without a home dir.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    score: Mutex<u32>,
}

impl MemoryScoreStore {
    pub fn new(score: u32) -> Self {
        Self { score: Mutex::new(score) }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(*self.score.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    fn save(&self, score: u32) -> Result<(), StoreError> {
        *self.score.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = score;
        Ok(())
    }
}
