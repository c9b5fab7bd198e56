//! Persistence of finished-game records.
//!
//! Records accumulate in a JSON file; the store reads the whole history,
//! appends, and rewrites. A missing file is an empty history. The core
//! only ever hands records to this layer and never depends on reading
//! them back.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A finished (or abandoned) game, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub player_name: String,
    pub solved: bool,
    pub steps: u32,
    pub duration_ms: u64,
    /// Creation time as milliseconds since the Unix epoch.
    pub created: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error("failed to access the results file")]
    Io(#[from] io::Error),
    #[error("the results file is not valid JSON")]
    Format(#[from] serde_json::Error),
}

/// A store of game results with a best-N leaderboard.
pub trait ResultManager {
    /// Appends a result and returns the full history including it.
    fn add(&self, result: GameResult) -> Result<Vec<GameResult>, ResultError>;

    /// Returns every stored result in insertion order.
    fn all(&self) -> Result<Vec<GameResult>, ResultError>;

    /// The best solved games, fewest steps first.
    fn best(&self, limit: usize) -> Result<Vec<GameResult>, ResultError> {
        let mut best: Vec<GameResult> = self
            .all()?
            .into_iter()
            .filter(|result| result.solved)
            .collect();
        best.sort_by_key(|result| result.steps);
        best.truncate(limit);
        Ok(best)
    }
}

/// Result store backed by a single JSON file.
pub struct JsonResultManager {
    path: PathBuf,
}

impl JsonResultManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultManager for JsonResultManager {
    fn add(&self, result: GameResult) -> Result<Vec<GameResult>, ResultError> {
        let mut results = self.all()?;
        results.push(result);
        fs::write(&self.path, serde_json::to_vec_pretty(&results)?)?;
        Ok(results)
    }

    fn all(&self) -> Result<Vec<GameResult>, ResultError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}
