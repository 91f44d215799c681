//! High score leaderboard
//!
//! Read/write contract only: a JSON array of entries, best first, capped at
//! `MAX_HIGH_SCORES`. Hosts decide where the file lives.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::sim::GameMode;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 50;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: String,
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub date: u64,
    pub mode: GameMode,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a score; returns the 1-based rank, or None if it didn't make the board
    ///
    /// Ties rank below existing entries.
    pub fn add_score(
        &mut self,
        name: &str,
        score: u64,
        mode: GameMode,
        timestamp: u64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let name = match name.trim() {
            "" => "Anonymous",
            trimmed => trimmed,
        };
        let entry = ScoreEntry {
            id: timestamp.to_string(),
            name: name.to_string(),
            score,
            date: timestamp,
            mode,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score across all modes (0 if empty)
    pub fn best_score(&self) -> u64 {
        self.entries.first().map_or(0, |e| e.score)
    }

    pub fn best_for_mode(&self, mode: GameMode) -> Option<u64> {
        self.entries.iter().find(|e| e.mode == mode).map(|e| e.score)
    }

    /// Load from a JSON file; a missing or unreadable file yields an empty board
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores at {}: {e}", path.display());
                Self::new()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, StorageError> {
        let json = fs::read_to_string(path)?;
        let mut scores: Self = serde_json::from_str(&json)?;
        // Hand-edited files may be unsorted or oversized
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Format a timestamp relative to `now` (both Unix ms)
pub fn format_age(timestamp: u64, now: u64) -> String {
    let diff_mins = now.saturating_sub(timestamp) / 60_000;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    match (diff_days, diff_hours, diff_mins) {
        (1, _, _) => "Yesterday".to_string(),
        (d, _, _) if d > 1 => format!("{d} days ago"),
        (_, 1, _) => "1 hour ago".to_string(),
        (_, h, _) if h > 1 => format!("{h} hours ago"),
        (_, _, 1) => "1 min ago".to_string(),
        (_, _, m) if m > 1 => format!("{m} mins ago"),
        _ => "Just now".to_string(),
    }
}
