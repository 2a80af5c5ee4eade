use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const FOOD_REWARD: u32 = 10;

const STORE_FILE: &str = "snake_highscore.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedScores {
    high_score: u32,
}

/// File-backed store for the single persisted value, the high score.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn open_default() -> Self {
        Self::at(STORE_FILE)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    /// A missing or unreadable store counts as no previous record.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str::<SavedScores>(&text)
                .map(|saved| saved.high_score)
                .unwrap_or(0),
            Err(_) => 0,
        }
    }

    pub fn save(&self, high_score: u32) -> Result<()> {
        let text = serde_json::to_string_pretty(&SavedScores { high_score })?;
        fs::write(&self.path, text)
            .with_context(|| format!("could not write the score file {}", self.path.display()))
    }
}

/// Session score plus the all-time high score. The score resets with every
/// session; the high score outlives them and is written back to the store
/// the moment it is beaten.
pub struct Scoreboard {
    score: u32,
    high_score: u32,
    store: HighScoreStore,
}

impl Scoreboard {
    pub fn load(store: HighScoreStore) -> Self {
        let high_score = store.load();
        Scoreboard { score: 0, high_score, store }
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn record_food(&mut self) -> Result<()> {
        self.score += FOOD_REWARD;

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score)?;
        }

        Ok(())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}
