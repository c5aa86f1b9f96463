//! High score leaderboard
//!
//! Keeps the top 5 runs, best first. Equal scores keep the older entry ahead.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept
pub const MAX_ENTRIES: usize = 5;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Shortened wallet address or "anonymous"
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub ts: f64,
}

/// Top-scores table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// House entries shown before anyone has played
    pub fn seeded(now: f64) -> Self {
        let seeds = [
            ("TracBird", 240, 40_000.0),
            ("Sidechannel", 185, 80_000.0),
            ("AgentZero", 150, 140_000.0),
            ("MetaGamer", 132, 200_000.0),
            ("NeonOrbit", 110, 260_000.0),
        ];
        Self {
            entries: seeds
                .into_iter()
                .map(|(name, score, age)| LeaderboardEntry {
                    name: name.to_string(),
                    score,
                    ts: now - age,
                })
                .collect(),
        }
    }

    /// Restore ordering and size after loading untrusted data
    pub fn normalize(&mut self) {
        self.entries.retain(|e| e.score > 0);
        self.sort_and_truncate();
    }

    fn sort_and_truncate(&mut self) {
        // Stable: fully tied entries keep their insertion order
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.ts.total_cmp(&b.ts))
        });
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Slot a new run would take: after every entry with a higher score
    /// or an equal score recorded no later
    fn insertion_index(&self, score: u64, ts: f64) -> usize {
        self.entries
            .iter()
            .position(|e| e.score < score || (e.score == score && e.ts > ts))
            .unwrap_or(self.entries.len())
    }

    /// Insert a run into an ordered board. Returns the rank achieved
    /// (1-indexed) or None if it didn't make the board.
    pub fn record(&mut self, name: impl Into<String>, score: u64, ts: f64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self.insertion_index(score, ts);
        if index >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(
            index,
            LeaderboardEntry {
                name: name.into(),
                score,
                ts,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
