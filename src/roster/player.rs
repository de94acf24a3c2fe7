//! Players and their win/loss record

use serde::{Deserialize, Serialize};

use crate::core::types::{now, PlayerId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Unique lookup key; battle tallies join on this, not on `id`
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub total_battles: u32,
    pub created_at: Timestamp,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            wins: 0,
            losses: 0,
            total_battles: 0,
            created_at: now(),
        }
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
        self.total_battles += 1;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
        self.total_battles += 1;
    }
}

/// Request body for registering a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerDraft {
    pub name: String,
}
