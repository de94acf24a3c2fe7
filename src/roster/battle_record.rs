//! Persisted battle records
//!
//! Army ids and player names are copied at battle time. Later changes to the
//! armies (including deletion) never alter a stored record.

use serde::{Deserialize, Serialize};

use crate::battle::BattleOutcome;
use crate::core::types::{now, ArmyId, BattleId, Timestamp};
use crate::roster::army::Army;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub id: BattleId,
    pub army1_id: ArmyId,
    pub army2_id: ArmyId,
    pub army1_name: String,
    pub army2_name: String,
    pub winner_id: ArmyId,
    pub winner_name: String,
    pub battle_log: Vec<String>,
    pub created_at: Timestamp,
}

impl Battle {
    pub fn from_outcome(army1: &Army, army2: &Army, outcome: BattleOutcome) -> Self {
        Self {
            id: BattleId::new(),
            army1_id: army1.id,
            army2_id: army2.id,
            army1_name: army1.player_name.clone(),
            army2_name: army2.player_name.clone(),
            winner_id: outcome.winner_army_id,
            winner_name: outcome.winner_name,
            battle_log: outcome.log,
            created_at: now(),
        }
    }

    /// Display name of the losing side
    ///
    /// When both armies share a player name this is the winner's name too.
    pub fn loser_name(&self) -> &str {
        if self.winner_name == self.army2_name {
            &self.army1_name
        } else {
            &self.army2_name
        }
    }
}

/// Request body for starting a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BattleRequest {
    pub army1_id: ArmyId,
    pub army2_id: ArmyId,
}
