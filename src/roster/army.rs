//! Armies: a player's named collection of units

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WarError};
use crate::core::types::{now, ArmyId, PlayerId, Timestamp};
use crate::roster::unit::{Unit, UnitCategory, UnitDraft};

/// Sum of attack + defense + health over every unit
pub fn army_power(units: &[Unit]) -> i64 {
    units.iter().map(Unit::power).sum()
}

/// A stored army
///
/// `total_power` is computed once at creation. The battle engine recomputes
/// power from the units instead of reading it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    pub id: ArmyId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub units: Vec<Unit>,
    pub total_power: i64,
    pub created_at: Timestamp,
}

impl Army {
    pub fn new(player_id: PlayerId, player_name: impl Into<String>, units: Vec<Unit>) -> Self {
        let total_power = army_power(&units);
        Self {
            id: ArmyId::new(),
            player_id,
            player_name: player_name.into(),
            units,
            total_power,
            created_at: now(),
        }
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Request body for building an army
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmyDraft {
    pub player_name: String,
    pub units: Vec<UnitDraft>,
}

impl ArmyDraft {
    pub fn new(player_name: impl Into<String>, units: Vec<UnitDraft>) -> Self {
        Self {
            player_name: player_name.into(),
            units,
        }
    }

    /// Build a draft from catalog templates, e.g. `[(Infantry, 3), (Tank, 1)]`
    pub fn from_counts(player_name: impl Into<String>, counts: &[(UnitCategory, u32)]) -> Self {
        let units = counts
            .iter()
            .flat_map(|&(category, count)| (0..count).map(move |_| category.template()))
            .collect();
        Self::new(player_name, units)
    }

    /// Player names are the tally key, so a blank one is refused
    pub fn validate(&self) -> Result<()> {
        if self.player_name.trim().is_empty() {
            return Err(WarError::InvalidRequest("player_name must not be blank".into()));
        }
        Ok(())
    }

    pub fn into_army(self, player_id: PlayerId) -> Army {
        let units = self.units.into_iter().map(UnitDraft::into_unit).collect();
        Army::new(player_id, self.player_name, units)
    }
}
