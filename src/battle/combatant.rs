//! The minimal view of an army that the engine consumes

use crate::core::types::ArmyId;
use crate::roster::{Army, UnitStats};

/// One side of a battle: who fights and with which stats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant<'a> {
    pub army_id: ArmyId,
    pub player_name: &'a str,
    pub units: Vec<UnitStats>,
}

impl<'a> Combatant<'a> {
    pub fn new(army_id: ArmyId, player_name: &'a str, units: Vec<UnitStats>) -> Self {
        Self {
            army_id,
            player_name,
            units,
        }
    }

    /// Aggregate power, recomputed from the units every time
    pub fn power(&self) -> i64 {
        self.units.iter().map(UnitStats::power).sum()
    }

    pub fn totals(&self) -> ForceTotals {
        self.units.iter().fold(ForceTotals::default(), |acc, unit| ForceTotals {
            attack: acc.attack + i64::from(unit.attack),
            defense: acc.defense + i64::from(unit.defense),
            health: acc.health + i64::from(unit.health),
        })
    }
}

impl<'a> From<&'a Army> for Combatant<'a> {
    fn from(army: &'a Army) -> Self {
        Self::new(
            army.id,
            &army.player_name,
            army.units.iter().map(|u| u.stats()).collect(),
        )
    }
}

/// Per-side sums over all units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForceTotals {
    pub attack: i64,
    pub defense: i64,
    pub health: i64,
}

impl ForceTotals {
    /// Damage soaked from each incoming strike (floor of half the defense)
    pub fn mitigation(&self) -> i64 {
        self.defense.div_euclid(2)
    }
}
