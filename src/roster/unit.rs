//! Units and their combat stats
//!
//! The category tag is metadata only. Combat math reads attack, defense and
//! health; cost matters to army building, never to resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::WarError;
use crate::core::types::UnitId;

/// Kind of unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Infantry,
    Tank,
    Artillery,
    Aircraft,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 4] = [
        UnitCategory::Infantry,
        UnitCategory::Tank,
        UnitCategory::Artillery,
        UnitCategory::Aircraft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Infantry => "infantry",
            UnitCategory::Tank => "tank",
            UnitCategory::Artillery => "artillery",
            UnitCategory::Aircraft => "aircraft",
        }
    }

    /// Standard recruit for this category
    pub fn template(&self) -> UnitDraft {
        match self {
            UnitCategory::Infantry => UnitDraft::new("Rifle Squad", *self, 10, 8, 100, 50),
            UnitCategory::Tank => UnitDraft::new("Battle Tank", *self, 30, 25, 200, 150),
            UnitCategory::Artillery => UnitDraft::new("Field Gun", *self, 35, 5, 80, 120),
            UnitCategory::Aircraft => UnitDraft::new("Strike Fighter", *self, 40, 10, 120, 200),
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitCategory {
    type Err = WarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| WarError::InvalidRequest(format!("unknown unit type '{}'", s)))
    }
}

/// The three stats the battle engine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
}

impl UnitStats {
    pub fn new(attack: i32, defense: i32, health: i32) -> Self {
        Self {
            attack,
            defense,
            health,
        }
    }

    /// Attack + defense + health
    pub fn power(&self) -> i64 {
        i64::from(self.attack) + i64::from(self.defense) + i64::from(self.health)
    }
}

/// A unit as stored inside an army
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: UnitCategory,
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
    pub cost: i32,
}

impl Unit {
    pub fn stats(&self) -> UnitStats {
        UnitStats::new(self.attack, self.defense, self.health)
    }

    pub fn power(&self) -> i64 {
        self.stats().power()
    }
}

/// A unit as submitted when building an army; receives its id on creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub category: UnitCategory,
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
    pub cost: i32,
}

impl UnitDraft {
    pub fn new(
        name: impl Into<String>,
        category: UnitCategory,
        attack: i32,
        defense: i32,
        health: i32,
        cost: i32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            attack,
            defense,
            health,
            cost,
        }
    }

    pub fn into_unit(self) -> Unit {
        Unit {
            id: UnitId::new(),
            name: self.name,
            category: self.category,
            attack: self.attack,
            defense: self.defense,
            health: self.health,
            cost: self.cost,
        }
    }
}
