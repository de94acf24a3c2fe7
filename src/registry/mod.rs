//! Registry - in-process stores for players, armies and battles
//!
//! The battle engine never touches these. [`WarOffice`] fetches armies
//! from here, runs the engine, then writes the battle and the tallies back.

pub mod armies;
pub mod battles;
pub mod office;
pub mod players;

use serde::{Deserialize, Serialize};

use crate::auth::AuthGate;
use crate::core::config::AuthConfig;

pub use armies::ArmyBook;
pub use battles::BattleLedger;
pub use office::WarOffice;
pub use players::{PlayerBook, TallyReport};

/// Record counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarStats {
    pub total_players: usize,
    pub total_armies: usize,
    pub total_battles: usize,
}

/// Everything the war office stores, guarded as one unit
#[derive(Debug)]
pub struct Registry {
    pub players: PlayerBook,
    pub armies: ArmyBook,
    pub battles: BattleLedger,
    pub auth: AuthGate,
}

impl Registry {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            players: PlayerBook::new(),
            armies: ArmyBook::new(),
            battles: BattleLedger::new(),
            auth: AuthGate::new(auth),
        }
    }

    pub fn stats(&self) -> WarStats {
        WarStats {
            total_players: self.players.len(),
            total_armies: self.armies.len(),
            total_battles: self.battles.len(),
        }
    }
}
