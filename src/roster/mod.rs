//! Roster records - units, armies, players and battle history
//!
//! These are the typed shapes exchanged with callers and kept by the
//! registry. Request bodies reject unknown fields.

pub mod army;
pub mod battle_record;
pub mod player;
pub mod unit;

pub use army::{army_power, Army, ArmyDraft};
pub use battle_record::{Battle, BattleRequest};
pub use player::{Player, PlayerDraft};
pub use unit::{Unit, UnitCategory, UnitDraft, UnitStats};
