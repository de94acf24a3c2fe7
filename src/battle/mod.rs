//! Battle engine - resolves one army against another
//!
//! Pure computation: two army snapshots and a variance source in, a winner
//! and an ordered battle log out. No I/O and no shared state; randomness
//! arrives only through the caller's [`VarianceSource`].

pub mod combatant;
pub mod engine;
pub mod sweep;
pub mod variance;

// Re-exports for convenient access
pub use combatant::{Combatant, ForceTotals};
pub use engine::{
    resolve_battle, resolve_battle_with_rules, BattleOutcome, RoundReport, Side, Strike,
};
pub use sweep::{run_matchup, MatchupSummary};
pub use variance::{BattleRng, ScriptedVariance, VarianceSource};
