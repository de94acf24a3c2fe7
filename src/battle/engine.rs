//! Battle resolution
//!
//! Two health pools trade blows for at most `max_rounds` rounds. Each round
//! the first army strikes, then the second strikes back if it still stands.
//! Power is announced in the log but never decides the outcome.

use serde::{Deserialize, Serialize};

use crate::battle::combatant::{Combatant, ForceTotals};
use crate::battle::variance::VarianceSource;
use crate::core::config::BattleRules;
use crate::core::types::ArmyId;

/// Which of the two armies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

/// One attack against a health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    /// Aggregate attack plus variance, before mitigation (what the log shows)
    pub raw_damage: i64,
    /// Health actually removed from the target pool
    pub inflicted: i64,
    /// Target pool after the strike
    pub target_health: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub first_strike: Strike,
    /// `None` when the second army fell to the first strike
    pub second_strike: Option<Strike>,
}

/// Result of one resolution, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub winner: Side,
    pub winner_army_id: ArmyId,
    pub winner_name: String,
    pub log: Vec<String>,
    pub rounds: Vec<RoundReport>,
    pub first_power: i64,
    pub second_power: i64,
    pub first_health: i64,
    pub second_health: i64,
}

impl BattleOutcome {
    pub fn rounds_fought(&self) -> u32 {
        self.rounds.len() as u32
    }
}

/// Resolve a battle under the standard rules (10 rounds, variance ±20)
pub fn resolve_battle<V: VarianceSource + ?Sized>(
    army1: &Combatant<'_>,
    army2: &Combatant<'_>,
    rng: &mut V,
) -> BattleOutcome {
    resolve_battle_with_rules(army1, army2, &BattleRules::default(), rng)
}

/// Resolve a battle under explicit rules
///
/// Never fails. Empty armies have zero power and an empty pool; the round
/// loop is skipped and the tie-break hands the win to `army2`.
pub fn resolve_battle_with_rules<V: VarianceSource + ?Sized>(
    army1: &Combatant<'_>,
    army2: &Combatant<'_>,
    rules: &BattleRules,
    rng: &mut V,
) -> BattleOutcome {
    let first_power = army1.power();
    let second_power = army2.power();

    let mut log = vec![
        format!(
            "Battle begins between {} and {}!",
            army1.player_name, army2.player_name
        ),
        format!("{}'s army power: {}", army1.player_name, first_power),
        format!("{}'s army power: {}", army2.player_name, second_power),
    ];

    let totals1 = army1.totals();
    let totals2 = army2.totals();
    let mut health1 = totals1.health;
    let mut health2 = totals2.health;
    let mut rounds = Vec::new();

    let mut round = 1;
    while health1 > 0 && health2 > 0 && round <= rules.max_rounds {
        log.push(format!("\nRound {}:", round));

        let first_strike = strike(&totals1, &totals2, &mut health2, rules.variance, rng);
        log.push(format!(
            "{} deals {} damage!",
            army1.player_name, first_strike.raw_damage
        ));

        if health2 <= 0 {
            rounds.push(RoundReport {
                round,
                first_strike,
                second_strike: None,
            });
            break;
        }

        let second_strike = strike(&totals2, &totals1, &mut health1, rules.variance, rng);
        log.push(format!(
            "{} deals {} damage!",
            army2.player_name, second_strike.raw_damage
        ));

        rounds.push(RoundReport {
            round,
            first_strike,
            second_strike: Some(second_strike),
        });
        round += 1;
    }

    // Strictly greater; ties go to army2
    let (winner, victor) = if health1 > health2 {
        (Side::First, army1)
    } else {
        (Side::Second, army2)
    };
    log.push(format!("\n{} is victorious!", victor.player_name));

    tracing::debug!(
        winner = victor.player_name,
        rounds = rounds.len(),
        health1,
        health2,
        "Battle resolved"
    );

    BattleOutcome {
        winner,
        winner_army_id: victor.army_id,
        winner_name: victor.player_name.to_string(),
        log,
        rounds,
        first_power,
        second_power,
        first_health: health1,
        second_health: health2,
    }
}

fn strike<V: VarianceSource + ?Sized>(
    attacker: &ForceTotals,
    defender: &ForceTotals,
    target_health: &mut i64,
    variance: i32,
    rng: &mut V,
) -> Strike {
    let raw_damage = attacker.attack + i64::from(rng.roll(variance));
    let inflicted = (raw_damage - defender.mitigation()).max(0);
    *target_health -= inflicted;
    Strike {
        raw_damage,
        inflicted,
        target_health: *target_health,
    }
}
