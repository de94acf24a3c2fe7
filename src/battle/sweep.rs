//! Many-trial matchups
//!
//! Resolves the same pairing repeatedly to estimate win rates. Trials are
//! independent, so they run in parallel; each trial derives its own
//! generator from `(seed, trial)` and the totals do not depend on scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::battle::combatant::Combatant;
use crate::battle::engine::{resolve_battle_with_rules, Side};
use crate::battle::variance::BattleRng;
use crate::core::config::BattleRules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupSummary {
    pub seed: u64,
    pub trials: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    /// Battles that ran all the way to the round cap
    pub capped: u32,
    pub mean_rounds: f64,
}

impl MatchupSummary {
    pub fn first_win_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.first_wins) / f64::from(self.trials)
    }

    pub fn second_win_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.second_wins) / f64::from(self.trials)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    first_wins: u32,
    second_wins: u32,
    capped: u32,
    rounds: u64,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            first_wins: self.first_wins + other.first_wins,
            second_wins: self.second_wins + other.second_wins,
            capped: self.capped + other.capped,
            rounds: self.rounds + other.rounds,
        }
    }
}

/// Resolve `trials` independent battles between the same two armies
pub fn run_matchup(
    army1: &Combatant<'_>,
    army2: &Combatant<'_>,
    trials: u32,
    seed: u64,
    rules: &BattleRules,
) -> MatchupSummary {
    let tally = (0..trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = BattleRng::for_trial(seed, u64::from(trial));
            let outcome = resolve_battle_with_rules(army1, army2, rules, &mut rng);
            let rounds = outcome.rounds_fought();
            let reached_cap = rounds == rules.max_rounds
                && outcome.first_health > 0
                && outcome.second_health > 0;
            Tally {
                first_wins: u32::from(outcome.winner == Side::First),
                second_wins: u32::from(outcome.winner == Side::Second),
                capped: u32::from(reached_cap),
                rounds: u64::from(rounds),
            }
        })
        .reduce(Tally::default, Tally::merge);

    let mean_rounds = if trials == 0 {
        0.0
    } else {
        tally.rounds as f64 / f64::from(trials)
    };

    tracing::debug!(
        trials,
        first_wins = tally.first_wins,
        second_wins = tally.second_wins,
        "Matchup sweep finished"
    );

    MatchupSummary {
        seed,
        trials,
        first_wins: tally.first_wins,
        second_wins: tally.second_wins,
        capped: tally.capped,
        mean_rounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ArmyId;
    use crate::roster::UnitStats;

    #[test]
    fn test_every_trial_has_a_winner() {
        let a = Combatant::new(ArmyId::new(), "Ada", vec![UnitStats::new(40, 10, 300)]);
        let b = Combatant::new(ArmyId::new(), "Brook", vec![UnitStats::new(40, 10, 300)]);
        let summary = run_matchup(&a, &b, 200, 5, &BattleRules::default());

        assert_eq!(summary.first_wins + summary.second_wins, 200);
        assert!(summary.mean_rounds >= 1.0 && summary.mean_rounds <= 10.0);
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let a = Combatant::new(ArmyId::new(), "Ada", vec![UnitStats::new(45, 12, 280)]);
        let b = Combatant::new(ArmyId::new(), "Brook", vec![UnitStats::new(40, 20, 300)]);
        let rules = BattleRules::default();

        let first = run_matchup(&a, &b, 500, 77, &rules);
        let second = run_matchup(&a, &b, 500, 77, &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn test_overwhelming_army_always_wins() {
        let a = Combatant::new(ArmyId::new(), "Ada", vec![UnitStats::new(500, 500, 5000)]);
        let b = Combatant::new(ArmyId::new(), "Brook", vec![UnitStats::new(10, 10, 100)]);
        let summary = run_matchup(&a, &b, 100, 1, &BattleRules::default());

        assert_eq!(summary.first_wins, 100);
        assert_eq!(summary.first_win_rate(), 1.0);
        assert_eq!(summary.mean_rounds, 1.0);
    }

    #[test]
    fn test_unkillable_armies_hit_the_cap() {
        let a = Combatant::new(ArmyId::new(), "Ada", vec![UnitStats::new(1, 200, 1000)]);
        let b = Combatant::new(ArmyId::new(), "Brook", vec![UnitStats::new(1, 200, 1000)]);
        let summary = run_matchup(&a, &b, 50, 3, &BattleRules::default());

        assert_eq!(summary.capped, 50);
        assert_eq!(summary.second_wins, 50);
    }

    #[test]
    fn test_zero_trials() {
        let a = Combatant::new(ArmyId::new(), "Ada", vec![]);
        let b = Combatant::new(ArmyId::new(), "Brook", vec![]);
        let summary = run_matchup(&a, &b, 0, 3, &BattleRules::default());
        assert_eq!(summary.trials, 0);
        assert_eq!(summary.first_win_rate(), 0.0);
    }
}
