//! Property tests for battle resolution

use proptest::prelude::*;
use warfront::battle::{resolve_battle, BattleRng, Combatant, ScriptedVariance, Side};
use warfront::core::types::ArmyId;
use warfront::roster::UnitStats;

fn unit_stats() -> impl Strategy<Value = UnitStats> {
    (0..=60i32, 0..=60i32, 1..=400i32).prop_map(|(a, d, h)| UnitStats::new(a, d, h))
}

fn roster() -> impl Strategy<Value = Vec<UnitStats>> {
    prop::collection::vec(unit_stats(), 1..8)
}

proptest! {
    #[test]
    fn prop_resolution_terminates_with_a_participant(
        units1 in roster(),
        units2 in roster(),
        seed in any::<u64>(),
    ) {
        let a = Combatant::new(ArmyId::new(), "Ada", units1);
        let b = Combatant::new(ArmyId::new(), "Brook", units2);
        let outcome = resolve_battle(&a, &b, &mut BattleRng::new(seed));

        prop_assert!(outcome.rounds_fought() <= 10);
        prop_assert!(outcome.winner_army_id == a.army_id || outcome.winner_army_id == b.army_id);
        prop_assert!(outcome.log[0].contains("Ada") && outcome.log[0].contains("Brook"));
        prop_assert!(outcome.log.len() >= 3 + 2 * outcome.rounds.len() + 1);
    }

    #[test]
    fn prop_winner_follows_remaining_health(
        units1 in roster(),
        units2 in roster(),
        seed in any::<u64>(),
    ) {
        let a = Combatant::new(ArmyId::new(), "Ada", units1);
        let b = Combatant::new(ArmyId::new(), "Brook", units2);
        let outcome = resolve_battle(&a, &b, &mut BattleRng::new(seed));

        let expected = if outcome.first_health > outcome.second_health {
            Side::First
        } else {
            Side::Second
        };
        prop_assert_eq!(outcome.winner, expected);
    }

    #[test]
    fn prop_power_is_permutation_invariant(mut units in roster(), shift in 0usize..8) {
        let expected: i64 = units.iter().map(UnitStats::power).sum();
        let len = units.len();
        units.rotate_left(shift % len);
        units.reverse();
        let c = Combatant::new(ArmyId::new(), "Ada", units);
        prop_assert_eq!(c.power(), expected);
    }

    #[test]
    fn prop_mirror_without_variance_never_favors_first_on_a_draw(units in roster()) {
        let a = Combatant::new(ArmyId::new(), "Ada", units.clone());
        let b = Combatant::new(ArmyId::new(), "Brook", units);
        let outcome = resolve_battle(&a, &b, &mut ScriptedVariance::zero());

        if outcome.first_health == outcome.second_health {
            prop_assert_eq!(outcome.winner, Side::Second);
        }
    }

    #[test]
    fn prop_seeded_resolution_is_reproducible(
        units1 in roster(),
        units2 in roster(),
        seed in any::<u64>(),
    ) {
        let a = Combatant::new(ArmyId::new(), "Ada", units1);
        let b = Combatant::new(ArmyId::new(), "Brook", units2);
        let first = resolve_battle(&a, &b, &mut BattleRng::new(seed));
        let second = resolve_battle(&a, &b, &mut BattleRng::new(seed));
        prop_assert_eq!(first, second);
    }
}
