//! Append-only battle history

use ahash::AHashMap;

use crate::core::types::BattleId;
use crate::roster::Battle;

#[derive(Debug, Default)]
pub struct BattleLedger {
    battles: Vec<Battle>,
    index: AHashMap<BattleId, usize>,
}

impl BattleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records are never modified or removed once appended
    pub fn record(&mut self, battle: Battle) {
        self.index.insert(battle.id, self.battles.len());
        self.battles.push(battle);
    }

    pub fn get(&self, id: BattleId) -> Option<&Battle> {
        self.index.get(&id).map(|&i| &self.battles[i])
    }

    /// Newest first, at most `limit`
    ///
    /// Appends happen under the registry write lock, so append order is
    /// creation order.
    pub fn recent(&self, limit: usize) -> Vec<Battle> {
        self.battles.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{resolve_battle, Combatant, ScriptedVariance};
    use crate::core::types::PlayerId;
    use crate::roster::{ArmyDraft, UnitCategory};

    fn battle() -> Battle {
        let a = ArmyDraft::from_counts("Ada", &[(UnitCategory::Tank, 1)]).into_army(PlayerId::new());
        let b = ArmyDraft::from_counts("Brook", &[(UnitCategory::Tank, 1)]).into_army(PlayerId::new());
        let outcome = resolve_battle(
            &Combatant::from(&a),
            &Combatant::from(&b),
            &mut ScriptedVariance::zero(),
        );
        Battle::from_outcome(&a, &b, outcome)
    }

    #[test]
    fn test_record_and_get() {
        let mut ledger = BattleLedger::new();
        let b = battle();
        let id = b.id;
        ledger.record(b);
        assert_eq!(ledger.get(id).unwrap().id, id);
        assert!(ledger.get(BattleId::new()).is_none());
    }

    #[test]
    fn test_recent_is_newest_first_and_capped() {
        let mut ledger = BattleLedger::new();
        let ids: Vec<_> = (0..5)
            .map(|_| {
                let b = battle();
                let id = b.id;
                ledger.record(b);
                id
            })
            .collect();

        let recent: Vec<_> = ledger.recent(3).into_iter().map(|b| b.id).collect();
        assert_eq!(recent, vec![ids[4], ids[3], ids[2]]);
        assert_eq!(ledger.len(), 5);
    }
}
