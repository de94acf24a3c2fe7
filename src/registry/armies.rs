//! Army storage

use ahash::AHashMap;

use crate::core::types::ArmyId;
use crate::roster::Army;

#[derive(Debug, Default)]
pub struct ArmyBook {
    armies: AHashMap<ArmyId, Army>,
    order: Vec<ArmyId>,
}

impl ArmyBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, army: Army) {
        let id = army.id;
        if self.armies.insert(id, army).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: ArmyId) -> Option<&Army> {
        self.armies.get(&id)
    }

    /// Armies in creation order, at most `limit`
    pub fn list(&self, limit: usize) -> Vec<Army> {
        self.order
            .iter()
            .filter_map(|id| self.armies.get(id))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn remove(&mut self, id: ArmyId) -> Option<Army> {
        let removed = self.armies.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.armies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;
    use crate::roster::{ArmyDraft, UnitCategory};

    fn army(name: &str) -> Army {
        ArmyDraft::from_counts(name, &[(UnitCategory::Infantry, 1)]).into_army(PlayerId::new())
    }

    #[test]
    fn test_insert_get_remove() {
        let mut book = ArmyBook::new();
        let a = army("Ada");
        let id = a.id;
        book.insert(a);

        assert_eq!(book.get(id).unwrap().player_name, "Ada");
        assert!(book.remove(id).is_some());
        assert!(book.get(id).is_none());
        assert!(book.remove(id).is_none());
        assert!(book.is_empty());
    }

    #[test]
    fn test_list_in_creation_order() {
        let mut book = ArmyBook::new();
        let first = army("Ada");
        let second = army("Brook");
        let third = army("Cato");
        let ids = [first.id, second.id, third.id];
        book.insert(first);
        book.insert(second);
        book.insert(third);

        book.remove(ids[1]);
        let listed: Vec<_> = book.list(10).into_iter().map(|a| a.id).collect();
        assert_eq!(listed, vec![ids[0], ids[2]]);
        assert_eq!(book.list(1).len(), 1);
    }
}
