//! Player records keyed by display name

use ahash::AHashMap;

use crate::roster::Player;

/// Which sides of a tally found a player record to update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallyReport {
    pub winner_updated: bool,
    pub loser_updated: bool,
    /// Winner and loser are the same display name
    pub shared_name: bool,
}

#[derive(Debug, Default)]
pub struct PlayerBook {
    players: AHashMap<String, Player>,
    order: Vec<String>,
}

impl PlayerBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing player with this name, or a freshly registered one
    pub fn get_or_create(&mut self, name: &str) -> &Player {
        let order = &mut self.order;
        self.players.entry(name.to_string()).or_insert_with(|| {
            let player = Player::new(name);
            tracing::info!(player = name, id = %player.id, "Player registered");
            order.push(name.to_string());
            player
        })
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    /// Players in registration order, at most `limit`
    pub fn list(&self, limit: usize) -> Vec<Player> {
        self.order
            .iter()
            .filter_map(|name| self.players.get(name))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Credit a battle result by display name
    ///
    /// Names without a player record are skipped. When both armies belong to
    /// the same name that player receives both the win and the loss.
    pub fn tally(&mut self, winner_name: &str, loser_name: &str) -> TallyReport {
        let shared_name = winner_name == loser_name;
        if shared_name {
            tracing::warn!(
                player = winner_name,
                "Winner and loser share a display name; crediting both results to one record"
            );
        }

        let winner_updated = match self.players.get_mut(winner_name) {
            Some(player) => {
                player.record_win();
                true
            }
            None => false,
        };
        let loser_updated = match self.players.get_mut(loser_name) {
            Some(player) => {
                player.record_loss();
                true
            }
            None => false,
        };

        if !winner_updated || !loser_updated {
            tracing::warn!(
                winner = winner_name,
                loser = loser_name,
                winner_updated,
                loser_updated,
                "Battle tally skipped a player with no record"
            );
        }

        TallyReport {
            winner_updated,
            loser_updated,
            shared_name,
        }
    }
}
